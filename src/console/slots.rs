/// Seed commands shown when the console opens, one per slot. The slot count
/// is fixed for the console's lifetime.
pub const SEED_COMMANDS: &[&str] = &[
    r#"host.fetch("/v2/project/projects?teamID=", { method: "GET" })"#,
    r#"host.ui.toast({ type: "info", title: "hello Open Platform" })"#,
    r#"host.ui.modal({ type: "info", title: "hello Open Platform" })"#,
    "host.getLocale()",
    "host.getTimezone()",
    "host.getTeamInfo()",
];

/// Prefix that marks the slot eligible for the context resolver's one-time
/// rewrite.
const FETCH_PREFIX: &str = "host.fetch";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotOrigin {
    Seed,
    UserEdited,
    AutoFilled,
}

#[derive(Clone, Debug)]
pub struct CommandSlot {
    pub index: usize,
    pub text: String,
    pub origin: SlotOrigin,
}

/// Ordered, fixed-size set of editable command templates. Expression syntax
/// is never validated here; that happens at execution time.
pub struct SlotStore {
    slots: Vec<CommandSlot>,
    designated_fetch: Option<usize>,
}

impl SlotStore {
    pub fn seeded() -> Self {
        Self::from_seeds(SEED_COMMANDS)
    }

    pub fn from_seeds(seeds: &[&str]) -> Self {
        let slots = seeds
            .iter()
            .enumerate()
            .map(|(index, text)| CommandSlot {
                index,
                text: text.to_string(),
                origin: SlotOrigin::Seed,
            })
            .collect::<Vec<_>>();
        // Matched once, at initialization; later edits do not re-designate.
        let designated_fetch = slots
            .iter()
            .position(|s| s.text.starts_with(FETCH_PREFIX));
        Self {
            slots,
            designated_fetch,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CommandSlot> {
        self.slots.get(index)
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(|s| s.text.as_str())
    }

    /// User edit: accepted verbatim.
    pub fn set(&mut self, index: usize, text: String) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        slot.text = text;
        slot.origin = SlotOrigin::UserEdited;
        true
    }

    /// Programmatic rewrite. Writes only when the computed text differs from
    /// the current text; an equal-text call is a skip, not an error. Returns
    /// whether a write happened.
    pub fn rewrite_if_different(&mut self, index: usize, text: &str) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if slot.text == text {
            return false;
        }
        slot.text = text.to_string();
        slot.origin = SlotOrigin::AutoFilled;
        true
    }

    pub fn designated_fetch_slot(&self) -> Option<usize> {
        self.designated_fetch
    }

    pub fn snapshot(&self) -> Vec<CommandSlot> {
        self.slots.clone()
    }
}

#[cfg(test)]
#[path = "../tests/console/slots_tests.rs"]
mod tests;
