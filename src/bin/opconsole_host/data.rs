use serde_json::{Value, json};

pub(crate) const TEAM_ALPHA: &str = "team-alpha-uuid";
pub(crate) const TEAM_BETA: &str = "team-beta-uuid";

// createTime values are epoch microseconds, matching the platform's wire
// format.
pub(crate) fn teams() -> Value {
    json!([
        {
            "id": TEAM_ALPHA,
            "name": "Alpha",
            "owner": "alice",
            "createTime": 1_700_000_000_000_000_i64,
        },
        {
            "id": TEAM_BETA,
            "name": "Beta",
            "owner": "bob",
            "createTime": 1_712_345_678_000_000_i64,
        },
    ])
}

pub(crate) fn users(team_id: &str) -> Value {
    match team_id {
        TEAM_BETA => json!([
            { "id": "user-3", "name": "carol", "email": "carol@example.com" },
        ]),
        _ => json!([
            { "id": "user-1", "name": "alice", "email": "alice@example.com" },
            { "id": "user-2", "name": "bob", "email": "bob@example.com" },
        ]),
    }
}

pub(crate) fn projects(team_id: &str) -> Value {
    match team_id {
        TEAM_BETA => json!([
            { "id": "proj-beta-1", "name": "Skunkworks", "createTime": 1_713_000_000_000_000_i64 },
        ]),
        _ => json!([
            { "id": "proj-1", "name": "Apollo", "createTime": 1_701_000_000_000_000_i64 },
            { "id": "proj-2", "name": "Hermes", "createTime": 1_702_000_000_000_000_i64 },
        ]),
    }
}

pub(crate) fn team_info() -> Value {
    json!({
        "teamUUID": TEAM_ALPHA,
        "name": "Alpha",
    })
}

pub(crate) fn manifest() -> Value {
    json!({
        "name": "opconsole demo host",
        "version": "0.1.0",
        "abilities": ["openapi", "settingPage"],
    })
}
