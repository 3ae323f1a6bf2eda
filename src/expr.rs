//! Restricted console-expression grammar: a dotted path rooted at the
//! capability handle, optionally called with literal arguments. No ambient
//! code execution; anything outside this grammar is a compile error.

use serde_json::Value;

mod lexer;
mod parser;

pub use self::parser::parse;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A bare literal (string, number, bool, null, or object literal),
    /// evaluating to itself.
    Literal(Value),

    /// A call on the capability handle, e.g. `host.ui.toast({ ... })`.
    Call { path: Vec<String>, args: Vec<Value> },
}

impl Expr {
    pub fn path_display(path: &[String]) -> String {
        path.join(".")
    }
}
