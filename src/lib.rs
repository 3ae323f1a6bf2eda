pub mod capability;
pub mod config;
pub mod console;
pub mod expr;
pub mod listing;
pub mod tui_console;
