use std::path::Path;

use anyhow::Result;

mod app;
mod input;
mod modal;
mod render;

pub fn run(config_path: &Path) -> Result<()> {
    app::run(config_path)
}
