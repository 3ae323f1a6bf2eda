use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli_exec;

#[derive(Parser)]
#[command(name = "opconsole")]
#[command(about = "Operator console for a host capability surface", long_about = None)]
struct Cli {
    /// Path to the host config file
    #[arg(long, value_name = "PATH", default_value = opconsole::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a single console expression and print the normalized result
    Run {
        expression: String,
    },

    /// List teams on the host
    Teams {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List users in a team
    Users {
        #[arg(long)]
        team: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List projects in a team
    Projects {
        #[arg(long)]
        team: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or update the host configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the configured host
    Show,
    /// Set host configuration values
    Set {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => opconsole::tui_console::run(&cli.config),
        Some(command) => cli_exec::handle_command(&cli.config, command),
    }
}
