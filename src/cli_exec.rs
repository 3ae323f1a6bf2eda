use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use opconsole::capability::HostCapability;
use opconsole::config::HostConfig;
use opconsole::console::{
    DiagChannel, ExecutionOutcome, Executor, NotificationSink, normalize, should_surface,
};
use opconsole::listing;

use crate::{Commands, ConfigCommands};

pub(crate) fn handle_command(config_path: &Path, command: Commands) -> Result<()> {
    match command {
        Commands::Run { expression } => run_expression(config_path, &expression),
        Commands::Teams { json } => {
            let teams = with_capability(config_path, |cap| async move {
                listing::fetch_teams(cap.as_ref()).await
            })?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&teams).context("serialize teams")?
                );
            } else {
                let rows: Vec<Vec<String>> = teams
                    .iter()
                    .map(|t| {
                        vec![
                            t.id.clone(),
                            t.name.clone(),
                            listing::format_create_time(t.create_time),
                            t.owner.clone(),
                        ]
                    })
                    .collect();
                print!(
                    "{}",
                    listing::render_table(&["ID", "NAME", "CREATED", "OWNER"], &rows)
                );
            }
            Ok(())
        }
        Commands::Users { team, json } => {
            let users = with_capability(config_path, |cap| async move {
                listing::fetch_users(cap.as_ref(), &team).await
            })?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&users).context("serialize users")?
                );
            } else {
                let rows: Vec<Vec<String>> = users
                    .iter()
                    .map(|u| vec![u.id.clone(), u.name.clone(), u.email.clone()])
                    .collect();
                print!("{}", listing::render_table(&["ID", "NAME", "EMAIL"], &rows));
            }
            Ok(())
        }
        Commands::Projects { team, json } => {
            let projects = with_capability(config_path, |cap| async move {
                listing::fetch_projects(cap.as_ref(), &team).await
            })?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&projects).context("serialize projects")?
                );
            } else {
                let rows: Vec<Vec<String>> = projects
                    .iter()
                    .map(|p| {
                        vec![
                            p.id.clone(),
                            p.name.clone(),
                            listing::format_create_time(p.create_time),
                        ]
                    })
                    .collect();
                print!(
                    "{}",
                    listing::render_table(&["ID", "NAME", "CREATED"], &rows)
                );
            }
            Ok(())
        }
        Commands::Config { command } => handle_config(config_path, command),
    }
}

fn run_expression(config_path: &Path, expression: &str) -> Result<()> {
    let config = HostConfig::load_or_default(config_path)?;
    let capability = Arc::new(HostCapability::new(config)?);
    let sink = NotificationSink::new(capability.clone(), DiagChannel::Stderr);
    let executor = Executor::new(capability, sink);

    let surfacing = should_surface(expression);
    let runtime = tokio::runtime::Runtime::new().context("start runtime")?;
    let outcome = runtime.block_on(executor.execute(expression));

    match outcome {
        None => Ok(()),
        Some(ExecutionOutcome::Success(value)) => {
            if surfacing {
                println!("{}", normalize(value).to_text());
            } else {
                eprintln!("[info] invoke ok");
            }
            Ok(())
        }
        Some(ExecutionOutcome::Failure(err)) => anyhow::bail!("{err}"),
    }
}

fn with_capability<T, F, Fut>(config_path: &Path, f: F) -> Result<T>
where
    F: FnOnce(Arc<HostCapability>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let config = HostConfig::load_or_default(config_path)?;
    let capability = Arc::new(HostCapability::new(config)?);
    let runtime = tokio::runtime::Runtime::new().context("start runtime")?;
    runtime.block_on(f(capability))
}

fn handle_config(config_path: &Path, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let cfg = HostConfig::load_or_default(config_path)?;
            println!("url: {}", cfg.base_url);
            println!("locale: {}", cfg.locale);
            println!("timezone: {}", cfg.timezone);
            println!(
                "token: {}",
                if cfg.token.is_empty() { "(unset)" } else { "(set)" }
            );
            Ok(())
        }
        ConfigCommands::Set {
            url,
            token,
            locale,
            timezone,
        } => {
            let mut cfg = HostConfig::load_or_default(config_path)?;
            if let Some(url) = url {
                cfg.base_url = url;
            }
            if let Some(token) = token {
                cfg.token = token;
            }
            if let Some(locale) = locale {
                cfg.locale = locale;
            }
            if let Some(timezone) = timezone {
                cfg.timezone = timezone;
            }
            cfg.save(config_path)?;
            println!("Config written to {}", config_path.display());
            Ok(())
        }
    }
}
