//! Stand-in for the host platform: serves the manifest and the small slice
//! of the OpenAPI surface the console and listing pages consume, guarded by
//! a single dev bearer token.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;

#[path = "opconsole_host/data.rs"]
mod data;
#[path = "opconsole_host/routes.rs"]
mod routes;

#[derive(Parser)]
#[command(name = "opconsole-host")]
#[command(about = "Demo host platform for opconsole", long_about = None)]
struct Args {
    /// Listen address (use port 0 to pick a free port)
    #[arg(long, default_value = "127.0.0.1:8082")]
    addr: SocketAddr,

    /// Write the bound base URL to this file once listening
    #[arg(long, value_name = "PATH")]
    addr_file: Option<PathBuf>,

    /// Bearer token accepted on authenticated routes
    #[arg(long, default_value = "dev")]
    dev_token: String,
}

pub(crate) struct HostState {
    pub(crate) token: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let args = Args::parse();
    let state = Arc::new(HostState {
        token: args.dev_token.clone(),
    });

    let app = routes::router(state);

    let listener = TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local = listener.local_addr().context("local addr")?;
    let base_url = format!("http://{local}");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, &base_url)
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }
    println!("opconsole-host listening on {base_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("serve")
}
