//! jirasheet - export JIRA issues to spreadsheets and bulk-update fields
//! from them, over a small authenticated web API.

mod api;
mod catalog;
mod config;
mod error;
mod flatten;
mod logging;
mod project;
mod query;
mod server;
mod sheet;
mod update;

use clap::Parser;
use tracing::{info, warn};

use crate::api::JiraClient;
use crate::config::AppConfig;
use crate::server::AppState;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "jirasheet", version, about)]
struct Cli {
    /// Socket address to listen on (overrides BIND_ADDR).
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    logging::init()?;

    let mut config = AppConfig::from_env()?;
    if let Some(bind) = cli.bind.as_deref() {
        config.bind_addr = config::parse_bind_addr(bind)?;
    }

    let jira = JiraClient::new(&config.jira)?;

    // Probe the connection once so a bad URL or credentials show up in the
    // logs at startup rather than on the first staff request.
    match jira.current_user().await {
        Ok(user) => {
            info!(jira_user = %user.display_name, account = %user.name, "connected to JIRA")
        }
        Err(e) => warn!("JIRA connection probe failed: {}", e),
    }

    let bind_addr = config.bind_addr;
    let app = server::build_router(AppState::new(config, jira));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
