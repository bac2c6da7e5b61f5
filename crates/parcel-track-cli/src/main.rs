mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parcel_track::{Gateway, ModalKind, PackageId};
use parcel_track_http::{HttpGateway, HttpGatewayConfig};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "parcel-track")]
#[command(about = "Manage tracked packages and browse their tracking history")]
struct Cli {
    /// Path to the config file (defaults to ~/.config/parcel-track/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the interactive package list (default)
    Tui,
    /// List configured packages
    List,
    /// Rename a tracked package
    Rename {
        /// Package ID
        id: PackageId,
        /// New title
        title: String,
    },
    /// Stop tracking a package
    Delete {
        /// Package ID
        id: PackageId,
    },
    /// Show the tracking history of a package
    History {
        /// Package ID
        id: PackageId,
    },
}

fn build_gateway(config: &AppConfig) -> Result<HttpGateway> {
    let gateway_config = HttpGatewayConfig {
        base_url: config.base_url.clone(),
        timeout: config.timeout(),
        session_cookie: config.session_cookie.clone(),
    };
    HttpGateway::new(gateway_config).context("failed to set up backend client")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let mut app_config = config::load_config(cli.config.as_deref());
    if let Some(base_url) = cli.base_url {
        app_config.base_url = base_url;
    }
    tracing::info!(base_url = %app_config.base_url, packages = app_config.packages.len(), "parcel-track starting");

    let result = match cli.command.unwrap_or(Command::Tui) {
        Command::List => {
            commands::list::run(&app_config.packages);
            Ok(())
        }
        Command::Rename { id, title } => {
            let gateway = build_gateway(&app_config)?;
            let mut page = commands::page_with(&app_config.packages, id);
            commands::modal::run(&gateway, &mut page, id, ModalKind::TitleInput, Some(&title)).await
        }
        Command::Delete { id } => {
            let gateway = build_gateway(&app_config)?;
            let mut page = commands::page_with(&app_config.packages, id);
            commands::modal::run(&gateway, &mut page, id, ModalKind::Delete, None).await
        }
        Command::History { id } => {
            let gateway = build_gateway(&app_config)?;
            let mut page = commands::page_with(&app_config.packages, id);
            commands::history::run(&gateway, &mut page, id).await
        }
        Command::Tui => {
            let gateway: Arc<dyn Gateway> = Arc::new(build_gateway(&app_config)?);
            parcel_track_tui::run(gateway, app_config.packages, app_config.base_url).await
        }
    };

    if let Err(err) = &result {
        tracing::error!(error = ?err, "command failed");
    }
    tracing::info!("parcel-track exited");
    result
}
