//! Research CLI Application
//!
//! Command-line interface for parsing plans and replaying research runs.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use research_core::{ConfigBuilder, SessionStore};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        export_dir,
        deployment,
        no_color,
        command,
    } = Args::parse();

    let mut builder = ConfigBuilder::new().with_export_dir(export_dir);
    if let Some(name) = deployment {
        builder = builder.with_deployment_name(name);
    }
    let config = builder.build().context("Failed to load configuration")?;

    info!("{} started", config.app_title);

    let cli = Cli::new(
        config,
        SessionStore::with_fixtures(),
        TerminalRenderer::new(!no_color),
    );

    match command {
        Some(Plan { command }) => cli.handle_plan_command(command),
        Some(Replay(args)) => cli.replay(args),
        Some(Mock(args)) => cli.mock(args).await,
        Some(Sessions { command }) => cli.handle_session_command(command),
        Some(Export(args)) => cli.export(args).await,
        None => {
            cli.list_sessions();
            Ok(())
        }
    }
}
