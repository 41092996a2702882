use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use clusterctl::{
    cli::Cli,
    command::{exit_status, run_then_close, Command, Session},
    config::Config,
    http_client::HttpClustersApi,
    identity::ConfiguredIdentity,
    interactive::{AssumeYes, Confirmer, NonInteractive, Prompter, TerminalPrompter},
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    exit_status(&try_main(cli).await).into()
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "clusterctl=debug" } else { "clusterctl=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

async fn try_main(cli: Cli) -> Result<()> {
    let config = Config::from_file(&cli.config)
        .await
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    let identity = ConfiguredIdentity::from(&config.identity);
    let api = HttpClustersApi::new(&config.api).context("Failed to create OCM connection")?;

    let prompter: &dyn Prompter = if cli.interactive {
        &TerminalPrompter
    } else {
        &NonInteractive
    };
    let confirmer: &dyn Confirmer = if cli.yes { &AssumeYes } else { &TerminalPrompter };

    let session = Session {
        api: &api,
        identity: &identity,
        prompter,
        confirmer,
    };

    run_then_close(&session, &Command::from(cli.command), Utc::now()).await?;

    Ok(())
}
