// ABOUTME: Entry point for the repull CLI application.
// ABOUTME: Validates the request, connects to the engine and runs the upgrade.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use repull::config::Config;
use repull::error::{Error, Result};
use repull::output::{Output, OutputMode};
use repull::runtime::{BollardRuntime, RuntimeError, RuntimeInfoTrait, detect_local};
use repull::upgrade::{self, UpgradeRequest};
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    if let Err(e) = run(cli, &mut output).await {
        if let Error::Upgrade(err) = &e
            && err.is_irrecoverable()
            && let Some(name) = err.container()
        {
            tracing::warn!("{name} needs manual recreation");
        }
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    match cli.command {
        Commands::Upgrade {
            container,
            all,
            pull_only,
            stop_timeout,
            classifier,
        } => {
            // Selection errors are reported before the engine is contacted.
            let request = UpgradeRequest::new(container.as_deref(), all, pull_only)?;

            let mut config = match &cli.config {
                Some(path) => Config::load(path)?,
                None => Config::discover(&env::current_dir()?)?,
            };
            if let Some(runtime) = cli.runtime {
                config.runtime = Some(runtime);
            }
            if let Some(socket) = cli.socket {
                config.socket = Some(socket);
            }
            if let Some(secs) = stop_timeout {
                config.stop_timeout = Some(Duration::from_secs(secs));
            }
            if let Some(kind) = classifier {
                config.classifier = kind;
            }
            config.validate()?;

            run_upgrade(&config, &request, output).await
        }
    }
}

async fn run_upgrade(config: &Config, request: &UpgradeRequest, output: &mut Output) -> Result<()> {
    output.start_timer();

    let detected = detect_local(&config.runtime_config()).map_err(RuntimeError::from)?;
    tracing::debug!("using {} at {}", detected.runtime_type, detected.socket_path);
    let runtime = BollardRuntime::connect(&detected).map_err(RuntimeError::from)?;
    runtime.ping().await.map_err(RuntimeError::from)?;
    output.progress(&format!("Connected to {}", detected.runtime_type));

    let options = config.upgrade_options();
    let done =
        upgrade::upgrade_with(&runtime, request, &options, |report| output.report(report)).await?;

    let summary = match done {
        0 => "No containers to upgrade".to_string(),
        1 => "Upgraded 1 container".to_string(),
        n => format!("Upgraded {n} containers"),
    };
    output.success(&summary);
    Ok(())
}
