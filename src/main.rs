//! ChatClone - terminal client for the Enkay LLM ChatClone chat server
//!
#![doc = "ChatClone - terminal chat client"]
#![doc = "Main entry point for the chatclone application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatclone::cli::{Cli, Commands};
use chatclone::commands;
use chatclone::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    if !config.ui.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Chat { research } => {
            tracing::info!("Starting interactive chat mode");
            commands::chat::run_chat(config, research).await?;
            Ok(())
        }
        Commands::Send {
            message,
            file,
            conversation,
            research,
            json,
        } => {
            tracing::info!("Sending single message");
            if let Some(path) = &file {
                tracing::debug!("Attaching file: {}", path.display());
            }
            let args = commands::send::SendArgs {
                message,
                file,
                conversation,
                research,
                json,
            };
            commands::send::run_send(config, args).await?;
            Ok(())
        }
        Commands::Upload { path, json } => {
            tracing::info!("Uploading {}", path.display());
            commands::upload::run_upload(config, &path, json).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "chatclone=debug" } else { "chatclone=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
