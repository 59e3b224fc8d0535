//! transcript-chat - chat with an AI about meeting transcripts
//!
#![doc = "transcript-chat - chat with an AI about meeting transcripts"]
#![doc = "Main entry point for the transcript-chat application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use transcript_chat::cli::{Cli, Commands};
use transcript_chat::commands;
use transcript_chat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose, cli.json_logs);

    // Load and validate configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    let failure_title = match &cli.command {
        Commands::Upload { .. } => "Upload failed",
        Commands::Ask { .. } => "Chat request failed",
        Commands::Health => "Health check failed",
        _ => "Error",
    };

    if let Err(e) = run(cli.command, &config).await {
        commands::print_failure(failure_title, &e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Chat { session } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(s) = &session {
                tracing::debug!("Opening session on start: {}", s);
            }
            commands::chat::run_chat(config, session).await
        }
        Commands::Upload { file, text } => {
            if let Some(path) = &file {
                tracing::debug!("Reading transcript from: {}", path.display());
            }
            commands::upload(config, file.as_deref(), text).await
        }
        Commands::Ask { session, message } => {
            commands::ask(config, &session, &message.join(" ")).await
        }
        Commands::Sessions { command } => commands::sessions::handle_sessions(config, command),
        Commands::Profile { command } => commands::profile(config, command),
        Commands::Clear { yes } => commands::clear(config, yes),
        Commands::Health => commands::health(config).await,
        Commands::Remote { command } => commands::remote::handle_remote(config, command).await,
    }
}

fn init_tracing(verbose: bool, json_logs: bool) {
    let default_filter = if verbose {
        "transcript_chat=debug"
    } else {
        "transcript_chat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
