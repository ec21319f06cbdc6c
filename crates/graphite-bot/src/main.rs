//! Graphite Quest entry point.
//!
//! Binary name: `graphite`
//!
//! Parses CLI arguments, initializes the database and services, then either
//! connects to the Discord gateway or runs a single quest command locally.

mod cli;
mod discord;
mod state;

use clap::Parser;
use secrecy::SecretString;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = graphite_observe::tracing_setup::filter_for(cli.verbose, cli.quiet);
    if let Err(e) = graphite_observe::tracing_setup::init_tracing(filter, cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let api_key = cli.huggingface_api_key.map(SecretString::from);
    let state = AppState::init(cli.data_dir, cli.database_url, api_key).await?;

    let result = match cli.command {
        Commands::Serve { discord_token } => {
            discord::serve(&state, discord_token.map(SecretString::from)).await
        }
        Commands::Migrate => {
            println!("Data directory: {}", state.data_dir.display());
            println!("Database ready at {}", state.database_url);
            Ok(())
        }
        Commands::Quest { action } => cli::quest::run(&state, action).await,
    };

    state.shutdown().await;
    graphite_observe::tracing_setup::shutdown_tracing();
    result
}

/// Wait for Ctrl+C or SIGTERM.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
