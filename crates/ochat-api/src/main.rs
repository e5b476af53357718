//! ochat CLI and REST API entry point.
//!
//! Binary name: `ochat`
//!
//! Parses CLI arguments, resolves configuration, initializes the database and
//! inference backend, then dispatches to a command handler or starts the
//! REST API server.

mod cli;
mod http;
mod state;

#[cfg(test)]
mod testing;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use ochat_infra::config::resolve_app_config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    ochat_observe::tracing_setup::init_tracing(cli.log_directives(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "ochat", &mut std::io::stdout());
        return Ok(());
    }

    let config = resolve_app_config(&cli.config, cli.config_overrides()).await;
    let state = AppState::init(&config).await?;

    let db_pool = state.db_pool.clone();
    let result = run(cli, config, state).await;
    db_pool.close().await;
    ochat_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli, config: ochat_types::config::AppConfig, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { .. } => {
            let addr = format!("{}:{}", config.host, config.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            if !cli.quiet {
                println!(
                    "  {} ochat API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, backend = %config.backend_url, "Server starting");

            let router = http::router::build_router(state, config.web_dir.as_deref());
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Models => {
            cli::models::list_models(&state, cli.json).await?;
        }

        Commands::Conversations => {
            cli::conversation::list_conversations(&state, cli.json).await?;
        }

        Commands::Show { id } => {
            cli::conversation::show_conversation(&state, &id, cli.json).await?;
        }

        Commands::New { title } => {
            cli::conversation::new_conversation(&state, title.as_deref(), cli.json).await?;
        }

        Commands::Rename { id, title } => {
            cli::conversation::rename_conversation(&state, &id, &title, cli.json).await?;
        }

        Commands::Delete { id, force } => {
            cli::conversation::delete_conversation(&state, &id, force, cli.json).await?;
        }

        Commands::Chat {
            model,
            conversation,
            message,
        } => {
            let message = message.join(" ");
            cli::chat::send_message(&state, &model, &message, conversation.as_deref(), cli.json)
                .await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
