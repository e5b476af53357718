//! CLI command definitions for the `ochat` binary.
//!
//! Uses clap derive macros for argument parsing. Connection settings can come
//! from flags, environment variables or the config file, in that order of
//! precedence.

pub mod chat;
pub mod conversation;
pub mod models;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use ochat_infra::config::ConfigOverrides;

/// Chat with local models through an Ollama backend.
#[derive(Parser)]
#[command(name = "ochat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = "ochat.toml")]
    pub config: PathBuf,

    /// SQLite connection string.
    #[arg(long, global = true, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Base URL of the Ollama backend.
    #[arg(long, global = true, env = "OLLAMA_API_URL")]
    pub backend_url: Option<String>,

    /// Also export tracing spans through OpenTelemetry (stdout).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Interface to bind.
        #[arg(long, env = "OCHAT_HOST")]
        host: Option<String>,

        /// Port to listen on.
        #[arg(long, short, env = "OCHAT_PORT")]
        port: Option<u16>,

        /// Directory of static front-end assets to serve.
        #[arg(long, env = "OCHAT_WEB_DIR")]
        web_dir: Option<String>,
    },

    /// List models available on the backend.
    Models,

    /// List conversations, newest first.
    #[command(alias = "ls")]
    Conversations,

    /// Show a conversation transcript.
    Show {
        /// Conversation id.
        id: String,
    },

    /// Create an empty conversation.
    New {
        /// Title (defaults to "New Conversation").
        #[arg(long, short)]
        title: Option<String>,
    },

    /// Rename a conversation.
    Rename {
        /// Conversation id.
        id: String,

        /// New title.
        title: String,
    },

    /// Delete a conversation and all of its messages.
    #[command(alias = "rm")]
    Delete {
        /// Conversation id.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(long, short)]
        force: bool,
    },

    /// Send one message and print the reply.
    Chat {
        /// Model to ask.
        #[arg(long, short)]
        model: String,

        /// Continue an existing conversation instead of starting one.
        #[arg(long, short)]
        conversation: Option<String>,

        /// Message text.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Tracing directives for the chosen verbosity.
    pub fn log_directives(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,ochat=debug",
            _ => "trace",
        }
    }

    /// Flag and environment values that override the config file.
    pub fn config_overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            database_url: self.database_url.clone(),
            backend_url: self.backend_url.clone(),
            ..ConfigOverrides::default()
        };

        if let Commands::Serve {
            host,
            port,
            web_dir,
        } = &self.command
        {
            overrides.host = host.clone();
            overrides.port = *port;
            overrides.web_dir = web_dir.clone();
        }

        overrides
    }
}
