//! hookroute CLI - route agent hook events to handlers.

use clap::{Parser, Subcommand};
use hookroute::cli;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "HOOKROUTE_LOG";

#[derive(Parser)]
#[command(name = "hookroute")]
#[command(author, version, about = "Typed event router for agent hooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// [Hook] Dispatch one event (JSON stdin/stdout). Exits 2 when blocked.
    Run {
        /// Config file. Defaults to ~/.hookroute/config.toml.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// [User] List routable event names.
    Events,

    /// [User] Show the effective configuration.
    Config {
        /// Config file. Defaults to ~/.hookroute/config.toml.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Log to stderr so stdout carries only the decision.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("hookroute=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config } => {
            cli::run::run(config.as_deref()).map(|d| ExitCode::from(d.exit_code()))
        }
        Commands::Events => cli::events::run().map(|()| ExitCode::SUCCESS),
        Commands::Config { config } => {
            cli::config::run(config.as_deref()).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("hookroute: error: {e}");
            ExitCode::FAILURE
        }
    }
}
