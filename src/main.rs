use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maglab::config::AppConfig;
use maglab::error::AppError;

#[derive(Parser)]
#[command(name = "maglab", version, about = "Magnesium-alloy behavior prediction")]
struct Cli {
    /// Path to a JSON config file (defaults are used when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the lab data files, train both models, build the wear database.
    Train,
    /// Serve predictions over HTTP from previously trained artifacts.
    Serve {
        /// Override the configured bind address, e.g. 0.0.0.0:8080.
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maglab=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Train => {
            let report = maglab::trainer::run(&config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Serve { addr } => {
            if let Some(addr) = addr {
                config.bind_addr = addr;
            }
            maglab::server::serve(&config).await
        }
    }
}
