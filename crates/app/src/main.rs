mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use api::{AppState, create_router};
use clap::{ArgAction, Parser, Subcommand};
use services::{AppServices, RandomSource};
use storage::repository::Storage;
use storage::seed::seed_defaults;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, normalize_sqlite_url, prepare_sqlite_dir};

/// Trivia question bank HTTP service.
#[derive(Debug, Parser)]
#[command(name = "trivia", version, about)]
struct Cli {
    /// TOML config file (defaults to ./trivia.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv); ignored when RUST_LOG is set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve {
        /// SQLite database URL or path
        #[arg(long)]
        db: Option<String>,
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,
    },
    /// Create the default categories and starter questions
    Seed {
        /// SQLite database URL or path
        #[arg(long)]
        db: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn open_storage(database_url: &str) -> Result<Storage> {
    let url = normalize_sqlite_url(database_url);
    prepare_sqlite_dir(&url).with_context(|| format!("preparing database directory for {url}"))?;
    Storage::sqlite(&url)
        .await
        .with_context(|| format!("opening database {url}"))
}

async fn serve(config: AppConfig) -> Result<()> {
    let storage = open_storage(&config.database_url).await?;
    let rng = config
        .quiz_seed
        .map_or_else(RandomSource::thread, RandomSource::seeded);
    let services = AppServices::from_storage(&storage, rng);
    let app = create_router(AppState::from(&services));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn seed(config: AppConfig) -> Result<()> {
    let storage = open_storage(&config.database_url).await?;
    let report = seed_defaults(&storage).await.context("seeding database")?;
    println!(
        "seeded {} categories and {} questions",
        report.categories, report.questions
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(path) = &cli.config {
        ensure!(path.exists(), "config file {} does not exist", path.display());
    }
    let mut config = AppConfig::load(cli.config.as_deref())
        .map_err(|err| anyhow::anyhow!("loading configuration: {err}"))?;

    match cli.command.unwrap_or(Command::Serve { db: None, bind: None }) {
        Command::Serve { db, bind } => {
            if let Some(db) = db {
                config.database_url = db;
            }
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            serve(config).await
        }
        Command::Seed { db } => {
            if let Some(db) = db {
                config.database_url = db;
            }
            seed(config).await
        }
    }
}
