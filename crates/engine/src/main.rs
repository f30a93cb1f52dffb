//! Tavernkeep Engine - Main entry point.
//!
//! Reads one JSON `Command` per line on stdin and writes one JSON
//! `RenderResult` per line on stdout. Logs go to stderr.

use std::sync::Arc;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tavernkeep_engine::api::{serve_lines, CommandHandler, RenderResult};
use tavernkeep_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::{EngineConfig, StoreBackend},
    memory_store::MemoryEntityStore,
    ports::{ClockPort, EntityStore},
    sqlite_store::SqliteEntityStore,
};
use tavernkeep_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tavernkeep_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Tavernkeep Engine");

    let config = EngineConfig::from_env();
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let store: Arc<dyn EntityStore> = match config.store {
        StoreBackend::Sqlite => {
            tracing::info!(
                db_path = %config.db_path,
                write_policy = ?config.write_policy,
                "Opening SQLite entity store"
            );
            Arc::new(
                SqliteEntityStore::open(&config.db_path, config.sqlite_options(), clock.clone())
                    .await?,
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory entity store, nothing will be persisted");
            Arc::new(MemoryEntityStore::with_policy(config.write_policy))
        }
    };

    let app = Arc::new(App::new(store, clock, Arc::new(SystemRandom::new()), config));
    let handler = CommandHandler::new(app);

    let (tx, mut rx) = mpsc::channel::<RenderResult>(64);
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(result) = rx.recv().await {
            let mut line = serde_json::to_string(&result)?;
            line.push('\n');
            stdout.write_all(line.as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok::<_, anyhow::Error>(())
    });

    let input = BufReader::new(tokio::io::stdin());
    serve_lines(handler, input, tx).await?;
    writer.await??;

    tracing::info!("Input closed, shutting down");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
