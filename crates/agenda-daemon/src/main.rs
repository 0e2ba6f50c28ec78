use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};

mod engine;
mod schedule;

/// Weekly window maintenance for recurring class series.
#[derive(Parser, Debug)]
#[command(name = "agenda-daemon", version)]
struct Cli {
    /// Path to agenda.toml (default: ~/.agenda/agenda.toml).
    #[arg(long)]
    config: Option<String>,

    /// Run one maintenance pass immediately and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda_daemon=info,agenda_window=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // load config: explicit flag > AGENDA_CONFIG env > ~/.agenda/agenda.toml
    let config_path = cli.config.or_else(|| std::env::var("AGENDA_CONFIG").ok());
    let config =
        agenda_core::config::AgendaConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
            warn!("Config load failed ({e}), using defaults");
            agenda_core::config::AgendaConfig::default()
        });

    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");
    let conn = rusqlite::Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let store = agenda_store::OccurrenceStore::new(conn)?;

    if cli.once {
        // Manual re-trigger surface; safe to overlap with a scheduled run
        // except for the narrow check-then-create race between instances.
        let today = chrono::Local::now().date_naive();
        let summary = agenda_window::run_window_job(&store, today)?;
        info!(
            series = summary.series_seen,
            created = summary.created,
            "single maintenance run complete"
        );
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let engine = engine::TriggerEngine::new(store, config.trigger.clone());
    let engine_task = tokio::spawn(engine.run(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    info!("ctrl-c received, shutting down");
    let _ = shutdown_tx.send(true);
    engine_task.await?;

    Ok(())
}

fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
}
