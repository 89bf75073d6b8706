use std::{env, sync::Arc};

use config::{DEFAULT_CONFIG_PATH, load_config};
use database::models::history::ArchiveHistory;
use global::Global;
use tokio::signal;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking;
use tracing_subscriber::{Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod database;
mod global;
mod web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (nb, _guard) = non_blocking(std::io::stdout());

    let config_path = env::var("SETLIST_CONFIG").unwrap_or(DEFAULT_CONFIG_PATH.to_string());

    let config = load_config(&config_path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(nb)
                .with_target(false)
                .with_filter(LevelFilter::from(config.server.log_level)),
        )
        .init();

    let connection = database::connect(&config.database.path).await?;
    database::run_migrations(&connection).await?;

    let history = ArchiveHistory::load(&connection).await?;
    tracing::info!(
        shows = history.number_of_shows,
        songs = history.number_of_distinct_songs,
        venues = history.number_of_venues,
        "Loaded archive from {}",
        config.database.path
    );

    let global = Arc::new(Global {
        config,
        database: Arc::new(connection),
        history,
    });

    tokio::select! {
        r = web::serve_web(global) => {
            if let Err(e) = r {
                tracing::error!("HTTP server exited with error: {}", e);
            }
        },
        _ = signal::ctrl_c() => {
            tracing::info!("Shutting down HTTP server...");
        },
    }

    Ok(())
}
