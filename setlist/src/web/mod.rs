use std::net::SocketAddr;

use anyhow::Context;
use assets::create_assets_router;
use axum::Router;
use pages::create_pages_router;
use shows::create_shows_router;
use songs::create_songs_router;
use tower_http::trace::TraceLayer;
use venues::create_venues_router;

mod assets;
mod error;
mod htmx;
mod pages;
mod shows;
mod songs;
mod templates;
mod venues;
mod window;

use crate::global::SharedGlobal;

pub fn create_router(global: SharedGlobal) -> Router {
    Router::new()
        .merge(create_pages_router())
        .merge(create_shows_router())
        .merge(create_songs_router())
        .merge(create_venues_router())
        .merge(create_assets_router())
        .layer(TraceLayer::new_for_http())
        .with_state(global)
}

pub async fn serve_web(global: SharedGlobal) -> anyhow::Result<()> {
    let addr = format!("{}:{}", global.config.server.ip, global.config.server.port)
        .parse::<SocketAddr>()
        .context("invalid http server address")?;

    let app = create_router(global);

    tracing::info!("HTTP listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[path = "web_tests.rs"]
mod web_tests;
