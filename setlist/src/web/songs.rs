use axum::{
    Form, Router,
    extract::{RawQuery, State},
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use setlist_pagination::PageRequest;

use crate::{database::models::song::SongSummary, global::SharedGlobal};

use super::{
    error::PageError,
    htmx::Htmx,
    templates::{SongTableTemplate, SongsTemplate},
    window::{fetch_window, filters},
};

pub fn create_songs_router() -> Router<SharedGlobal> {
    Router::new()
        .route("/songs", get(songs))
        .route("/search", post(search))
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchForm {
    #[serde(rename = "songTitle", default)]
    song_title: String,
}

pub async fn songs(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let request = PageRequest::from_query_string(query.as_deref());
    let database = &global.database;

    let window = fetch_window(
        &global.config.pagination,
        &request,
        "/songs".to_string(),
        filters([]),
        |limit, offset| SongSummary::list(database, limit, offset),
    )
    .await
    .map_err(|e| htmx.query_failed(e))?;

    let title = format!("{} Songs", window.total_count);
    htmx.render(
        &title,
        &SongsTemplate {
            title: &title,
            songs: &window.rows,
            pagination: &window.pagination,
        },
    )
}

/// Song titles containing the submitted text, as a bare table for the search
/// box on the home page.
pub async fn search(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let songs = SongSummary::search(&global.database, &form.song_title)
        .await
        .map_err(|e| htmx.query_failed(e))?;

    tracing::debug!(query = %form.song_title, matches = songs.len(), "Song search");

    htmx.render_fragment(&SongTableTemplate { songs: &songs })
}
