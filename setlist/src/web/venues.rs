use axum::{
    Router,
    extract::{RawQuery, State},
    response::Html,
    routing::get,
};
use setlist_pagination::PageRequest;

use crate::{database::models::venue::VenueSummary, global::SharedGlobal};

use super::{
    error::PageError,
    htmx::Htmx,
    templates::VenuesTemplate,
    window::{fetch_window, filters},
};

pub fn create_venues_router() -> Router<SharedGlobal> {
    Router::new().route("/venues", get(venues))
}

pub async fn venues(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let request = PageRequest::from_query_string(query.as_deref());
    let database = &global.database;

    let window = fetch_window(
        &global.config.pagination,
        &request,
        "/venues".to_string(),
        filters([]),
        |limit, offset| VenueSummary::list(database, limit, offset),
    )
    .await
    .map_err(|e| htmx.query_failed(e))?;

    let title = format!("{} Venues", window.total_count);
    htmx.render(
        &title,
        &VenuesTemplate {
            title: &title,
            venues: &window.rows,
            pagination: &window.pagination,
        },
    )
}
