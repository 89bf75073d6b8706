use axum::{Router, extract::State, response::Html, routing::get};

use crate::global::SharedGlobal;

use super::{
    error::PageError,
    htmx::Htmx,
    templates::{AboutTemplate, HomeTemplate, SITE_TITLE, format_number},
};

/// Years the band was on the road.
const TOURING_YEARS: std::ops::RangeInclusive<i32> = 1965..=1995;

pub fn create_pages_router() -> Router<SharedGlobal> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
}

pub async fn home(htmx: Htmx) -> Result<Html<String>, PageError> {
    htmx.render(
        SITE_TITLE,
        &HomeTemplate {
            years: TOURING_YEARS.collect(),
        },
    )
}

pub async fn about(State(global): State<SharedGlobal>, htmx: Htmx) -> Result<Html<String>, PageError> {
    let history = &global.history;
    let stats = vec![
        ("Shows", format_number(history.number_of_shows)),
        ("Sets", format_number(history.number_of_sets)),
        ("Distinct songs", format_number(history.number_of_distinct_songs)),
        ("Song performances", format_number(history.number_of_song_performances)),
        ("Venues", format_number(history.number_of_venues)),
        ("Cities", format_number(history.number_of_cities)),
        ("Countries", format_number(history.number_of_countries)),
    ];

    htmx.render("About", &AboutTemplate { stats })
}
