use axum::{
    Router,
    extract::{Path, RawQuery, State},
    response::Html,
    routing::get,
};
use chrono::NaiveDate;
use setlist_pagination::{PageRequest, encode_path};

use crate::{
    database::models::show::{Show, ShowDetail},
    global::SharedGlobal,
};

use super::{
    error::PageError,
    htmx::Htmx,
    templates::{ShowTemplate, ShowsTemplate, format_number},
    window::{Window, fetch_window, filters},
};

pub fn create_shows_router() -> Router<SharedGlobal> {
    Router::new()
        .route("/show/{year}/{month}/{day}", get(show_on_date))
        .route("/song/{song}", get(shows_with_song))
        .route("/venue/{city}/{venue}", get(shows_at_venue))
        .route("/city/{state}/{city}", get(shows_in_city))
        .route("/state/{state}", get(shows_in_state))
        .route("/country/{country}", get(shows_in_country))
        .route("/year/{year}", get(shows_in_year))
}

fn render_shows(htmx: Htmx, title: &str, window: &Window<Show>) -> Result<Html<String>, PageError> {
    htmx.render(
        title,
        &ShowsTemplate {
            title,
            shows: &window.rows,
            pagination: &window.pagination,
        },
    )
}

pub async fn show_on_date(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    Path((year, month, day)): Path<(String, String, String)>,
) -> Result<Html<String>, PageError> {
    let requested = format!("{year}-{month:0>2}-{day:0>2}");

    let date = NaiveDate::parse_from_str(&requested, "%Y-%m-%d")
        .map_err(|e| htmx.error(PageError::bad_request(format!("Show Not Found: {requested} [{e}]"))))?;

    let Some(detail) = ShowDetail::on_date(&global.database, date)
        .await
        .map_err(|e| htmx.query_failed(e))?
    else {
        return Err(htmx.error(PageError::not_found(format!("Show Not Found: {requested}"))));
    };

    let title = format!("Show - {}", detail.show.display_date());
    htmx.render(
        &title,
        &ShowTemplate {
            title: &title,
            detail: &detail,
        },
    )
}

pub async fn shows_with_song(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    Path(song): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let request = PageRequest::from_query_string(query.as_deref());
    let database = &global.database;

    let window = fetch_window(
        &global.config.pagination,
        &request,
        encode_path(["song", song.as_str()]),
        filters([("song", song.as_str())]),
        |limit, offset| Show::with_song(database, &song, limit, offset),
    )
    .await
    .map_err(|e| htmx.query_failed(e))?;

    if window.total_count == 0 {
        return Err(htmx.error(PageError::not_found(format!("No Shows Found With Song: {song}"))));
    }

    let title = format!("{song} Was Played At {} Shows", window.total_count);
    render_shows(htmx, &title, &window)
}

pub async fn shows_at_venue(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    Path((city, venue)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let request = PageRequest::from_query_string(query.as_deref());
    let database = &global.database;

    let window = fetch_window(
        &global.config.pagination,
        &request,
        encode_path(["venue", city.as_str(), venue.as_str()]),
        filters([("venue", venue.as_str()), ("city", city.as_str())]),
        |limit, offset| Show::at_venue(database, &venue, &city, limit, offset),
    )
    .await
    .map_err(|e| htmx.query_failed(e))?;

    if window.total_count == 0 {
        return Err(htmx.error(PageError::not_found(format!("No Shows Found At {venue} In {city}"))));
    }

    let title = format!("{} shows at {venue} in {city}", window.total_count);
    render_shows(htmx, &title, &window)
}

pub async fn shows_in_city(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    Path((state, city)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let request = PageRequest::from_query_string(query.as_deref());
    let database = &global.database;

    let window = fetch_window(
        &global.config.pagination,
        &request,
        encode_path(["city", state.as_str(), city.as_str()]),
        filters([("city", city.as_str())]),
        |limit, offset| Show::in_city(database, &city, &state, limit, offset),
    )
    .await
    .map_err(|e| htmx.query_failed(e))?;

    if window.total_count == 0 {
        return Err(htmx.error(PageError::not_found(format!("No Shows Found In {city} {state}"))));
    }

    let title = format!("{} Shows In {city}", window.total_count);
    render_shows(htmx, &title, &window)
}

pub async fn shows_in_state(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    Path(state): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let request = PageRequest::from_query_string(query.as_deref());
    let database = &global.database;

    let window = fetch_window(
        &global.config.pagination,
        &request,
        encode_path(["state", state.as_str()]),
        filters([("state", state.as_str())]),
        |limit, offset| Show::in_state(database, &state, limit, offset),
    )
    .await
    .map_err(|e| htmx.query_failed(e))?;

    let title = format!("{} Shows In {state}", window.total_count);
    render_shows(htmx, &title, &window)
}

pub async fn shows_in_country(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    Path(country): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let request = PageRequest::from_query_string(query.as_deref());
    let database = &global.database;

    let window = fetch_window(
        &global.config.pagination,
        &request,
        encode_path(["country", country.as_str()]),
        filters([("country", country.as_str())]),
        |limit, offset| Show::in_country(database, &country, limit, offset),
    )
    .await
    .map_err(|e| htmx.query_failed(e))?;

    let title = format!("{} Shows In {country}", format_number(window.total_count));
    render_shows(htmx, &title, &window)
}

pub async fn shows_in_year(
    State(global): State<SharedGlobal>,
    htmx: Htmx,
    Path(year): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, PageError> {
    let request = PageRequest::from_query_string(query.as_deref());
    let database = &global.database;

    let window = fetch_window(
        &global.config.pagination,
        &request,
        encode_path(["year", year.as_str()]),
        filters([("year", year.as_str())]),
        |limit, offset| Show::in_year(database, &year, limit, offset),
    )
    .await
    .map_err(|e| htmx.query_failed(e))?;

    let title = format!("There Were {} Shows In {year}", window.total_count);
    render_shows(htmx, &title, &window)
}
