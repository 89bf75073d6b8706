use askama::Template;
use setlist_pagination::PaginationDescriptor;

use crate::database::models::{
    show::{Show, ShowDetail},
    song::SongSummary,
    venue::VenueSummary,
};

pub const SITE_TITLE: &str = "Grateful Dead Setlists";

/// Full HTML document around a rendered fragment.
#[derive(Template)]
#[template(path = "layout.html")]
pub struct LayoutTemplate<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Fragment returned to HTMX requests; the title, when present, is picked
/// up by HTMX as the new document title.
#[derive(Template)]
#[template(path = "partial.html")]
pub struct PartialTemplate<'a> {
    pub title: Option<&'a str>,
    pub body: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub error: &'a str,
    pub message: &'a str,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub years: Vec<i32>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub stats: Vec<(&'static str, String)>,
}

#[derive(Template)]
#[template(path = "show.html")]
pub struct ShowTemplate<'a> {
    pub title: &'a str,
    pub detail: &'a ShowDetail,
}

#[derive(Template)]
#[template(path = "shows.html")]
pub struct ShowsTemplate<'a> {
    pub title: &'a str,
    pub shows: &'a [Show],
    pub pagination: &'a PaginationDescriptor,
}

#[derive(Template)]
#[template(path = "songs.html")]
pub struct SongsTemplate<'a> {
    pub title: &'a str,
    pub songs: &'a [SongSummary],
    pub pagination: &'a PaginationDescriptor,
}

#[derive(Template)]
#[template(path = "song_table.html")]
pub struct SongTableTemplate<'a> {
    pub songs: &'a [SongSummary],
}

#[derive(Template)]
#[template(path = "venues.html")]
pub struct VenuesTemplate<'a> {
    pub title: &'a str,
    pub venues: &'a [VenueSummary],
    pub pagination: &'a PaginationDescriptor,
}

/// Render `page` and wrap it: a bare fragment when `partial`, the full layout
/// otherwise.
pub fn wrap_page<T: Template>(partial: bool, title: Option<&str>, page: &T) -> askama::Result<String> {
    let body = page.render()?;
    if partial {
        PartialTemplate { title, body: &body }.render()
    } else {
        LayoutTemplate {
            title: title.unwrap_or(SITE_TITLE),
            body: &body,
        }
        .render()
    }
}

/// Formats `n` with comma thousands separators, e.g. 1234567 -> "1,234,567".
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
