use std::convert::Infallible;

use askama::Template;
use axum::{extract::FromRequestParts, http::request::Parts, response::Html};

use super::{error::PageError, templates::wrap_page};

pub const HX_REQUEST: &str = "hx-request";

/// Whether the request came from HTMX, which only wants the page fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Htmx {
    partial: bool,
}

impl Htmx {
    /// Render a page, setting `title` as the document title.
    pub fn render<T: Template>(&self, title: &str, page: &T) -> Result<Html<String>, PageError> {
        self.render_with(Some(title), page)
    }

    /// Render a fragment that replaces part of a page and leaves the document
    /// title alone. Full-page requests still get a complete document.
    pub fn render_fragment<T: Template>(&self, page: &T) -> Result<Html<String>, PageError> {
        self.render_with(None, page)
    }

    fn render_with<T: Template>(&self, title: Option<&str>, page: &T) -> Result<Html<String>, PageError> {
        wrap_page(self.partial, title, page).map(Html).map_err(|e| {
            tracing::error!("Failed to render page: {}", e);
            PageError::server_error().partial(self.partial)
        })
    }

    pub fn error(&self, error: PageError) -> PageError {
        error.partial(self.partial)
    }

    pub fn query_failed(&self, error: anyhow::Error) -> PageError {
        tracing::error!("Archive query failed: {:#}", error);
        PageError::server_error().partial(self.partial)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Htmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            partial: parts.headers.contains_key(HX_REQUEST),
        })
    }
}
