use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::templates::{ErrorTemplate, wrap_page};

/// An error rendered as an HTML page. HTMX requests get the fragment only.
#[derive(Debug, Clone, Default)]
pub struct PageError {
    pub status_code: StatusCode,
    pub error: Cow<'static, str>,
    pub message: Cow<'static, str>,
    partial: bool,
}

impl PageError {
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            error: Cow::Borrowed("not_found"),
            message: message.into(),
            partial: false,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            error: Cow::Borrowed("bad_request"),
            message: message.into(),
            partial: false,
        }
    }

    pub fn server_error() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error: Cow::Borrowed("server_error"),
            message: Cow::Borrowed("Something went wrong."),
            partial: false,
        }
    }

    pub fn partial(self, partial: bool) -> Self {
        Self { partial, ..self }
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn title(&self) -> &'static str {
        self.status_code.canonical_reason().unwrap_or("Error")
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status_code;
        let page = ErrorTemplate {
            error: &self.error,
            message: &self.message,
        };

        match wrap_page(self.is_partial(), Some(self.title()), &page) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, self.message.into_owned()).into_response()
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
