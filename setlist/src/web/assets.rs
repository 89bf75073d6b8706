use axum::{
    Router,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use rust_embed::RustEmbed;

use crate::global::SharedGlobal;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

pub fn create_assets_router() -> Router<SharedGlobal> {
    Router::new().route("/static/{*path}", get(static_asset))
}

pub async fn static_asset(Path(path): Path<String>) -> Response {
    match Assets::get(&path) {
        Some(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref().to_string())], file.data).into_response()
        }
        None => {
            tracing::debug!("Static asset not found: {}", path);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
