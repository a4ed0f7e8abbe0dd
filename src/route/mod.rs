pub mod auth;
pub mod home;
pub mod post;

use axum::{http::StatusCode, response::Response};

use crate::render;

/// Rendered 404 for unknown routes.
pub async fn not_found() -> Response {
	render::error_page(StatusCode::NOT_FOUND)
}
