use axum::{
	http::StatusCode,
	routing::{get, post},
	Router,
};
use uuid::Uuid;

use crate::AppState;

pub mod model;
pub mod route;
pub mod store;

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/add-post", post(route::add_post))
		.route("/post/:id", get(route::view_post))
		.route("/edit-post/:id", get(route::edit_form).post(route::edit_post))
		// The server-rendered flow drives deletion from a plain link.
		.route("/delete-post/:id", get(route::delete_post))
}

/// Errors from the post repository.
///
/// `Forbidden` deliberately carries nothing but the post id; the response
/// must not leak any of the post's fields to a non-owner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	UnknownPost(Uuid),
	#[error("title already taken")]
	DuplicateTitle,
	#[error("not the owner of post {0}")]
	Forbidden(Uuid),
}

impl Error {
	#[must_use]
	pub fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) => StatusCode::NOT_FOUND,
			Self::DuplicateTitle => StatusCode::CONFLICT,
			Self::Forbidden(..) => StatusCode::FORBIDDEN,
		}
	}
}
