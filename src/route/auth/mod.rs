use axum::{
	http::StatusCode,
	routing::get,
	Router,
};

use crate::AppState;

pub mod model;
pub mod route;
pub mod store;

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/login", get(route::login_form).post(route::login))
		.route("/register", get(route::register_form).post(route::register))
		.route("/logout", get(route::logout))
}

/// An error that can occur during authentication.
///
/// Note that the messages are presented to the client, so they should not
/// contain sensitive information. In particular, `InvalidCredentials` does
/// not distinguish an unknown email from a wrong password.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid email or password")]
	InvalidCredentials,
	#[error("passwords do not match")]
	PasswordMismatch,
	#[error("email already taken")]
	DuplicateEmail,
}

impl Error {
	#[must_use]
	pub fn status(&self) -> StatusCode {
		match self {
			Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
			Self::PasswordMismatch => StatusCode::BAD_REQUEST,
			Self::DuplicateEmail => StatusCode::CONFLICT,
		}
	}
}
