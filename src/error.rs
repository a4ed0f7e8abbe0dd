use axum::{
	body::Body,
	http::{Response, StatusCode},
	response::IntoResponse,
};

use crate::{password::HashError, render, route};

/// Error type for the application.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("auth error: {0}")]
	Auth(#[from] route::auth::Error),
	#[error("post error: {0}")]
	Post(#[from] route::post::Error),
	#[error("hash error: {0}")]
	Hash(#[from] HashError),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("multipart error: {0}")]
	Multipart(#[from] axum::extract::multipart::MultipartError),
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	#[must_use]
	pub fn status(&self) -> StatusCode {
		match self {
			Self::Auth(error) => error.status(),
			Self::Post(error) => error.status(),
			Self::Multipart(..) => StatusCode::BAD_REQUEST,
			Self::Hash(..) | Self::Database(..) | Self::Io(..) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl IntoResponse for Error {
	/// Renders the generic error page. Full detail stays in the server log;
	/// the client only ever sees the status code and a canned message.
	fn into_response(self) -> Response<Body> {
		let status = self.status();

		if status.is_server_error() {
			tracing::error!(error = %self, "request failed");
		} else {
			tracing::debug!(error = %self, "request rejected");
		}

		render::error_page(status)
	}
}
