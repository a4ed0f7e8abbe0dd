use askama::Template;
use axum::{
	http::{header, StatusCode},
	response::{IntoResponse, Response},
};

use crate::{
	route::{auth::model::User, post::model::Post},
	weather::Weather,
};

/// Wrapper to render askama templates as axum responses.
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
	fn into_response(self) -> Response {
		match self.0.render() {
			Ok(body) => (
				StatusCode::OK,
				[(header::CONTENT_TYPE, "text/html; charset=utf-8")],
				body,
			)
				.into_response(),
			Err(error) => {
				tracing::error!(%error, "template render error");
				(StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
			}
		}
	}
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
	pub user: User,
	pub posts: Vec<Post>,
	pub weather: Option<Weather>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
	pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
	pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
	pub post: Post,
	pub owned: bool,
}

#[derive(Template)]
#[template(path = "edit_post.html")]
pub struct EditPostTemplate {
	pub post: Post,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
	pub status: u16,
	pub message: String,
}

/// Renders the generic error page for an unrecovered failure. The body
/// carries the status code and its canonical reason, nothing else.
#[must_use]
pub fn error_page(status: StatusCode) -> Response {
	let message = status
		.canonical_reason()
		.unwrap_or("Something went wrong")
		.to_string();

	message_page(status, &message)
}

/// Renders a user-facing message on the error page.
#[must_use]
pub fn message_page(status: StatusCode, message: &str) -> Response {
	(
		status,
		Html(ErrorTemplate {
			status: status.as_u16(),
			message: message.to_string(),
		}),
	)
		.into_response()
}
