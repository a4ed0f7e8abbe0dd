use axum::{
	extract::State,
	response::{IntoResponse, Response},
	routing::get,
	Router,
};

use crate::{
	extract::Session,
	render::{Html, IndexTemplate},
	route::post::store,
	AppState,
};

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/", get(index))
		.route("/health", get(health))
}

/// Home page: every post, newest first, plus the weather snippet.
async fn index(
	State(state): State<AppState>,
	session: Session,
) -> Result<Response, crate::Error> {
	let posts = store::list(&state.database).await?;
	let weather = state.weather.get().await;

	Ok(Html(IndexTemplate {
		user: session.user,
		posts,
		weather,
	})
	.into_response())
}

async fn health() -> &'static str {
	"ok"
}
