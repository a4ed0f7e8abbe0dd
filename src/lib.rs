#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod extract;
pub mod gate;
pub mod password;
pub mod render;
pub mod route;
pub mod session;
pub mod upload;
pub mod weather;

use std::sync::Arc;

use argon2::Argon2;
use axum::{middleware, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use error::Error;

pub type Database = sqlx::Pool<sqlx::Sqlite>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as the database connection pool, the hash configuration and the
/// weather cache.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
	pub config: Arc<config::Config>,
	pub weather: weather::WeatherCache,
}

/// Builds the application router.
///
/// Every page route sits behind the access gate; uploads are served as plain
/// files since the image references in posts point there.
pub fn app(state: State) -> Router {
	let upload_dir = state.config.upload_dir.clone();

	Router::new()
		.merge(route::home::routes())
		.merge(route::auth::routes())
		.merge(route::post::routes())
		.nest_service("/uploads", ServeDir::new(upload_dir))
		.fallback(route::not_found)
		.layer(middleware::from_fn_with_state(
			state.clone(),
			gate::access_gate,
		))
		.layer(
			TraceLayer::new_for_http()
				.make_span_with(|req: &axum::http::Request<_>| {
					let method = req.method().clone();
					let uri = req.uri().clone();
					tracing::info_span!("http_request", %method, uri = %uri)
				})
				.on_response(
					|res: &axum::http::Response<_>,
					 _latency: std::time::Duration,
					 _span: &tracing::Span| {
						let status = res.status();
						if status.is_server_error() {
							tracing::error!(%status, "response");
						} else {
							tracing::debug!(%status, "response");
						}
					},
				),
		)
		.with_state(state)
}
