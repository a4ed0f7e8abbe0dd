#![warn(clippy::pedantic)]

use std::sync::Arc;

use argon2::Argon2;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use inkpost::{
	config::Config,
	weather::{StaticWeather, Weather, WeatherCache},
	State,
};

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let env_filter = std::env::var("RUST_LOG")
		.unwrap_or_else(|_| "inkpost=debug,tower_http=info".to_string());
	tracing_subscriber::fmt().with_env_filter(env_filter).init();

	let config = Config::from_env();

	let options = config
		.database_url
		.parse::<SqliteConnectOptions>()
		.expect("DATABASE_URL must be a sqlite url")
		.create_if_missing(true);

	let database = SqlitePoolOptions::new()
		.max_connections(8)
		.connect_with(options)
		.await
		.expect("failed to connect to database");

	sqlx::migrate!("./migrations")
		.run(&database)
		.await
		.expect("failed to run migrations");

	// The real weather fetch is an external collaborator; the binary wires
	// a fixed snapshot so the page renders without a network dependency.
	let weather = WeatherCache::new(
		Arc::new(StaticWeather(Weather {
			location: config.weather_location.clone(),
			description: "clear".to_string(),
			temperature_c: 21.0,
		})),
		chrono::Duration::minutes(10),
	);

	let addr = config.bind_addr;
	let state = State {
		database,
		hasher: Argon2::default(),
		config: Arc::new(config),
		weather,
	};

	let listener = tokio::net::TcpListener::bind(addr)
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on {}", addr);

	axum::serve(listener, inkpost::app(state)).await.unwrap();
}
