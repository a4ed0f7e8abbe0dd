use std::sync::Arc;

use argon2::Argon2;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

use inkpost::{
	config::Config,
	weather::{StaticWeather, Weather, WeatherCache},
	State,
};

/// Boots a fully migrated application state against a throwaway database.
/// The `TempDir` must stay alive for as long as the state is used.
pub async fn test_state() -> (TempDir, State) {
	let dir = TempDir::new().expect("failed to create temp dir");

	let options = SqliteConnectOptions::new()
		.filename(dir.path().join("test.db"))
		.create_if_missing(true);

	let database = SqlitePoolOptions::new()
		.max_connections(4)
		.connect_with(options)
		.await
		.expect("failed to open test database");

	sqlx::migrate!("./migrations")
		.run(&database)
		.await
		.expect("failed to run migrations");

	let config = Config {
		database_url: String::new(),
		bind_addr: ([127, 0, 0, 1], 0).into(),
		upload_dir: dir.path().join("uploads"),
		cookie_secure: false,
		weather_location: "Testville".to_string(),
	};

	let weather = WeatherCache::new(
		Arc::new(StaticWeather(Weather {
			location: "Testville".to_string(),
			description: "clear".to_string(),
			temperature_c: 20.0,
		})),
		chrono::Duration::minutes(10),
	);

	let state = State {
		database,
		hasher: Argon2::default(),
		config: Arc::new(config),
		weather,
	};

	(dir, state)
}
