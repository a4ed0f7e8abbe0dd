use std::{net::SocketAddr, path::PathBuf};

/// Environment-driven configuration, read once at startup after `dotenvy`
/// has populated the process environment.
#[derive(Debug, Clone)]
pub struct Config {
	pub database_url: String,
	pub bind_addr: SocketAddr,
	pub upload_dir: PathBuf,
	pub cookie_secure: bool,
	pub weather_location: String,
}

impl Config {
	/// Reads the configuration from the environment, falling back to
	/// development defaults for everything but a malformed `PORT`.
	///
	/// # Panics
	///
	/// Panics if `PORT` is set but not a number.
	#[must_use]
	pub fn from_env() -> Self {
		let port = std::env::var("PORT").map_or_else(
			|_| 3000,
			|port| port.parse().expect("PORT must be a number"),
		);

		Self {
			database_url: std::env::var("DATABASE_URL")
				.unwrap_or_else(|_| "sqlite:inkpost.db".to_string()),
			bind_addr: SocketAddr::from(([127, 0, 0, 1], port)),
			upload_dir: std::env::var("UPLOAD_DIR")
				.map_or_else(|_| PathBuf::from("uploads"), PathBuf::from),
			cookie_secure: std::env::var("COOKIE_SECURE").is_ok_and(|v| v == "true"),
			weather_location: std::env::var("WEATHER_LOCATION")
				.unwrap_or_else(|_| "Sofia".to_string()),
		}
	}
}
