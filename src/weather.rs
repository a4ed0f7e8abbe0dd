use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

/// A weather snapshot shown on the home page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Weather {
	pub location: String,
	pub description: String,
	pub temperature_c: f64,
}

/// External weather source. The real fetch lives outside this crate;
/// anything that can produce a snapshot can back the cache.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
	async fn fetch(&self) -> Result<Weather, Box<dyn std::error::Error + Send + Sync>>;
}

/// Fixed snapshot provider, wired from config.
pub struct StaticWeather(pub Weather);

#[async_trait]
impl WeatherProvider for StaticWeather {
	async fn fetch(&self) -> Result<Weather, Box<dyn std::error::Error + Send + Sync>> {
		Ok(self.0.clone())
	}
}

struct Slot {
	value: Weather,
	fetched_at: DateTime<Utc>,
}

/// Time-windowed weather cache, refreshed lazily on read when the cached
/// snapshot is older than `max_age`. No background timer.
#[derive(Clone)]
pub struct WeatherCache {
	provider: Arc<dyn WeatherProvider>,
	max_age: Duration,
	slot: Arc<Mutex<Option<Slot>>>,
}

impl WeatherCache {
	#[must_use]
	pub fn new(provider: Arc<dyn WeatherProvider>, max_age: Duration) -> Self {
		Self {
			provider,
			max_age,
			slot: Arc::new(Mutex::new(None)),
		}
	}

	/// Returns the cached snapshot, refreshing it when stale. A failed
	/// refresh degrades to the stale value, or `None` when there is none.
	pub async fn get(&self) -> Option<Weather> {
		{
			let slot = self.slot.lock().await;

			if let Some(cached) = slot.as_ref() {
				if Utc::now() - cached.fetched_at < self.max_age {
					return Some(cached.value.clone());
				}
			}
		}

		// Fetch with the lock released so a slow provider never blocks
		// concurrent readers; overlapping stale reads may each refetch.
		match self.provider.fetch().await {
			Ok(value) => {
				*self.slot.lock().await = Some(Slot {
					value: value.clone(),
					fetched_at: Utc::now(),
				});
				Some(value)
			}
			Err(error) => {
				tracing::warn!(%error, "weather refresh failed");
				self.slot
					.lock()
					.await
					.as_ref()
					.map(|cached| cached.value.clone())
			}
		}
	}
}
