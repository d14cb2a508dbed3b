//! Application State
//!
//! Shared state accessible by all handlers, wrapped in `Arc`.

use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::plans::PriceIds;

/// Shared application state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Backend base URL handed to the frontend via `/config.json`
    pub api_url: String,
    /// Checkout price ids, also handed to the frontend
    pub price_ids: PriceIds,
    /// Built frontend directory
    pub static_dir: PathBuf,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(api_url: impl Into<String>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url: api_url.into(),
            price_ids: PriceIds::default(),
            static_dir: static_dir.into(),
            start_time: Instant::now(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api.base_url.clone(), &config.server.static_dir)
            .with_price_ids(config.plans.clone())
    }

    pub fn with_price_ids(mut self, price_ids: PriceIds) -> Self {
        self.price_ids = price_ids;
        self
    }

    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }

    /// The frontend has been built into `static_dir`
    pub fn frontend_present(&self) -> bool {
        self.index_file().is_file()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
