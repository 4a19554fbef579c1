use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3001/v1/users";
const DEFAULT_ALERT_DURATION_MS: u64 = 3000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
  /// Root of the user collection, without a trailing slash.
  pub api_base_url: String,
  pub alert_duration_ms: u64,
}

impl Config {
  pub fn alert_duration(&self) -> Duration {
    Duration::from_millis(self.alert_duration_ms)
  }
}

impl Default for Config {
  fn default() -> Self {
    let api_base_url = env::var("API_BASE_URL")
      .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
      .trim_end_matches('/')
      .to_string();
    let alert_duration_ms = env::var("ALERT_DURATION_MS")
      .ok()
      .and_then(|value| value.parse().ok())
      .unwrap_or(DEFAULT_ALERT_DURATION_MS);
    Self {
      api_base_url,
      alert_duration_ms,
    }
  }
}
