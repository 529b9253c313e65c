//! Configuration types for gateway-client.

use std::env;
use std::time::Duration;

use crate::error::GatewayError;

/// Default planning service address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the planning service.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Base URL of the service (e.g., "http://localhost:8000").
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `WELLNESS_API_URL` - Service base URL (default: http://localhost:8000)
    /// - `WELLNESS_API_TIMEOUT_SECS` - Request timeout (default: 30)
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url =
            env::var("WELLNESS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match env::var("WELLNESS_API_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                GatewayError::Config(format!("WELLNESS_API_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(base_url).validated(timeout_secs)
    }

    /// Replace the base URL, applying the same checks as `from_env`.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let timeout_secs = self.timeout.as_secs();
        Self::new(base_url).validated(timeout_secs)
    }

    fn validated(self, timeout_secs: u64) -> Result<Self, GatewayError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(GatewayError::Config(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if timeout_secs == 0 {
            return Err(GatewayError::Config("timeout must be at least 1 second".to_string()));
        }
        Ok(self.with_timeout(Duration::from_secs(timeout_secs)))
    }

    pub fn register_url(&self) -> String {
        format!("{}/api/auth/register", self.base_url)
    }

    pub fn check_in_url(&self, user_id: i64) -> String {
        format!("{}/api/checkin/{}", self.base_url, user_id)
    }

    pub fn quiz_questions_url(&self) -> String {
        format!("{}/api/quiz/questions", self.base_url)
    }

    pub fn quiz_url(&self, user_id: i64) -> String {
        format!("{}/api/quiz/{}", self.base_url, user_id)
    }

    pub fn overview_url(&self, user_id: i64) -> String {
        format!("{}/api/dashboard/{}/overview", self.base_url, user_id)
    }

    pub fn trends_url(&self, user_id: i64, days: u32) -> String {
        format!("{}/api/dashboard/{}/trends?days={}", self.base_url, user_id, days)
    }

    pub fn top_items_url(&self, user_id: i64) -> String {
        format!("{}/api/dashboard/{}/top-items", self.base_url, user_id)
    }

    pub fn today_yoga_url(&self, user_id: i64) -> String {
        format!("{}/api/yoga/plans/{}/today", self.base_url, user_id)
    }

    pub fn today_nutrition_url(&self, user_id: i64) -> String {
        format!("{}/api/nutrition/plans/{}/today", self.base_url, user_id)
    }

    pub fn today_traces_url(&self, user_id: i64) -> String {
        format!("{}/api/trace/{}/today", self.base_url, user_id)
    }

    pub fn recent_traces_url(&self, user_id: i64, limit: u32) -> String {
        format!("{}/api/trace/{}/recent?limit={}", self.base_url, user_id, limit)
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chatbot/chat", self.base_url)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
