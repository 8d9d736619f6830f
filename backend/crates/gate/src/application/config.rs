//! Application Configuration
//!
//! Configuration for the request gate. Fixed at process start, not
//! hot-reloadable.

use std::time::Duration;

/// Request gate configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Maximum admitted requests per client within [`Self::window`]
    pub requests_per_minute: u32,
    /// Sliding window for the per-minute cap
    pub window: Duration,
    /// Maximum admitted requests per client within [`Self::burst_window`]
    pub burst_limit: u32,
    /// Short window for the burst cap
    pub burst_window: Duration,
    /// Maximum declared request body size in bytes
    pub max_body_bytes: u64,
    /// Upper bound on distinct client identities tracked at once
    pub max_tracked_clients: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 100,
            window: Duration::from_secs(60),
            burst_limit: 50,
            burst_window: Duration::from_secs(10),
            max_body_bytes: 1_048_576, // 1 MiB
            max_tracked_clients: 10_000,
        }
    }
}

impl GateConfig {
    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }

    pub fn burst_window_ms(&self) -> i64 {
        self.burst_window.as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GateConfig::default();

        assert_eq!(config.requests_per_minute, 100);
        assert_eq!(config.window, Duration::from_secs(60));
        assert_eq!(config.burst_limit, 50);
        assert_eq!(config.burst_window, Duration::from_secs(10));
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert_eq!(config.max_tracked_clients, 10_000);
    }

    #[test]
    fn test_window_ms_helpers() {
        let config = GateConfig::default();
        assert_eq!(config.window_ms(), 60_000);
        assert_eq!(config.burst_window_ms(), 10_000);
    }
}
