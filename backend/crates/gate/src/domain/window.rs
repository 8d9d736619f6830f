//! Request Window
//!
//! Per-client sliding-window state and the admission decision over it.
//! Everything here is a pure function of the stored timestamps and a
//! caller-supplied `now`, which keeps the policy deterministic and testable.

use std::collections::VecDeque;

use crate::application::config::GateConfig;

/// Outcome of an admission check
///
/// The two rejection reasons share an HTTP status but stay distinguishable
/// for observability and in the problem payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Request admitted and recorded
    Allowed,
    /// Sliding-window cap reached; attempt not recorded
    RateLimited,
    /// Burst cap reached; attempt not recorded
    BurstLimited,
}

/// Ordered history of a single client's admitted requests
///
/// Timestamps are Unix milliseconds, oldest first. Only admitted requests
/// are recorded; rejected attempts must not extend the window.
#[derive(Debug, Clone, Default)]
pub struct RequestWindow {
    timestamps: VecDeque<i64>,
}

impl RequestWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide admission for a request arriving at `now_ms`
    ///
    /// 1. Prune entries older than the sliding window.
    /// 2. Reject with [`AdmissionDecision::RateLimited`] if the remaining
    ///    count has reached the per-window cap.
    /// 3. Reject with [`AdmissionDecision::BurstLimited`] if the count
    ///    inside the burst window has reached the burst cap.
    /// 4. Otherwise record `now_ms` and admit.
    pub fn admit(&mut self, now_ms: i64, config: &GateConfig) -> AdmissionDecision {
        let window_start = now_ms - config.window_ms();
        while let Some(&front) = self.timestamps.front() {
            if front <= window_start {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }

        if self.timestamps.len() >= config.requests_per_minute as usize {
            return AdmissionDecision::RateLimited;
        }

        let burst_start = now_ms - config.burst_window_ms();
        let recent = self
            .timestamps
            .iter()
            .rev()
            .take_while(|&&ts| ts > burst_start)
            .count();
        if recent >= config.burst_limit as usize {
            return AdmissionDecision::BurstLimited;
        }

        self.timestamps.push_back(now_ms);
        AdmissionDecision::Allowed
    }

    /// Number of recorded requests (including ones an `admit` call has not
    /// pruned yet)
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamp of the most recently admitted request
    pub fn last_seen_ms(&self) -> Option<i64> {
        self.timestamps.back().copied()
    }

    /// Whether this client has been idle past the sliding window
    pub fn is_idle_at(&self, now_ms: i64, config: &GateConfig) -> bool {
        match self.last_seen_ms() {
            Some(last) => now_ms - last > config.window_ms(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GateConfig {
        GateConfig::default()
    }

    #[test]
    fn admits_until_minute_cap() {
        let cfg = config();
        let mut window = RequestWindow::new();
        let t0 = 1_000_000;

        // Spread requests so the burst cap never trips: one every 600ms
        // fills 100 requests across the 60s window
        for i in 0..cfg.requests_per_minute {
            let decision = window.admit(t0 + (i as i64) * 600, &cfg);
            assert_eq!(decision, AdmissionDecision::Allowed);
        }

        // Request 101 within the trailing minute is rejected with the
        // rate reason (the 100th admit happened at t0 + 59_400)
        let last = t0 + 59_700;
        assert_eq!(window.admit(last, &cfg), AdmissionDecision::RateLimited);
    }

    #[test]
    fn burst_cap_trips_before_minute_cap() {
        let cfg = config();
        let mut window = RequestWindow::new();
        let t0 = 1_000_000;

        // 50 requests inside 5 seconds, far under the 100/minute cap
        for i in 0..cfg.burst_limit {
            let decision = window.admit(t0 + (i as i64) * 100, &cfg);
            assert_eq!(decision, AdmissionDecision::Allowed);
        }

        // Request 51 inside the 10-second burst window: burst reason
        let decision = window.admit(t0 + 6_000, &cfg);
        assert_eq!(decision, AdmissionDecision::BurstLimited);
    }

    #[test]
    fn burst_clears_once_outside_short_window() {
        let cfg = config();
        let mut window = RequestWindow::new();
        let t0 = 1_000_000;

        for i in 0..cfg.burst_limit {
            window.admit(t0 + (i as i64) * 100, &cfg);
        }
        assert_eq!(window.admit(t0 + 6_000, &cfg), AdmissionDecision::BurstLimited);

        // Same client, 11 seconds after the burst started: the burst window
        // has moved on even though all 50 remain inside the minute window
        let decision = window.admit(t0 + cfg.burst_window_ms() + 5_000, &cfg);
        assert_eq!(decision, AdmissionDecision::Allowed);
    }

    #[test]
    fn rejected_attempts_are_not_recorded() {
        let cfg = config();
        let mut window = RequestWindow::new();
        let t0 = 1_000_000;

        for i in 0..cfg.burst_limit {
            window.admit(t0 + (i as i64) * 100, &cfg);
        }
        let before = window.len();

        // Hammering a rejected client must not extend its own window
        for i in 0..10 {
            let decision = window.admit(t0 + 6_000 + i, &cfg);
            assert_eq!(decision, AdmissionDecision::BurstLimited);
        }
        assert_eq!(window.len(), before);
    }

    #[test]
    fn window_prunes_old_entries() {
        let cfg = config();
        let mut window = RequestWindow::new();
        let t0 = 1_000_000;

        for i in 0..cfg.requests_per_minute {
            window.admit(t0 + (i as i64) * 600, &cfg);
        }

        // One sliding window later everything has aged out
        let later = t0 + 2 * cfg.window_ms();
        assert_eq!(window.admit(later, &cfg), AdmissionDecision::Allowed);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn idle_detection_follows_last_seen() {
        let cfg = config();
        let mut window = RequestWindow::new();

        assert!(window.is_idle_at(1_000_000, &cfg));

        window.admit(1_000_000, &cfg);
        assert!(!window.is_idle_at(1_000_000 + cfg.window_ms(), &cfg));
        assert!(window.is_idle_at(1_000_000 + cfg.window_ms() + 1, &cfg));
        assert_eq!(window.last_seen_ms(), Some(1_000_000));
    }
}
