//! In-Memory Admission Store
//!
//! Per-client sliding-window state in a sharded concurrent map. Entry
//! mutation happens under the owning shard's lock only, so two identities
//! never serialize on one another and no check blocks on I/O.
//!
//! State is process-scoped: constructed once at service start, gone at
//! shutdown. Persistence across restarts is explicitly out of scope.

use std::net::IpAddr;

use dashmap::DashMap;

use crate::application::config::GateConfig;
use crate::domain::window::{AdmissionDecision, RequestWindow};

/// Bounded in-memory admission store
///
/// The identity map never grows past `max_tracked_clients` (give or take
/// concurrent insertions): when a new identity arrives at capacity, idle
/// identities are swept first, and if every tracked identity is still
/// active, the longest-idle one is evicted.
pub struct InMemoryAdmissionStore {
    clients: DashMap<IpAddr, RequestWindow>,
    config: GateConfig,
}

impl InMemoryAdmissionStore {
    pub fn new(config: GateConfig) -> Self {
        Self {
            clients: DashMap::new(),
            config,
        }
    }

    /// Decide admission for `client` at `now_ms`
    pub fn check(&self, client: IpAddr, now_ms: i64) -> AdmissionDecision {
        if !self.clients.contains_key(&client) {
            self.make_room(now_ms);
        }

        let mut window = self.clients.entry(client).or_default();
        let decision = window.admit(now_ms, &self.config);

        if decision != AdmissionDecision::Allowed {
            tracing::warn!(
                client = %client,
                reason = ?decision,
                "Request rejected by admission control"
            );
        }

        decision
    }

    /// Number of currently tracked client identities
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    /// Drop idle identities; at capacity, also evict the longest-idle one
    fn make_room(&self, now_ms: i64) {
        if self.clients.len() < self.config.max_tracked_clients {
            return;
        }

        self.clients
            .retain(|_, window| !window.is_idle_at(now_ms, &self.config));

        if self.clients.len() < self.config.max_tracked_clients {
            return;
        }

        // Every tracked identity is active inside the window. Evict the one
        // least recently seen so the map stays bounded even under churn from
        // many distinct clients.
        let oldest = self
            .clients
            .iter()
            .min_by_key(|entry| entry.value().last_seen_ms().unwrap_or(i64::MIN))
            .map(|entry| *entry.key());

        if let Some(key) = oldest {
            self.clients.remove(&key);
            tracing::debug!(client = %key, "Evicted admission record at capacity");
        }
    }
}
