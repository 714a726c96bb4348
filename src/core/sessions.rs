//! Conversation state for the discovery chat, keyed by a caller-supplied id.
//!
//! Entries expire `ttl` after their last write. Expired entries are never
//! returned by [`SessionCache::get`], and [`SessionCache::spawn_sweeper`]
//! removes them on a fixed interval so the map stays bounded.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
struct Entry {
    state: serde_json::Value,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct SessionCache {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, id: &str) -> Option<serde_json::Value> {
        self.get_at(id, Instant::now())
    }

    pub fn put(&self, id: &str, state: serde_json::Value) {
        self.put_at(id, state, Instant::now());
    }

    /// Returns whether a live entry was present.
    pub fn evict(&self, id: &str) -> bool {
        let now = Instant::now();
        self.write()
            .remove(id)
            .is_some_and(|entry| entry.expires_at > now)
    }

    /// Removes expired entries and returns how many were dropped.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs [`SessionCache::sweep_expired`] every `interval` until the
    /// returned handle is aborted.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let cache = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let removed = cache.sweep_expired();
                if removed > 0 {
                    tracing::debug!("Swept {} expired sessions", removed);
                }
            }
        })
    }

    fn get_at(&self, id: &str, now: Instant) -> Option<serde_json::Value> {
        self.read()
            .get(id)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.state.clone())
    }

    fn put_at(&self, id: &str, state: serde_json::Value, now: Instant) {
        let entry = Entry {
            state,
            expires_at: now + self.ttl,
        };
        self.write().insert(id.to_string(), entry);
    }

    fn sweep_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    // The map holds plain data, so a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
