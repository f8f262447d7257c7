//! In-memory session store with inactivity expiry
//!
//! Entries are created on first contact, touched on every write and dropped
//! once they have been idle for longer than the TTL. Expiry is lazy on
//! read, with `cleanup_expired` for the periodic sweep.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

struct Entry<T> {
    value: T,
    touched: Instant,
}

/// Thread-safe session map keyed by session id
pub struct SessionStore<T> {
    entries: Arc<DashMap<String, Entry<T>>>,
    ttl: Duration,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<T: Clone> SessionStore<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Get a session value, or `None` when missing or expired
    pub fn get(&self, session_id: &str) -> Option<T> {
        let entry = self.entries.get(session_id)?;
        if entry.touched.elapsed() > self.ttl {
            drop(entry);
            self.entries.remove(session_id);
            debug!("Session {} expired", session_id);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Insert or replace a session value and reset its idle timer
    pub fn set(&self, session_id: impl Into<String>, value: T) {
        self.entries.insert(
            session_id.into(),
            Entry {
                value,
                touched: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every idle session, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.touched.elapsed() <= ttl);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            info!("Cleaned up {} expired sessions", removed);
        }
        removed
    }
}
