//! Session-scoped, single-read values carried across a redirect.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Duration, Utc};

use crate::session::SessionId;

pub const MESSAGE_KEY: &str = "message";

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TempDataStore {
    entries: Arc<Mutex<HashMap<(SessionId, String), Entry>>>,
    ttl: Duration,
}

impl TempDataStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Stores `value` under `key` for this session, replacing any unread value.
    pub fn put(&self, session: SessionId, key: &str, value: impl Into<String>) {
        self.put_at(session, key, value.into(), Utc::now());
    }

    /// Returns the value and clears it. A second call yields `None`.
    pub fn take(&self, session: SessionId, key: &str) -> Option<String> {
        self.take_at(session, key, Utc::now())
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    fn put_at(&self, session: SessionId, key: &str, value: String, now: DateTime<Utc>) {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert((session, key.to_string()), Entry { value, expires_at });
    }

    fn take_at(&self, session: SessionId, key: &str, now: DateTime<Utc>) -> Option<String> {
        let entry = self.lock().remove(&(session, key.to_string()))?;
        (entry.expires_at > now).then_some(entry.value)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(SessionId, String), Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "tests/temp_data_tests.rs"]
mod tests;
