use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Duration, Utc};

use crate::error::TeamError;
use crate::utils::otp::generate_otp;

pub struct Cache<T> {
    data: Arc<Mutex<HashMap<String, T>>>,
}

impl<T> Clone for Cache<T> {
    fn clone(&self) -> Self {
        Cache {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Cache<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn get_connection(&self) -> MutexGuard<'_, HashMap<String, T>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_data(&self, id: &str, data: T) {
        let mut conn = self.get_connection();
        conn.insert(id.to_owned(), data);
    }

    /// Runs `op` with the map locked, for read-modify-write sequences that
    /// must not interleave with other callers.
    pub fn with_data<F, O>(&self, op: F) -> O
    where
        F: FnOnce(&mut HashMap<String, T>) -> O,
    {
        let mut conn = self.get_connection();
        op(&mut *conn)
    }

    pub fn retain<F>(&self, keep: F) -> usize
    where
        F: FnMut(&String, &mut T) -> bool,
    {
        let mut conn = self.get_connection();
        let before = conn.len();
        conn.retain(keep);
        before - conn.len()
    }

    pub fn count(&self) -> usize {
        self.get_connection().len()
    }
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct OtpRecord {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// One-time codes keyed by email or team id, each valid for `ttl`.
#[derive(Clone)]
pub struct OtpStore {
    records: Cache<OtpRecord>,
    ttl: Duration,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: Cache::new(),
            ttl,
        }
    }

    /// Issues a fresh code for `key`, replacing any outstanding one.
    pub fn issue(&self, key: &str) -> String {
        self.issue_at(key, Utc::now())
    }

    pub fn issue_at(&self, key: &str, now: DateTime<Utc>) -> String {
        let code = generate_otp();
        self.records.set_data(
            key,
            OtpRecord {
                code: code.clone(),
                expires_at: now + self.ttl,
            },
        );
        code
    }

    /// Consumes the code for `key` when it matches. A wrong code leaves the
    /// record in place; an expired one is dropped.
    pub fn verify(&self, key: &str, code: &str) -> Result<(), TeamError> {
        self.verify_at(key, code, Utc::now())
    }

    pub fn verify_at(&self, key: &str, code: &str, now: DateTime<Utc>) -> Result<(), TeamError> {
        self.records.with_data(|records| {
            let record = records.get(key).ok_or(TeamError::OtpMissing)?;
            if now > record.expires_at {
                records.remove(key);
                return Err(TeamError::OtpExpired);
            }
            if record.code != code.trim() {
                return Err(TeamError::OtpInvalid);
            }
            records.remove(key);
            Ok(())
        })
    }

    /// Whether a code is outstanding for `key`. Read-only introspection for
    /// callers that inspect the store from outside, such as integration tests.
    pub fn is_pending(&self, key: &str) -> bool {
        self.records.with_data(|records| records.contains_key(key))
    }

    /// Drops every record whose expiry has passed, returning how many went.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        self.records.retain(|_, record| record.expires_at >= now)
    }

    pub fn len(&self) -> usize {
        self.records.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
