//! Held-key entries as reported by the manager port.

use chrono::{DateTime, Duration, Local, Utc};
use serde::Serialize;

/// One held key and its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEntry {
    pub key: String,
    pub source_addr: String,
    pub remote_addr: String,
    pub created_at: DateTime<Utc>,
}

impl KeyEntry {
    /// How long the key has been held as of `now`.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.created_at)
    }

    /// Detailed listing line: endpoint, lock time, age, key and source.
    pub fn detailed_line(&self, now: DateTime<Utc>) -> String {
        let (ip, port) = match self.remote_addr.rsplit_once(':') {
            Some((ip, port)) => (ip, port),
            None => (self.remote_addr.as_str(), ""),
        };
        let age_secs = self.age_at(now).num_milliseconds() as f64 / 1000.0;

        format!(
            "{:>15}:{:<5} -> {} ({:9.3}s) {} ({})",
            ip,
            port,
            self.created_at
                .with_timezone(&Local)
                .format("%Y %b %d %H:%M:%S"),
            age_secs,
            self.key,
            self.source_addr
        )
    }
}
