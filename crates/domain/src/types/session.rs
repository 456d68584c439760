//! Tracking session and collector credentials

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::ACTIVITY_ENDPOINT_PATH;

/// The bounded period between `start` and `stop`.
///
/// A `Session` only exists while tracking is active; the idle state carries
/// no session at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub started_at: DateTime<Utc>,
    /// Watermark of the most recent edit event.
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Open a session at `now`.
    pub fn begin(now: DateTime<Utc>) -> Self {
        Self { started_at: now, last_activity_at: now }
    }

    /// Move the activity watermark forward.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity_at = now;
    }

    /// Whole minutes tracked at `now`, measured from the session start.
    ///
    /// A clock that reads earlier than `started_at` yields zero.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> u64 {
        let millis = (now - self.started_at).num_milliseconds();
        u64::try_from(millis / 60_000).unwrap_or(0)
    }
}

/// API key and collector base URL, read fresh for every report.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub server_url: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, server_url: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), server_url: server_url.into() }
    }

    /// Full URL of the activity endpoint.
    pub fn activity_endpoint(&self) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), ACTIVITY_ENDPOINT_PATH)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("server_url", &self.server_url)
            .finish()
    }
}
