//! Status indicator states

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the host's status indicator should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "minutes", rename_all = "snake_case")]
pub enum TrackerStatus {
    Ready,
    Tracking,
    /// Whole minutes tracked so far in the active session.
    Elapsed(u64),
    Stopped,
}

impl fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("DevTracker: Ready"),
            Self::Tracking => f.write_str("DevTracker: Tracking..."),
            Self::Elapsed(minutes) => write!(f, "DevTracker: {minutes}m"),
            Self::Stopped => f.write_str("DevTracker: Stopped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_status_text() {
        assert_eq!(TrackerStatus::Ready.to_string(), "DevTracker: Ready");
        assert_eq!(TrackerStatus::Tracking.to_string(), "DevTracker: Tracking...");
        assert_eq!(TrackerStatus::Elapsed(12).to_string(), "DevTracker: 12m");
        assert_eq!(TrackerStatus::Stopped.to_string(), "DevTracker: Stopped");
    }
}
