//! Shared fixtures for host-layer integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use devtracker_core::testing::{Harness, ManualClock};
use devtracker_domain::Config;
use devtracker_lib::ExtensionContext;

/// Fakes plus the manual clock driving them.
pub struct Fixture {
    pub harness: Harness,
    pub clock: Arc<ManualClock>,
}

pub fn fixture() -> Fixture {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()));
    Fixture { harness: Harness::new(clock.clone()), clock }
}

/// Context over the fixture's fakes with default configuration.
pub fn context(fixture: &Fixture) -> Arc<ExtensionContext> {
    Arc::new(ExtensionContext::with_dependencies(Config::default(), fixture.harness.deps()))
}

/// Poll `condition` every 10ms for up to two seconds.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
