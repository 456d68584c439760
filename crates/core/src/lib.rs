//! # DevTracker Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for every editor and transport collaborator
//! - The activity recorder and report dispatcher
//! - The report scheduler loop
//! - The tracking state machine ([`TrackingService`])
//!
//! ## Architecture Principles
//! - Only depends on `devtracker-domain`
//! - No HTTP, filesystem or editor code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod tracking;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use tracking::ports::{
    ActivityReporter, Clock, EditorContextProvider, Notifier, SettingsStore, StatusIndicator,
};
pub use tracking::{
    ActivityRecorder, ReportDispatcher, ReportOutcome, ReportScheduler, SchedulerConfig,
    SchedulerError, StartOutcome, TrackingConfig, TrackingDeps, TrackingService,
};
