//! Activity tracking: ports, snapshot recording, report scheduling and the
//! session state machine.

pub mod dispatcher;
pub mod ports;
pub mod recorder;
pub mod scheduler;
pub mod service;


pub use dispatcher::{ReportDispatcher, ReportOutcome};
pub use recorder::ActivityRecorder;
pub use scheduler::{ReportScheduler, SchedulerConfig, SchedulerError, SchedulerResult};
pub use service::{StartOutcome, TrackingConfig, TrackingDeps, TrackingService};
