//! Collector API: activity reporting over HTTP

pub mod errors;
pub mod reporter;

pub use errors::{ReportError, ReportErrorCategory};
pub use reporter::HttpActivityReporter;
