//! Shared helpers for the host layer

pub mod logging;
