//! # DevTracker API
//!
//! Host integration layer - commands and lifecycle hooks.
//!
//! This crate contains:
//! - Host commands (start, stop, configure, document changes)
//! - Extension context (dependency injection)
//! - Activation and deactivation hooks
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - The host editor supplies [`HostBindings`] and forwards edit events

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
