//! # DevTracker Domain
//!
//! Business domain types and models for DevTracker.
//!
//! This crate contains:
//! - Activity types (Session, ActivitySnapshot, EditorContext)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (wire endpoint, header names, user-facing messages)
//!
//! ## Architecture
//! - No dependencies on other DevTracker crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
