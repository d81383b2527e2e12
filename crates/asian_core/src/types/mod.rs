//! Shared types.
//!
//! This module provides:
//! - `error`: Structured error types for statistical operations
//!
//! # Re-exports
//!
//! - [`StatisticsError`] from `error`

pub mod error;

pub use error::StatisticsError;
