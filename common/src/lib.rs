//! Common types and utilities for the market-data backend
//!
//! This library contains the shared types used across the workspace: the
//! unified error taxonomy for upstream/provider failures and the canonical
//! record shapes that every adapter normalizes into.

pub mod error;
pub mod model;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
