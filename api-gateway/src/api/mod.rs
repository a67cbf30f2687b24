//! API handlers
//!
//! This module contains all the API endpoint handlers organized by resource.
//! Each handler follows a consistent pattern:
//! - Extract state and parameters using Axum extractors
//! - Validate input parameters
//! - Call the appropriate service methods
//! - Return the canonical record as plain JSON (the frontend consumes the
//!   bodies verbatim; upstream failures become a `{"error"}` body)

pub mod altcoins;
pub mod bitcoin;
pub mod sentiment;
pub mod trades;
