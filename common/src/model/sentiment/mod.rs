//! Market sentiment models

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Fear & Greed index reading
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct FearGreedIndex {
    /// Index value in `0..=100`
    pub value: u32,
    /// Provider classification (e.g., "Greed")
    pub classification: String,
    /// Reading time in epoch seconds
    pub timestamp: i64,
}
