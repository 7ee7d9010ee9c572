//! Error types for the planner model.

use thiserror::Error;

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;

/// Failures of a persistent store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum PlannerError {
    /// The prioritizer rejected or returned an unusable ranking. The task
    /// list is unchanged.
    #[error("prioritization failed: {reason}")]
    PrioritizationFailed { reason: String },

    #[error("store error on key '{key}': {source}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to encode '{key}': {reason}")]
    Encode { key: String, reason: String },

    #[error("failed to decode '{key}': {reason}")]
    Decode { key: String, reason: String },
}

impl PlannerError {
    pub(crate) fn store(key: &str, source: StoreError) -> Self {
        Self::Store {
            key: key.to_string(),
            source,
        }
    }

    pub fn is_prioritization_failure(&self) -> bool {
        matches!(self, Self::PrioritizationFailed { .. })
    }
}
