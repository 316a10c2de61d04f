//! Error types surfaced by the fallible table operations.
//!
//! Lookups and erasure never fail: they report "absent" through the end
//! cursor or a zero count. Only the checked insert and the configuration
//! setters return these.

use thiserror::Error;

/// Rejected insertion into a unique-key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("key is already present in the table")]
    DuplicateKey,
}

/// Invalid table configuration or resize request.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("bucket count must be at least 1")]
    ZeroBucketCount,
    #[error("max load factor must be a finite value above 0, got {0}")]
    InvalidMaxLoadFactor(f32),
    #[error("gain factor must be a finite value above 1, got {0}")]
    InvalidGainFactor(f32),
    #[error("{requested} buckets cannot hold the current elements; more than {required} needed")]
    BucketCountTooSmall { requested: usize, required: usize },
}
