//! Shared error type across promfam crates.

use thiserror::Error;

/// Stable error codes (API surface for callers that match on failures).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Family name fails the metric-name grammar.
    InvalidName,
    /// Label name fails the label-name grammar or uses the reserved prefix.
    InvalidLabelName,
    /// Label name supplied twice (constant vs. variable/dynamic, or repeated).
    LabelNameCollision,
    /// Positional label values do not match the declared variable labels.
    LabelCountMismatch,
    /// Histogram bulk observation has the wrong number of buckets.
    BucketCountMismatch,
    /// Histogram bucket boundaries are malformed.
    InvalidBuckets,
    /// Configuration is malformed or fails validation.
    Config,
    /// Configuration could not be read.
    Io,
}

impl ErrorCode {
    /// String representation used in logs and assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::InvalidLabelName => "INVALID_LABEL_NAME",
            ErrorCode::LabelNameCollision => "LABEL_NAME_COLLISION",
            ErrorCode::LabelCountMismatch => "LABEL_COUNT_MISMATCH",
            ErrorCode::BucketCountMismatch => "BUCKET_COUNT_MISMATCH",
            ErrorCode::InvalidBuckets => "INVALID_BUCKETS",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Io => "IO",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FamilyError>;

/// Unified error type used by core and config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FamilyError {
    #[error("invalid metric name: {0:?}")]
    InvalidName(String),
    #[error("invalid label name: {0:?}")]
    InvalidLabelName(String),
    #[error("duplicate label name: {0:?}")]
    LabelNameCollision(String),
    #[error("expected {expected} label values, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },
    #[error("expected {expected} bucket increments, got {actual}")]
    BucketCountMismatch { expected: usize, actual: usize },
    #[error("invalid bucket boundaries: {0}")]
    InvalidBuckets(String),
    #[error("config: {0}")]
    Config(String),
    #[error("io: {0}")]
    Io(String),
}

impl FamilyError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            FamilyError::InvalidName(_) => ErrorCode::InvalidName,
            FamilyError::InvalidLabelName(_) => ErrorCode::InvalidLabelName,
            FamilyError::LabelNameCollision(_) => ErrorCode::LabelNameCollision,
            FamilyError::LabelCountMismatch { .. } => ErrorCode::LabelCountMismatch,
            FamilyError::BucketCountMismatch { .. } => ErrorCode::BucketCountMismatch,
            FamilyError::InvalidBuckets(_) => ErrorCode::InvalidBuckets,
            FamilyError::Config(_) => ErrorCode::Config,
            FamilyError::Io(_) => ErrorCode::Io,
        }
    }
}
