//! Error types for the decode pipeline.

use thiserror::Error;

/// Errors that can occur while decoding a single log.
///
/// Every variant is local to one log: callers skip the offending log and
/// continue with the rest of the batch.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Topic count mismatch: expected {expected} indexed topics after the signature, found {found}")]
    TopicCountMismatch { expected: usize, found: usize },

    #[error("Data payload too short: need {needed} bytes, have {have}")]
    PayloadTooShort { needed: usize, have: usize },

    #[error("Data payload length {have} does not match the expected {needed} bytes")]
    PayloadSizeMismatch { needed: usize, have: usize },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },

    #[error("Invalid raw log: {reason}")]
    InvalidRawLog { reason: String },

    #[error("Missing field '{field}' while normalizing {event}")]
    MissingField { event: String, field: String },
}
