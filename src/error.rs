//! Cueline Error Definitions
//!
//! Defines error types used throughout the crate.

use thiserror::Error;

use super::TimeSec;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Track Edit Errors
    // =========================================================================
    #[error("Cue not found at index {0}")]
    CueNotFound(usize),

    #[error("Invalid split point: {0} seconds")]
    InvalidSplitPoint(TimeSec),

    #[error("Invalid time range: {0}~{1} seconds")]
    InvalidTimeRange(TimeSec, TimeSec),

    #[error("Invalid merge range: {count} cues at index {index}")]
    InvalidMergeRange { index: usize, count: usize },

    #[error("Cue at index {index} would break start-time order")]
    CueOrderViolation { index: usize },

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;
