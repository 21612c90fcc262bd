//! Error types for capline-core organized by pipeline stage.

use thiserror::Error;

/// Engine error variants organized by processing stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration stage error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Segment validation error
    #[error(transparent)]
    Segment(#[from] SegmentError),
}

/// Structural configuration errors, raised before any segment is processed.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Timing parameter is negative or not finite
    #[error("invalid {name}: {value}s (must be finite and non-negative)")]
    InvalidTiming { name: &'static str, value: f64 },

    /// Minimum visibility of zero would allow empty captions
    #[error("minimum visibility must be greater than zero")]
    ZeroVisibility,

    /// Sliding window of zero words
    #[error("window size must be at least 1 word")]
    ZeroWindow,

    /// Chunk bounds out of order or empty
    #[error("invalid chunk range: {min}..={max} words (need 1 <= min <= max)")]
    InvalidChunkRange { min: usize, max: usize },

    /// Speaking-rate thresholds out of order
    #[error("invalid speaking-rate thresholds: slow {slow} wps must be below fast {fast} wps")]
    InvalidRateThresholds { slow: f64, fast: f64 },

    /// No display band to place captions in
    #[error("band count must be at least 1")]
    ZeroBands,

    /// Line budget of zero characters
    #[error("max characters per line must be at least 1")]
    ZeroLineWidth,

    /// Clip window ends before it starts
    #[error("invalid clip window: end {end}s precedes start {start}s")]
    InvalidClip { start: f64, end: f64 },
}

/// Per-segment data problems. The pipeline drops the segment and continues.
#[derive(Debug, Error, PartialEq)]
pub enum SegmentError {
    /// Start or end time is NaN or infinite
    #[error("segment {index} has a non-finite time ({start}s..{end}s)")]
    NonFinite { index: usize, start: f64, end: f64 },

    /// End precedes start
    #[error("segment {index} ends at {end}s before it starts at {start}s")]
    Reversed { index: usize, start: f64, end: f64 },
}

/// Result type alias for capline-core operations.
pub type Result<T> = std::result::Result<T, Error>;
