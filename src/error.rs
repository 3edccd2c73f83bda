//! Error types for pdiff comparisons.

use thiserror::Error;

/// Result type alias for pdiff operations.
pub type Result<T> = std::result::Result<T, PdiffError>;

/// Errors detected before any comparison work starts.
///
/// Once inputs pass validation the comparison is total: numeric
/// degeneracies are clamped internally and never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PdiffError {
    /// Image sizes disagree, a dimension is zero, or a buffer length
    /// doesn't match `width * height`.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A configuration value is outside its valid range.
    #[error("invalid configuration: {parameter} = {value}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Value that was rejected.
        value: f64,
    },

    /// A channel value is negative or not finite.
    #[error("invalid pixel value {value} at channel index {index} (expected finite, non-negative radiance)")]
    InvalidPixel {
        /// Index of the channel in the interleaved RGB buffer.
        index: usize,
        /// Value that was rejected.
        value: f32,
    },
}
