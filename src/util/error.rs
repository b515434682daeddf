//! Error types for ssdbox.

use thiserror::Error;

/// Result alias for ssdbox operations.
pub type SsdBoxResult<T> = std::result::Result<T, SsdBoxError>;

/// Errors reported by configuration validation.
///
/// Anchor generation and suppression themselves are total; these errors only
/// come out of the explicit `validate` checks callers run up front.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SsdBoxError {
    /// The stride list is empty.
    #[error("anchor config has no strides")]
    EmptyStrides,
    /// A stride is zero.
    #[error("stride {stride} at index {index} must be > 0")]
    InvalidStride { index: usize, stride: usize },
    /// Scale bounds are not finite or violate `0 < min_scale <= max_scale`.
    #[error("invalid scale range: min_scale={min_scale}, max_scale={max_scale}")]
    InvalidScaleRange { min_scale: f32, max_scale: f32 },
    /// An aspect ratio is not finite or not positive.
    #[error("aspect ratio {ratio} at index {index} must be finite and > 0")]
    InvalidAspectRatio { index: usize, ratio: f32 },
    /// The network input size has a zero dimension.
    #[error("invalid input size {width}x{height}")]
    InvalidInputSize { width: usize, height: usize },
    /// Explicit feature map sizes do not provide one entry per merged layer.
    #[error(
        "expected {expected} explicit feature map entries, got {widths} widths and {heights} heights"
    )]
    FeatureMapMismatch {
        expected: usize,
        widths: usize,
        heights: usize,
    },
    /// An explicit feature map entry has a zero dimension.
    #[error("feature map {index} has invalid size {width}x{height}")]
    InvalidFeatureMap {
        index: usize,
        width: usize,
        height: usize,
    },
    /// IoU threshold is not finite or outside [0, 1].
    #[error("iou threshold {value} must be within [0, 1]")]
    InvalidIouThreshold { value: f32 },
    /// Any other invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}
