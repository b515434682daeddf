//! Mathematical helpers for anchor scales and box geometry.

/// Linearly interpolates the anchor scale for a global stride index.
///
/// A single-stride configuration uses the midpoint of the scale range.
pub(crate) fn interpolate_scale(
    min_scale: f32,
    max_scale: f32,
    stride_index: usize,
    num_strides: usize,
) -> f32 {
    if num_strides == 1 {
        return (min_scale + max_scale) * 0.5;
    }
    let t = stride_index as f32 / (num_strides as f32 - 1.0);
    min_scale + (max_scale - min_scale) * t
}

/// Geometric mean of two scales.
pub(crate) fn geometric_mean(a: f32, b: f32) -> f32 {
    (a * b).sqrt()
}

/// Returns `(min, max)` of two coordinates.
#[inline]
pub(crate) fn ordered(a: f32, b: f32) -> (f32, f32) {
    (a.min(b), a.max(b))
}
