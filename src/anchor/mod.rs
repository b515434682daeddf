//! Anchor lattice for single-shot detectors.
//!
//! An [`AnchorConfig`] mirrors the static anchor options of one detector
//! model. [`generate_anchors`] expands it into the flattened anchor list whose
//! order matches the model's output tensor layout.

pub mod config;
pub(crate) mod generate;
pub mod layout;
pub mod presets;

/// Reference box in normalized coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Center x relative to the feature map, in [0, 1) for offsets below 1.
    pub x_center: f32,
    /// Center y relative to the feature map.
    pub y_center: f32,
    /// Normalized width, or 1.0 for fixed-size anchors.
    pub w: f32,
    /// Normalized height, or 1.0 for fixed-size anchors.
    pub h: f32,
}
