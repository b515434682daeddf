//! Static anchor configuration for SSD-style detectors.

use crate::anchor::layout::{merged_runs, AnchorLayer};
use crate::util::math::interpolate_scale;
use crate::util::{SsdBoxError, SsdBoxResult};

/// Multi-scale anchor configuration mirroring a specific detector model.
///
/// All values must match the model whose raw outputs will later be paired
/// with the generated anchors. Anchor generation does not check the fields;
/// call [`AnchorConfig::validate`] once after building a config by hand.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorConfig {
    /// Per-layer downsampling factors. Consecutive equal strides share one
    /// feature map.
    pub strides: Vec<usize>,
    /// Aspect ratios (width / height) emitted for every stride.
    pub aspect_ratios: Vec<f32>,
    /// Scale of the first stride.
    pub min_scale: f32,
    /// Scale of the last stride.
    pub max_scale: f32,
    /// Network input width in pixels.
    pub input_size_width: usize,
    /// Network input height in pixels.
    pub input_size_height: usize,
    /// Horizontal offset of the anchor center inside its cell.
    pub anchor_offset_x: f32,
    /// Vertical offset of the anchor center inside its cell.
    pub anchor_offset_y: f32,
    /// Use three predefined anchor types for the very first stride.
    pub reduce_boxes_in_lowest_layer: bool,
    /// Aspect ratio of the extra interpolated-scale anchor; `<= 0` disables it.
    pub interpolated_scale_aspect_ratio: f32,
    /// Emit unit-size anchors instead of scale-derived extents.
    pub fixed_anchor_size: bool,
    /// Explicit feature map widths, one per merged layer. Empty to derive
    /// from strides.
    pub feature_map_width: Vec<usize>,
    /// Explicit feature map heights, one per merged layer. Empty to derive
    /// from strides.
    pub feature_map_height: Vec<usize>,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            strides: vec![8],
            aspect_ratios: vec![1.0],
            min_scale: 0.1,
            max_scale: 0.75,
            input_size_width: 128,
            input_size_height: 128,
            anchor_offset_x: 0.5,
            anchor_offset_y: 0.5,
            reduce_boxes_in_lowest_layer: false,
            interpolated_scale_aspect_ratio: 1.0,
            fixed_anchor_size: false,
            feature_map_width: Vec::new(),
            feature_map_height: Vec::new(),
        }
    }
}

impl AnchorConfig {
    /// Checks the preconditions anchor generation relies on.
    pub fn validate(&self) -> SsdBoxResult<()> {
        if self.strides.is_empty() {
            return Err(SsdBoxError::EmptyStrides);
        }
        if let Some((index, &stride)) = self.strides.iter().enumerate().find(|&(_, &s)| s == 0) {
            return Err(SsdBoxError::InvalidStride { index, stride });
        }
        if !self.min_scale.is_finite()
            || !self.max_scale.is_finite()
            || self.min_scale <= 0.0
            || self.min_scale > self.max_scale
        {
            return Err(SsdBoxError::InvalidScaleRange {
                min_scale: self.min_scale,
                max_scale: self.max_scale,
            });
        }
        for (index, &ratio) in self.aspect_ratios.iter().enumerate() {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(SsdBoxError::InvalidAspectRatio { index, ratio });
            }
        }
        if self.input_size_width == 0 || self.input_size_height == 0 {
            return Err(SsdBoxError::InvalidInputSize {
                width: self.input_size_width,
                height: self.input_size_height,
            });
        }
        if !self.anchor_offset_x.is_finite() || !self.anchor_offset_y.is_finite() {
            return Err(SsdBoxError::InvalidParameter("anchor offsets must be finite"));
        }
        if !self.interpolated_scale_aspect_ratio.is_finite() {
            return Err(SsdBoxError::InvalidParameter(
                "interpolated_scale_aspect_ratio must be finite",
            ));
        }

        if self.has_explicit_feature_maps() || !self.feature_map_width.is_empty() {
            let expected = merged_runs(&self.strides).len();
            if self.feature_map_width.len() != expected || self.feature_map_height.len() != expected
            {
                return Err(SsdBoxError::FeatureMapMismatch {
                    expected,
                    widths: self.feature_map_width.len(),
                    heights: self.feature_map_height.len(),
                });
            }
            let sizes = self.feature_map_width.iter().zip(&self.feature_map_height);
            for (index, (&width, &height)) in sizes.enumerate() {
                if width == 0 || height == 0 {
                    return Err(SsdBoxError::InvalidFeatureMap {
                        index,
                        width,
                        height,
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns the anchor scale for a global stride index.
    pub fn scale_at(&self, stride_index: usize) -> f32 {
        interpolate_scale(
            self.min_scale,
            self.max_scale,
            stride_index,
            self.strides.len(),
        )
    }

    /// Describes the merged feature-map layers in output order.
    pub fn layers(&self) -> Vec<AnchorLayer> {
        AnchorLayer::build_all(self)
    }

    /// Total number of anchors [`generate_anchors`](crate::generate_anchors)
    /// will produce.
    pub fn num_anchors(&self) -> usize {
        self.layers().iter().map(AnchorLayer::num_anchors).sum()
    }

    pub(crate) fn has_explicit_feature_maps(&self) -> bool {
        !self.feature_map_height.is_empty()
    }
}
