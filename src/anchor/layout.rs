//! Merged feature-map layers and their anchor types.

use std::ops::Range;

use crate::anchor::config::AnchorConfig;
use crate::util::math::geometric_mean;

/// Fixed scale of the small square anchor in a reduced lowest layer.
const REDUCED_LOWEST_SCALE: f32 = 0.1;

/// One (aspect ratio, scale) combination emitted at every grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorType {
    /// Width over height.
    pub aspect_ratio: f32,
    /// Scale relative to the input size.
    pub scale: f32,
    /// `scale * sqrt(aspect_ratio)`.
    pub width: f32,
    /// `scale / sqrt(aspect_ratio)`.
    pub height: f32,
}

impl AnchorType {
    fn new(aspect_ratio: f32, scale: f32) -> Self {
        let ratio_sqrt = aspect_ratio.sqrt();
        Self {
            aspect_ratio,
            scale,
            width: scale * ratio_sqrt,
            height: scale / ratio_sqrt,
        }
    }
}

/// A run of consecutive equal strides sharing one feature map.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorLayer {
    /// Stride shared by every merged entry.
    pub stride: usize,
    /// Global index of the first merged stride.
    pub first_stride_index: usize,
    /// Number of strides merged into this layer.
    pub num_strides: usize,
    /// Feature map columns.
    pub grid_width: usize,
    /// Feature map rows.
    pub grid_height: usize,
    /// Anchor types emitted per cell, in output order.
    pub anchor_types: Vec<AnchorType>,
    /// Index of this layer's first anchor in the flattened anchor list.
    pub offset: usize,
}

impl AnchorLayer {
    /// Number of anchors this layer contributes.
    pub fn num_anchors(&self) -> usize {
        self.grid_width * self.grid_height * self.anchor_types.len()
    }

    /// Range of this layer inside the flattened anchor list.
    pub fn anchor_range(&self) -> Range<usize> {
        self.offset..self.offset + self.num_anchors()
    }

    pub(crate) fn build_all(config: &AnchorConfig) -> Vec<Self> {
        let mut layers = Vec::new();
        let mut offset = 0usize;
        for (layer_idx, run) in merged_runs(&config.strides).into_iter().enumerate() {
            let stride = config.strides[run.start];
            let mut anchor_types = Vec::new();
            for stride_index in run.clone() {
                push_anchor_types(config, stride_index, &mut anchor_types);
            }
            let (grid_width, grid_height) = grid_size(config, layer_idx, stride);

            let layer = Self {
                stride,
                first_stride_index: run.start,
                num_strides: run.len(),
                grid_width,
                grid_height,
                anchor_types,
                offset,
            };
            offset += layer.num_anchors();
            layers.push(layer);
        }
        layers
    }
}

/// Splits strides into maximal runs of consecutive equal values.
pub(crate) fn merged_runs(strides: &[usize]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0usize;
    for chunk in strides.chunk_by(|a, b| a == b) {
        runs.push(start..start + chunk.len());
        start += chunk.len();
    }
    runs
}

fn push_anchor_types(config: &AnchorConfig, stride_index: usize, out: &mut Vec<AnchorType>) {
    let scale = config.scale_at(stride_index);

    if stride_index == 0 && config.reduce_boxes_in_lowest_layer {
        out.push(AnchorType::new(1.0, REDUCED_LOWEST_SCALE));
        out.push(AnchorType::new(2.0, scale));
        out.push(AnchorType::new(0.5, scale));
        return;
    }

    out.extend(
        config
            .aspect_ratios
            .iter()
            .map(|&ratio| AnchorType::new(ratio, scale)),
    );
    if config.interpolated_scale_aspect_ratio > 0.0 {
        let scale_next = if stride_index + 1 == config.strides.len() {
            1.0
        } else {
            config.scale_at(stride_index + 1)
        };
        out.push(AnchorType::new(
            config.interpolated_scale_aspect_ratio,
            geometric_mean(scale, scale_next),
        ));
    }
}

fn grid_size(config: &AnchorConfig, layer_idx: usize, stride: usize) -> (usize, usize) {
    if config.has_explicit_feature_maps() {
        let width = config.feature_map_width.get(layer_idx).copied();
        let height = config.feature_map_height.get(layer_idx).copied();
        if let (Some(width), Some(height)) = (width, height) {
            return (width, height);
        }
    }
    // Zero strides are rejected by validation; here they yield an empty grid.
    if stride == 0 {
        return (0, 0);
    }
    (
        config.input_size_width.div_ceil(stride),
        config.input_size_height.div_ceil(stride),
    )
}
