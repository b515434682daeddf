//! Anchor lattice generation.

use crate::anchor::config::AnchorConfig;
use crate::anchor::Anchor;
use crate::trace::{trace_event, trace_span};

/// Generates the ordered anchor list for `config`.
///
/// Anchors are grouped by merged layer, then grid row, then grid column,
/// then anchor type. Decoders pair `anchors[i]` with raw output entry `i`,
/// so this order must not change. The config is not validated here.
pub fn generate_anchors(config: &AnchorConfig) -> Vec<Anchor> {
    let _span = trace_span!("generate_anchors", strides = config.strides.len()).entered();

    let layers = config.layers();
    let total = layers.iter().map(|layer| layer.num_anchors()).sum();
    let mut anchors = Vec::with_capacity(total);

    for layer in &layers {
        trace_event!(
            "anchor_layer",
            stride = layer.stride,
            grid_w = layer.grid_width,
            grid_h = layer.grid_height,
            anchor_types = layer.anchor_types.len()
        );

        let grid_w = layer.grid_width as f32;
        let grid_h = layer.grid_height as f32;
        for y in 0..layer.grid_height {
            let y_center = (y as f32 + config.anchor_offset_y) / grid_h;
            for x in 0..layer.grid_width {
                let x_center = (x as f32 + config.anchor_offset_x) / grid_w;
                for anchor_type in &layer.anchor_types {
                    let (w, h) = if config.fixed_anchor_size {
                        (1.0, 1.0)
                    } else {
                        (anchor_type.width, anchor_type.height)
                    };
                    anchors.push(Anchor {
                        x_center,
                        y_center,
                        w,
                        h,
                    });
                }
            }
        }
    }

    trace_event!("anchors_generated", count = anchors.len());
    anchors
}

impl AnchorConfig {
    /// Shorthand for [`generate_anchors`].
    pub fn generate(&self) -> Vec<Anchor> {
        generate_anchors(self)
    }
}
