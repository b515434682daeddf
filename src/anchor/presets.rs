//! Anchor options of well-known detector models.

use crate::anchor::config::AnchorConfig;

impl AnchorConfig {
    /// BlazeFace front camera model, 128x128 input, 896 anchors.
    pub fn blazeface_front() -> Self {
        Self {
            strides: vec![8, 16, 16, 16],
            aspect_ratios: vec![1.0],
            min_scale: 0.148_437_5,
            max_scale: 0.75,
            input_size_width: 128,
            input_size_height: 128,
            anchor_offset_x: 0.5,
            anchor_offset_y: 0.5,
            reduce_boxes_in_lowest_layer: false,
            interpolated_scale_aspect_ratio: 1.0,
            fixed_anchor_size: true,
            feature_map_width: Vec::new(),
            feature_map_height: Vec::new(),
        }
    }

    /// BlazeFace back camera model, 256x256 input, 896 anchors.
    pub fn blazeface_back() -> Self {
        Self {
            strides: vec![16, 32, 32, 32],
            min_scale: 0.156_25,
            input_size_width: 256,
            input_size_height: 256,
            ..Self::blazeface_front()
        }
    }

    /// BlazePose person detector, 224x224 input, 2254 anchors.
    pub fn blazepose_detector() -> Self {
        Self {
            strides: vec![8, 16, 32, 32, 32],
            input_size_width: 224,
            input_size_height: 224,
            ..Self::blazeface_front()
        }
    }

    /// SSD MobileNet object detector, 320x320 input, 2034 anchors.
    pub fn ssd_mobilenet_320() -> Self {
        Self {
            strides: vec![16, 32, 64, 128, 256, 512],
            aspect_ratios: vec![1.0, 2.0, 0.5, 3.0, 0.3333],
            min_scale: 0.2,
            max_scale: 0.95,
            input_size_width: 320,
            input_size_height: 320,
            anchor_offset_x: 0.5,
            anchor_offset_y: 0.5,
            reduce_boxes_in_lowest_layer: true,
            interpolated_scale_aspect_ratio: 1.0,
            fixed_anchor_size: false,
            feature_map_width: Vec::new(),
            feature_map_height: Vec::new(),
        }
    }
}
