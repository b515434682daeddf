use ssdbox::{AnchorConfig, NmsConfig, SsdBoxError};

fn valid() -> AnchorConfig {
    AnchorConfig {
        strides: vec![8, 16, 16],
        aspect_ratios: vec![1.0, 2.0],
        ..AnchorConfig::default()
    }
}

#[test]
fn default_config_is_valid() {
    AnchorConfig::default().validate().unwrap();
    valid().validate().unwrap();
}

#[test]
fn rejects_empty_and_zero_strides() {
    let err = AnchorConfig {
        strides: Vec::new(),
        ..valid()
    }
    .validate()
    .unwrap_err();
    assert_eq!(err, SsdBoxError::EmptyStrides);

    let err = AnchorConfig {
        strides: vec![8, 0],
        ..valid()
    }
    .validate()
    .unwrap_err();
    assert_eq!(err, SsdBoxError::InvalidStride { index: 1, stride: 0 });
}

#[test]
fn rejects_inverted_or_non_positive_scales() {
    let err = AnchorConfig {
        min_scale: 0.9,
        max_scale: 0.5,
        ..valid()
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err,
        SsdBoxError::InvalidScaleRange {
            min_scale: 0.9,
            max_scale: 0.5,
        }
    );

    let config = AnchorConfig {
        min_scale: 0.0,
        ..valid()
    };
    assert!(matches!(
        config.validate(),
        Err(SsdBoxError::InvalidScaleRange { .. })
    ));
}

#[test]
fn rejects_bad_aspect_ratio() {
    let err = AnchorConfig {
        aspect_ratios: vec![1.0, -2.0],
        ..valid()
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err,
        SsdBoxError::InvalidAspectRatio {
            index: 1,
            ratio: -2.0,
        }
    );
}

#[test]
fn rejects_zero_input_size() {
    let err = AnchorConfig {
        input_size_height: 0,
        ..valid()
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err,
        SsdBoxError::InvalidInputSize {
            width: 128,
            height: 0,
        }
    );
}

#[test]
fn explicit_feature_maps_need_one_entry_per_merged_layer() {
    let err = AnchorConfig {
        feature_map_width: vec![16, 8, 8],
        feature_map_height: vec![16, 8, 8],
        ..valid()
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err,
        SsdBoxError::FeatureMapMismatch {
            expected: 2,
            widths: 3,
            heights: 3,
        }
    );

    let err = AnchorConfig {
        feature_map_width: vec![16, 8],
        ..valid()
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err,
        SsdBoxError::FeatureMapMismatch {
            expected: 2,
            widths: 2,
            heights: 0,
        }
    );

    let err = AnchorConfig {
        feature_map_width: vec![16, 0],
        feature_map_height: vec![16, 8],
        ..valid()
    }
    .validate()
    .unwrap_err();
    assert_eq!(
        err,
        SsdBoxError::InvalidFeatureMap {
            index: 1,
            width: 0,
            height: 8,
        }
    );

    AnchorConfig {
        feature_map_width: vec![16, 8],
        feature_map_height: vec![16, 8],
        ..valid()
    }
    .validate()
    .unwrap();
}

#[test]
fn rejects_non_finite_offsets() {
    let config = AnchorConfig {
        anchor_offset_x: f32::NAN,
        ..valid()
    };
    assert!(matches!(
        config.validate(),
        Err(SsdBoxError::InvalidParameter(_))
    ));
}

#[test]
fn nms_threshold_must_be_a_fraction() {
    for value in [-0.1, 1.01, f32::NAN] {
        let config = NmsConfig {
            iou_threshold: value,
            ..NmsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SsdBoxError::InvalidIouThreshold { .. })
        ));
    }
    NmsConfig {
        iou_threshold: 0.0,
        max_count: 0,
    }
    .validate()
    .unwrap();
}

#[test]
fn errors_render_readable_messages() {
    let err = SsdBoxError::InvalidStride { index: 2, stride: 0 };
    assert_eq!(err.to_string(), "stride 0 at index 2 must be > 0");
}
