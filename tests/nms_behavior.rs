use ssdbox::{
    calc_iou, suppress, suppress_batch, suppress_indices, suppress_with, NmsConfig, Point,
    ScoredRegion,
};

fn square(x: f32, y: f32, size: f32, score: f32) -> ScoredRegion {
    ScoredRegion::from_corners(x, y, x + size, y + size, score)
}

#[test]
fn fully_overlapping_pair_keeps_higher_score() {
    let regions = vec![square(0.0, 0.0, 10.0, 0.4), square(0.0, 0.0, 10.0, 0.8)];
    let kept = suppress(&regions, 0.5, 10);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].score, 0.8);
}

#[test]
fn disjoint_pair_keeps_both() {
    let regions = vec![square(0.0, 0.0, 10.0, 0.1), square(20.0, 20.0, 10.0, 0.9)];
    let kept = suppress(&regions, 0.3, 10);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].score, 0.9);
    assert_eq!(kept[1].score, 0.1);
}

#[test]
fn cap_keeps_highest_scoring_disjoint_regions() {
    let regions: Vec<ScoredRegion> = (0..8)
        .map(|i| square(i as f32 * 20.0, 0.0, 10.0, 0.1 * (i as f32 + 1.0)))
        .collect();
    let kept = suppress(&regions, 0.3, 3);
    assert_eq!(kept.len(), 3);
    let scores: Vec<f32> = kept.iter().map(|r| r.score).collect();
    assert!((scores[0] - 0.8).abs() < 1e-6);
    assert!((scores[1] - 0.7).abs() < 1e-6);
    assert!((scores[2] - 0.6).abs() < 1e-6);
    assert_eq!(suppress_indices(&regions, 0.3, 3), vec![7, 6, 5]);
}

#[test]
fn threshold_decides_partial_overlap() {
    let a = square(0.0, 0.0, 10.0, 0.9);
    let b = square(5.0, 5.0, 10.0, 0.8);
    let iou = calc_iou(&a, &b);
    assert!((iou - 25.0 / 175.0).abs() < 1e-6);

    let regions = vec![b.clone(), a.clone()];
    let kept = suppress(&regions, 0.3, 10);
    assert_eq!(kept, vec![a.clone(), b]);

    let kept = suppress(&regions, 0.1, 10);
    assert_eq!(kept, vec![a]);
}

#[test]
fn iou_equal_to_threshold_suppresses() {
    let a = square(0.0, 0.0, 10.0, 0.9);
    let b = square(0.0, 0.0, 10.0, 0.5);
    let kept = suppress(&[a, b], 1.0, 10);
    assert_eq!(kept.len(), 1);
}

#[test]
fn iou_is_symmetric() {
    let regions = [
        square(0.0, 0.0, 10.0, 0.9),
        square(3.0, 1.0, 7.0, 0.5),
        ScoredRegion::from_corners(12.0, 9.0, -2.0, 4.0, 0.3),
        ScoredRegion::from_corners(1.0, 1.0, 1.0, 5.0, 0.3),
    ];
    for a in &regions {
        for b in &regions {
            assert_eq!(calc_iou(a, b).to_bits(), calc_iou(b, a).to_bits());
        }
    }
}

#[test]
fn zero_area_regions_never_suppress() {
    let point = ScoredRegion::from_corners(5.0, 5.0, 5.0, 5.0, 1.0);
    let other = square(0.0, 0.0, 10.0, 0.5);
    assert_eq!(calc_iou(&point, &other), 0.0);
    let kept = suppress(&[point, other], 0.01, 10);
    assert_eq!(kept.len(), 2);
}

#[test]
fn swapped_corners_are_normalized() {
    let a = square(0.0, 0.0, 10.0, 0.9);
    let swapped = ScoredRegion::from_corners(10.0, 10.0, 0.0, 0.0, 0.5);
    let kept = suppress(&[a, swapped], 0.5, 10);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].score, 0.9);
}

#[test]
fn payload_passes_through_and_input_is_untouched() {
    let regions = vec![
        ScoredRegion::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 0.2, vec![1u32, 2]),
        ScoredRegion::new(Point::new(5.0, 5.0), Point::new(6.0, 6.0), 0.7, vec![3u32]),
    ];
    let snapshot = regions.clone();
    let kept = suppress(&regions, 0.3, 10);
    assert_eq!(regions, snapshot);
    assert_eq!(kept[0].payload, vec![3]);
    assert_eq!(kept[1].payload, vec![1, 2]);
}

#[test]
fn equal_scores_keep_input_order() {
    let regions = vec![
        square(0.0, 0.0, 10.0, 0.5),
        square(1.0, 1.0, 10.0, 0.5),
        square(40.0, 0.0, 10.0, 0.5),
    ];
    assert_eq!(suppress_indices(&regions, 0.3, 10), vec![0, 2]);
}

#[test]
fn empty_input_yields_empty_output() {
    let regions: Vec<ScoredRegion> = Vec::new();
    assert!(suppress(&regions, 0.3, 10).is_empty());
}

#[test]
fn batch_matches_per_frame_calls() {
    let config = NmsConfig {
        iou_threshold: 0.3,
        max_count: 2,
    };
    let frames = vec![
        vec![square(0.0, 0.0, 10.0, 0.9), square(1.0, 1.0, 10.0, 0.8)],
        Vec::new(),
        vec![
            square(0.0, 0.0, 4.0, 0.2),
            square(10.0, 0.0, 4.0, 0.6),
            square(20.0, 0.0, 4.0, 0.4),
        ],
    ];
    let batch = suppress_batch(&frames, &config);
    assert_eq!(batch.len(), 3);
    for (frame, kept) in frames.iter().zip(&batch) {
        assert_eq!(kept, &suppress_with(frame, &config));
    }
    assert_eq!(batch[2].len(), 2);
}
