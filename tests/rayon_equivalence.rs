#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ssdbox::{suppress_batch, suppress_batch_par, NmsConfig, Point, ScoredRegion};

fn random_frame(rng: &mut StdRng, len: usize) -> Vec<ScoredRegion<usize>> {
    (0..len)
        .map(|id| {
            let center = Point::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0));
            let size = rng.random_range(0.02..0.3);
            ScoredRegion::from_center_size(center, size, size, rng.random_range(0.0..1.0), id)
        })
        .collect()
}

#[test]
fn parallel_batch_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(7);
    let frames: Vec<Vec<ScoredRegion<usize>>> =
        (0..16).map(|i| random_frame(&mut rng, 20 + i * 7)).collect();
    let config = NmsConfig {
        iou_threshold: 0.4,
        max_count: 12,
    };

    let seq = suppress_batch(&frames, &config);
    let par = suppress_batch_par(&frames, &config);
    assert_eq!(seq, par);
}
