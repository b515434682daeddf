//! Rayon-parallel suppression over independent frames (feature-gated).
//!
//! Each frame is suppressed on its own, so results are identical to
//! [`suppress_batch`](crate::suppress_batch) and come back in frame order.

use crate::candidate::nms::{suppress_with, NmsConfig};
use crate::candidate::region::ScoredRegion;
use rayon::prelude::*;

/// Frame-parallel variant of [`suppress_batch`](crate::suppress_batch).
pub fn suppress_batch_par<P>(
    frames: &[Vec<ScoredRegion<P>>],
    config: &NmsConfig,
) -> Vec<Vec<ScoredRegion<P>>>
where
    P: Clone + Send + Sync,
{
    frames
        .par_iter()
        .map(|frame| suppress_with(frame, config))
        .collect()
}
