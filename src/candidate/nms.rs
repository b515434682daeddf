//! Greedy IoU-based non-maximum suppression.

use crate::candidate::region::{calc_iou, ScoredRegion};
use crate::trace::{trace_event, trace_span};
use crate::util::{SsdBoxError, SsdBoxResult};

/// Suppression parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NmsConfig {
    /// A candidate is dropped when its IoU with any kept region reaches this value.
    pub iou_threshold: f32,
    /// Hard cap on the number of kept regions.
    pub max_count: usize,
}

impl NmsConfig {
    /// Default IoU threshold.
    pub const DEFAULT_IOU_THRESHOLD: f32 = 0.3;
    /// Default cap on kept regions.
    pub const DEFAULT_MAX_COUNT: usize = 100;

    /// Validates the threshold range.
    pub fn validate(&self) -> SsdBoxResult<()> {
        if !self.iou_threshold.is_finite() || !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(SsdBoxError::InvalidIouThreshold {
                value: self.iou_threshold,
            });
        }
        Ok(())
    }
}

impl Default for NmsConfig {
    fn default() -> Self {
        Self {
            iou_threshold: Self::DEFAULT_IOU_THRESHOLD,
            max_count: Self::DEFAULT_MAX_COUNT,
        }
    }
}

/// Returns candidate indices ordered by descending score.
///
/// The sort is stable: equal scores keep their input order.
pub(crate) fn order_by_score_desc<P>(candidates: &[ScoredRegion<P>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| candidates[b].score.total_cmp(&candidates[a].score));
    order
}

/// Runs greedy NMS and returns the kept indices into `candidates`.
///
/// Indices come back in acceptance order, i.e. by descending score. At most
/// `max_count` indices are returned; scanning stops as soon as the cap is hit.
pub fn suppress_indices<P>(
    candidates: &[ScoredRegion<P>],
    iou_threshold: f32,
    max_count: usize,
) -> Vec<usize> {
    let _span = trace_span!("non_max_suppression", candidates = candidates.len()).entered();

    let mut kept: Vec<usize> = Vec::with_capacity(max_count.min(candidates.len()));
    if max_count == 0 {
        return kept;
    }

    for idx in order_by_score_desc(candidates) {
        let candidate = &candidates[idx];
        let overlaps = kept
            .iter()
            .any(|&kept_idx| calc_iou(candidate, &candidates[kept_idx]) >= iou_threshold);
        if overlaps {
            continue;
        }
        kept.push(idx);
        if kept.len() >= max_count {
            break;
        }
    }

    trace_event!("nms_done", candidates = candidates.len(), kept = kept.len());
    kept
}

/// Runs greedy NMS and returns copies of the kept regions.
///
/// The input slice is left untouched; payloads are cloned unmodified.
pub fn suppress<P: Clone>(
    candidates: &[ScoredRegion<P>],
    iou_threshold: f32,
    max_count: usize,
) -> Vec<ScoredRegion<P>> {
    suppress_indices(candidates, iou_threshold, max_count)
        .into_iter()
        .map(|idx| candidates[idx].clone())
        .collect()
}

/// [`suppress`] with parameters taken from an [`NmsConfig`].
pub fn suppress_with<P: Clone>(
    candidates: &[ScoredRegion<P>],
    config: &NmsConfig,
) -> Vec<ScoredRegion<P>> {
    suppress(candidates, config.iou_threshold, config.max_count)
}

/// Applies [`suppress_with`] to independent frames in order.
pub fn suppress_batch<P: Clone>(
    frames: &[Vec<ScoredRegion<P>>],
    config: &NmsConfig,
) -> Vec<Vec<ScoredRegion<P>>> {
    frames
        .iter()
        .map(|frame| suppress_with(frame, config))
        .collect()
}
