//! Candidate regions and their pruning.
//!
//! Includes the scored region type, IoU, and greedy non-maximum suppression.

pub(crate) mod nms;
#[cfg(feature = "rayon")]
pub(crate) mod rayon;
pub(crate) mod region;
