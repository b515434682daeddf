//! ssdbox computes SSD-style anchor lattices and filters scored detections
//! with greedy non-maximum suppression.
//!
//! Anchors are generated once per detector configuration and shared
//! read-only across frames; suppression is a pure per-frame pass. Optional
//! features add `tracing` instrumentation and `rayon` frame parallelism.

pub mod anchor;
mod candidate;
mod trace;
pub mod util;

pub use anchor::config::AnchorConfig;
pub use anchor::generate::generate_anchors;
pub use anchor::layout::{AnchorLayer, AnchorType};
pub use anchor::Anchor;
pub use util::{SsdBoxError, SsdBoxResult};

pub use candidate::nms::{suppress, suppress_batch, suppress_indices, suppress_with, NmsConfig};
#[cfg(feature = "rayon")]
pub use candidate::rayon::suppress_batch_par;
pub use candidate::region::{calc_iou, Point, ScoredRegion};
