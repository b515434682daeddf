//! Scored candidate regions and their overlap metric.

use crate::util::math::ordered;

/// A 2D point in detector or image coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A decoded detection candidate.
///
/// The corners do not have to be min/max ordered. `payload` carries whatever
/// the decoder attached (keypoints, class ids, ...) and is never inspected by
/// suppression.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRegion<P = ()> {
    /// First stored corner, usually the top-left one.
    pub topleft: Point,
    /// Second stored corner, usually the bottom-right one.
    pub btmright: Point,
    /// Detection confidence; higher wins.
    pub score: f32,
    /// Opaque auxiliary data.
    pub payload: P,
}

impl<P> ScoredRegion<P> {
    /// Creates a region from two corners.
    pub fn new(topleft: Point, btmright: Point, score: f32, payload: P) -> Self {
        Self {
            topleft,
            btmright,
            score,
            payload,
        }
    }

    /// Creates a region from a center and full extents.
    pub fn from_center_size(center: Point, width: f32, height: f32, score: f32, payload: P) -> Self {
        let half_w = width * 0.5;
        let half_h = height * 0.5;
        Self::new(
            Point::new(center.x - half_w, center.y - half_h),
            Point::new(center.x + half_w, center.y + half_h),
            score,
            payload,
        )
    }

    /// Returns the axis-aligned `(min, max)` corners.
    pub fn min_max(&self) -> (Point, Point) {
        let (xmin, xmax) = ordered(self.topleft.x, self.btmright.x);
        let (ymin, ymax) = ordered(self.topleft.y, self.btmright.y);
        (Point::new(xmin, ymin), Point::new(xmax, ymax))
    }

    pub fn width(&self) -> f32 {
        (self.btmright.x - self.topleft.x).abs()
    }

    pub fn height(&self) -> f32 {
        (self.btmright.y - self.topleft.y).abs()
    }

    pub fn area(&self) -> f32 {
        let (min, max) = self.min_max();
        (max.y - min.y) * (max.x - min.x)
    }

    /// Replaces the payload, keeping geometry and score.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> ScoredRegion<Q> {
        ScoredRegion {
            topleft: self.topleft,
            btmright: self.btmright,
            score: self.score,
            payload: f(self.payload),
        }
    }
}

impl ScoredRegion {
    /// Creates a payload-free region from raw corner coordinates.
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32, score: f32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1), score, ())
    }
}

/// Intersection over union of two regions.
///
/// Returns 0 when either region has non-positive area, so a degenerate box
/// never suppresses and is never suppressed.
pub fn calc_iou<P, Q>(r0: &ScoredRegion<P>, r1: &ScoredRegion<Q>) -> f32 {
    let (min0, max0) = r0.min_max();
    let (min1, max1) = r1.min_max();

    let area0 = (max0.y - min0.y) * (max0.x - min0.x);
    let area1 = (max1.y - min1.y) * (max1.x - min1.x);
    if area0 <= 0.0 || area1 <= 0.0 {
        return 0.0;
    }

    let inter_w = (max0.x.min(max1.x) - min0.x.max(min1.x)).max(0.0);
    let inter_h = (max0.y.min(max1.y) - min0.y.max(min1.y)).max(0.0);
    let inter = inter_w * inter_h;

    inter / (area0 + area1 - inter)
}
