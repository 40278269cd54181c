// =============================================================================
// GEOMETRY.RS — Points and quadrilaterals
//
// Corner order used throughout the crate (y-down GUI space):
//   0: bottom-left   1: top-left   2: top-right   3: bottom-right
// Source and destination quads correspond corner-by-corner.
// =============================================================================

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// A 2-D point in whatever space the caller is working in (screen pixels,
/// normalized page space, ...).
pub type Point2 = DVec2;

/// Four ordered corners of a quadrilateral.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub corners: [Point2; 4],
}

impl Quad {
    pub fn new(c0: Point2, c1: Point2, c2: Point2, c3: Point2) -> Self {
        Self { corners: [c0, c1, c2, c3] }
    }

    pub fn from_corners(corners: [Point2; 4]) -> Self {
        Self { corners }
    }

    /// Take the first four points of `points`.
    ///
    /// Returns `InsufficientPoints` when fewer than four are supplied; any
    /// extra points are ignored.
    pub fn from_points(points: &[Point2]) -> Result<Self, MapError> {
        match points {
            [c0, c1, c2, c3, ..] => Ok(Self::new(*c0, *c1, *c2, *c3)),
            _ => Err(MapError::InsufficientPoints { got: points.len() }),
        }
    }

    /// Normalized page space: `[(0,1), (0,0), (1,0), (1,1)]`.
    pub fn unit_square() -> Self {
        Self::screen_rect(1.0, 1.0)
    }

    /// A full screen in GUI pixels: `[(0,h), (0,0), (w,0), (w,h)]`.
    pub fn screen_rect(width: f64, height: f64) -> Self {
        Self::new(
            DVec2::new(0.0, height),
            DVec2::ZERO,
            DVec2::new(width, 0.0),
            DVec2::new(width, height),
        )
    }

    pub fn corners(&self) -> &[Point2; 4] {
        &self.corners
    }

    /// Corner `i` (0..4).
    #[inline]
    pub fn corner(&self, i: usize) -> Point2 {
        self.corners[i]
    }

    /// Axis-aligned bounds `(min, max)` of the four corners.
    pub fn bounds(&self) -> (Point2, Point2) {
        bounds_of(&self.corners)
    }

    /// Average of the four corners.
    pub fn centroid(&self) -> Point2 {
        self.corners.iter().copied().sum::<DVec2>() / 4.0
    }
}

/// Axis-aligned bounds of a non-empty point set.
pub(crate) fn bounds_of(points: &[Point2]) -> (Point2, Point2) {
    let first = points.first().copied().unwrap_or(DVec2::ZERO);
    points
        .iter()
        .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)))
}
