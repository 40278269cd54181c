use glam::{DVec2, DVec3};

use crate::geometry::{Point2, Quad};

/// Axis-aligned world-space box around the tracked object (e.g. a book).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Corners of the `max.y` face, in this order:
    /// `(min.x, max.y, min.z)`, `(min.x, max.y, max.z)`,
    /// `(max.x, max.y, min.z)`, `(max.x, max.y, max.z)`.
    pub fn top_face(&self) -> [DVec3; 4] {
        let (lo, hi) = (self.min, self.max);
        [
            DVec3::new(lo.x, hi.y, lo.z),
            DVec3::new(lo.x, hi.y, hi.z),
            DVec3::new(hi.x, hi.y, lo.z),
            hi,
        ]
    }
}

/// World → screen projection supplied by the host camera.
///
/// Screen points are in pixels with the origin at the bottom-left (y-up).
pub trait Projector {
    fn world_to_screen(&self, world: DVec3) -> Point2;
}

impl<F> Projector for F
where
    F: Fn(DVec3) -> Point2,
{
    fn world_to_screen(&self, world: DVec3) -> Point2 {
        self(world)
    }
}

/// Project the top face of `bounds` and return it as a GUI-space quad
/// (y-down) in the crate's corner order, ready to pair with
/// [`Quad::unit_square`] or [`Quad::screen_rect`].
///
/// Face corner 0 (near-left) becomes bottom-left, 1 (far-left) top-left,
/// 3 (far-right) top-right and 2 (near-right) bottom-right.
pub fn screen_quad<P: Projector + ?Sized>(projector: &P, bounds: &Aabb, screen_height: f64) -> Quad {
    let face = bounds.top_face();
    let gui = |corner: DVec3| {
        let p = projector.world_to_screen(corner);
        DVec2::new(p.x, screen_height - p.y)
    };
    Quad::new(gui(face[0]), gui(face[1]), gui(face[3]), gui(face[2]))
}
