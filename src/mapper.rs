// =============================================================================
// MAPPER.RS — Per-frame cached perspective mapping
//
// Recalculate once per frame from the tracked surface's projected corners,
// then map as many anchor points as needed. Mapping never falls back to a
// stale or default transform: until a recalculation succeeds, every call
// reports `MapperNotReady`.
// =============================================================================

use crate::config::MapperConfig;
use crate::error::MapError;
use crate::geometry::{Point2, Quad, bounds_of};
use crate::homography::{Transform, estimate_with_tolerance};
use crate::projection::{Aabb, Projector, screen_quad};

/// Observable lifecycle of a [`CoordinateMapper`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MapperState {
    /// No recalculation has happened yet.
    #[default]
    Uninitialized,
    /// The last recalculation succeeded.
    Valid,
    /// The last recalculation failed; the previous transform is gone.
    Invalid,
}

/// Cached transform; only the `Valid` variant carries one.
#[derive(Clone, Debug, Default)]
enum Cache {
    #[default]
    Uninitialized,
    Valid {
        forward: Transform,
        /// Computed up front so per-point inverse mapping is a plain apply.
        inverse: Transform,
    },
    Invalid,
}

/// Single cached source→destination transform, rebuilt every frame.
#[derive(Clone, Debug, Default)]
pub struct CoordinateMapper {
    config: MapperConfig,
    cache: Cache,
}

impl CoordinateMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper using `config`, which must pass [`MapperConfig::validate`].
    pub fn with_config(config: MapperConfig) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self { config, cache: Cache::Uninitialized })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn state(&self) -> MapperState {
        match self.cache {
            Cache::Uninitialized => MapperState::Uninitialized,
            Cache::Valid { .. } => MapperState::Valid,
            Cache::Invalid => MapperState::Invalid,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == MapperState::Valid
    }

    /// The cached forward transform, if the last recalculation succeeded.
    pub fn current(&self) -> Option<&Transform> {
        match &self.cache {
            Cache::Valid { forward, .. } => Some(forward),
            _ => None,
        }
    }

    /// Rebuild the transform taking `src` onto `dst` from scratch.
    ///
    /// Fails when no invertible transform exists (degenerate corners, or a
    /// forward transform whose inverse cannot be normalized). On failure the
    /// mapper becomes `Invalid` and the error is returned; whatever
    /// transform was cached before is discarded either way.
    pub fn recalculate(&mut self, src: &Quad, dst: &Quad) -> Result<(), MapError> {
        match self.fit(src, dst) {
            Ok((forward, inverse)) => {
                log::trace!("mapper recalculated: {:?}", forward.params());
                self.cache = Cache::Valid { forward, inverse };
                Ok(())
            }
            Err(e) => {
                log::warn!("mapper recalculation failed for source quad {:?}: {e}", src.corners);
                self.cache = Cache::Invalid;
                Err(e)
            }
        }
    }

    fn fit(&self, src: &Quad, dst: &Quad) -> Result<(Transform, Transform), MapError> {
        let forward = estimate_with_tolerance(src, dst, self.config.pivot_tolerance)?;
        let inverse = forward.inverse_with_tolerance(
            self.config.pivot_tolerance,
            self.config.projection_tolerance,
        )?;
        Ok((forward, inverse))
    }

    /// Project the top face of `bounds` with `projector`, flip it into
    /// y-down GUI space and recalculate against `dst`.
    pub fn recalculate_from_bounds<P: Projector + ?Sized>(
        &mut self,
        projector: &P,
        bounds: &Aabb,
        screen_height: f64,
        dst: &Quad,
    ) -> Result<(), MapError> {
        let src = screen_quad(projector, bounds, screen_height);
        self.recalculate(&src, dst)
    }

    /// Map a source-space point into destination space.
    pub fn transform(&self, point: Point2) -> Result<Point2, MapError> {
        let forward = self.current().ok_or(MapError::MapperNotReady)?;
        forward.apply_with_tolerance(point, self.config.projection_tolerance)
    }

    /// Map a destination-space point back into source space.
    pub fn inverse_transform(&self, point: Point2) -> Result<Point2, MapError> {
        match &self.cache {
            Cache::Valid { inverse, .. } => {
                inverse.apply_with_tolerance(point, self.config.projection_tolerance)
            }
            _ => Err(MapError::MapperNotReady),
        }
    }

    /// Map every point; the first failure aborts the batch.
    pub fn transform_points(&self, points: &[Point2]) -> Result<Vec<Point2>, MapError> {
        points.iter().map(|&p| self.transform(p)).collect()
    }

    /// Map the corners of the rectangle `origin..origin + size` and return
    /// the axis-aligned `(origin, size)` enclosing the result.
    pub fn transform_rect(&self, origin: Point2, size: Point2) -> Result<(Point2, Point2), MapError> {
        map_rect(origin, size, |p| self.transform(p))
    }

    /// Like [`transform_rect`](Self::transform_rect), destination → source.
    /// Used to place a control laid out in page space onto the screen.
    pub fn inverse_transform_rect(
        &self,
        origin: Point2,
        size: Point2,
    ) -> Result<(Point2, Point2), MapError> {
        map_rect(origin, size, |p| self.inverse_transform(p))
    }
}

fn map_rect(
    origin: Point2,
    size: Point2,
    map: impl Fn(Point2) -> Result<Point2, MapError>,
) -> Result<(Point2, Point2), MapError> {
    let far = origin + size;
    let corners = [
        map(origin)?,
        map(Point2::new(far.x, origin.y))?,
        map(far)?,
        map(Point2::new(origin.x, far.y))?,
    ];
    let (lo, hi) = bounds_of(&corners);
    Ok((lo, hi - lo))
}
