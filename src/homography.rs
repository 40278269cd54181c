use glam::{DMat3, DVec3};

use crate::error::MapError;
use crate::geometry::{Point2, Quad};
use crate::solver::{DEFAULT_PIVOT_TOLERANCE, LinearSystem};

/// Smallest `|w|` accepted before the homogeneous divide.
pub const DEFAULT_PROJECTION_TOLERANCE: f64 = 1e-10;

// ── Transform ─────────────────────────────────────────────────────────────────

/// 8-parameter projective transform.
///
/// As a matrix (row-major):
/// ```text
/// | h0 h1 h2 |
/// | h3 h4 h5 |
/// | h6 h7 1  |
/// ```
/// A point `(x, y)` maps to `(x'/w, y'/w)` where `(x', y', w) = M·(x, y, 1)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    h: [f64; 8],
}

impl Transform {
    pub const IDENTITY: Self = Self { h: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0] };

    pub fn from_params(h: [f64; 8]) -> Self {
        Self { h }
    }

    pub fn params(&self) -> [f64; 8] {
        self.h
    }

    /// The full 3×3 matrix, bottom-right entry fixed at 1.
    pub fn matrix(&self) -> DMat3 {
        let h = &self.h;
        DMat3::from_cols(
            DVec3::new(h[0], h[3], h[6]),
            DVec3::new(h[1], h[4], h[7]),
            DVec3::new(h[2], h[5], 1.0),
        )
    }

    /// Apply with [`DEFAULT_PROJECTION_TOLERANCE`].
    pub fn apply(&self, p: Point2) -> Result<Point2, MapError> {
        self.apply_with_tolerance(p, DEFAULT_PROJECTION_TOLERANCE)
    }

    /// Map `p` through the transform. Fails with `DegenerateProjection`
    /// when `|w| < tolerance`.
    pub fn apply_with_tolerance(&self, p: Point2, tolerance: f64) -> Result<Point2, MapError> {
        let h = &self.h;
        let x = h[0] * p.x + h[1] * p.y + h[2];
        let y = h[3] * p.x + h[4] * p.y + h[5];
        let w = h[6] * p.x + h[7] * p.y + 1.0;
        if w.is_nan() || w.abs() < tolerance {
            return Err(MapError::DegenerateProjection { w });
        }
        Ok(Point2::new(x / w, y / w))
    }

    /// Inverse with the default tolerances.
    pub fn inverse(&self) -> Result<Self, MapError> {
        self.inverse_with_tolerance(DEFAULT_PIVOT_TOLERANCE, DEFAULT_PROJECTION_TOLERANCE)
    }

    /// Invert the matrix and rescale it so the bottom-right entry is 1 again.
    ///
    /// `|det|` divided by the product of the column lengths below
    /// `det_tolerance` → `SingularMatrix`. The ratio ignores pixel scale, so
    /// screen-sized and unit-sized transforms are judged alike.
    /// An inverse whose bottom-right entry is below `projection_tolerance`
    /// cannot be put back into 8-parameter form → `DegenerateProjection`.
    pub fn inverse_with_tolerance(
        &self,
        det_tolerance: f64,
        projection_tolerance: f64,
    ) -> Result<Self, MapError> {
        let m = self.matrix();
        let volume = m.x_axis.length() * m.y_axis.length() * m.z_axis.length();
        let ratio = (m.determinant() / volume).abs();
        if ratio.is_nan() || ratio < det_tolerance {
            return Err(MapError::SingularMatrix);
        }

        let inv = m.inverse();
        let scale = inv.z_axis.z;
        if scale.abs() < projection_tolerance {
            return Err(MapError::DegenerateProjection { w: scale });
        }
        let inv = inv * (1.0 / scale);

        Ok(Self::from_params([
            inv.x_axis.x, inv.y_axis.x, inv.z_axis.x,
            inv.x_axis.y, inv.y_axis.y, inv.z_axis.y,
            inv.x_axis.z, inv.y_axis.z,
        ]))
    }

    /// GPU-ready copy of the matrix.
    pub fn to_uniform(&self) -> TransformUniform {
        let m = self.matrix();
        let col = |c: DVec3| [c.x as f32, c.y as f32, c.z as f32, 0.0];
        TransformUniform { cols: [col(m.x_axis), col(m.y_axis), col(m.z_axis)] }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Transform uniform uploaded to the GPU for shader-side page warping.
///
/// Layout matches WGSL `mat3x3<f32>`: three columns, each padded to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub cols: [[f32; 4]; 3],
}

// ── Estimation ────────────────────────────────────────────────────────────────

/// Estimate the transform taking `src` corner `i` onto `dst` corner `i`.
pub fn estimate(src: &Quad, dst: &Quad) -> Result<Transform, MapError> {
    estimate_with_tolerance(src, dst, DEFAULT_PIVOT_TOLERANCE)
}

/// Build the 8×8 system
/// ```text
/// [sx sy 1  0  0  0  -dx·sx  -dx·sy] · h = dx
/// [0  0  0  sx sy 1  -dy·sx  -dy·sy] · h = dy
/// ```
/// for each correspondence and solve it for `h0..h7`.
///
/// Degenerate input (three or more collinear corners, collapsed quads)
/// fails with `SingularMatrix`. Collinear corners on a line through the
/// origin make the system itself singular; on any other line the system
/// solves to a rank-deficient matrix, caught by a scale-free determinant check.
pub fn estimate_with_tolerance(
    src: &Quad,
    dst: &Quad,
    pivot_tolerance: f64,
) -> Result<Transform, MapError> {
    let system = correspondence_system(src, dst)?;
    let solution = system.solve_with_tolerance(pivot_tolerance)?;

    let mut h = [0.0; 8];
    h.copy_from_slice(&solution);
    let transform = Transform::from_params(h);

    let det = conditioned_determinant(&transform, src, dst);
    if det.is_nan() || det < pivot_tolerance {
        return Err(MapError::SingularMatrix);
    }
    Ok(transform)
}

/// `|det|` of the transform re-expressed between normalized copies of
/// `src` and `dst`, scaled to unit Frobenius norm.
///
/// Independent of pixel scale and offset: a full 4K quad and a unit square
/// score alike, while a matrix that collapses the plane scores ~1e-17.
fn conditioned_determinant(transform: &Transform, src: &Quad, dst: &Quad) -> f64 {
    let t_src = normalizing_transform(src);
    let t_dst = normalizing_transform(dst);
    let m = t_dst * transform.matrix() * t_src.inverse();

    let norm = [m.x_axis, m.y_axis, m.z_axis]
        .iter()
        .map(|c| c.length_squared())
        .sum::<f64>()
        .sqrt();
    if norm == 0.0 {
        return 0.0;
    }
    (m.determinant() / norm.powi(3)).abs()
}

/// Move the centroid to the origin and scale so the mean corner distance
/// is √2.
fn normalizing_transform(quad: &Quad) -> DMat3 {
    let c = quad.centroid();
    let mean_dist = quad.corners.iter().map(|p| p.distance(c)).sum::<f64>() / 4.0;
    let s = if mean_dist > 1e-15 { std::f64::consts::SQRT_2 / mean_dist } else { 1.0 };
    DMat3::from_cols(
        DVec3::new(s, 0.0, 0.0),
        DVec3::new(0.0, s, 0.0),
        DVec3::new(-s * c.x, -s * c.y, 1.0),
    )
}

fn correspondence_system(src: &Quad, dst: &Quad) -> Result<LinearSystem, MapError> {
    let mut system = LinearSystem::zeros(8);
    for (i, (s, d)) in src.corners.iter().zip(dst.corners.iter()).enumerate() {
        let row = i * 2;
        system.set_row(
            row,
            &[s.x, s.y, 1.0, 0.0, 0.0, 0.0, -d.x * s.x, -d.x * s.y],
            d.x,
        )?;
        system.set_row(
            row + 1,
            &[0.0, 0.0, 0.0, s.x, s.y, 1.0, -d.y * s.x, -d.y * s.y],
            d.y,
        )?;
    }
    Ok(system)
}
