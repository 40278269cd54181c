use serde::{Deserialize, Serialize};

use crate::error::MapError;

// ── MapperConfig ──────────────────────────────────────────────────────────────

/// Numerical tolerances used by the mapper.
///
/// - `pivot_tolerance` is the smallest pivot magnitude accepted during
///   Gaussian elimination (and the smallest determinant accepted when
///   inverting a transform).
/// - `projection_tolerance` is the smallest `|w|` accepted before the
///   homogeneous divide.
///
/// The two are independent; both default to `1e-10`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub pivot_tolerance: f64,
    pub projection_tolerance: f64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance:      crate::solver::DEFAULT_PIVOT_TOLERANCE,
            projection_tolerance: crate::homography::DEFAULT_PROJECTION_TOLERANCE,
        }
    }
}

impl MapperConfig {
    /// Deserialise and [`validate`](Self::validate) a `MapperConfig` from a
    /// JSON string.
    ///
    /// Missing fields fall back to their defaults, so `"{}"` is valid.
    /// Malformed JSON and out-of-range tolerances both yield `InvalidConfig`.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MapError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Both tolerances must be finite and non-negative.
    pub fn validate(&self) -> Result<(), MapError> {
        for (name, value) in [
            ("pivot_tolerance", self.pivot_tolerance),
            ("projection_tolerance", self.projection_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MapError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
