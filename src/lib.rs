//! Perspective mapping between screen space and a tracked 3-D surface.
//!
//! A book (or any flat object) drawn under a perspective camera shows up on
//! screen as an arbitrary quadrilateral. [`CoordinateMapper`] fits a
//! projective transform between that quad and a fixed reference quad once
//! per frame, then maps UI anchor points in either direction so controls
//! stay glued to the page while it tilts, scales, or skews.
//!
//! Layers, bottom-up: [`solver`] → [`homography`] → [`mapper`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod homography;
pub mod mapper;
pub mod projection;
pub mod solver;

pub use config::MapperConfig;
pub use error::MapError;
pub use geometry::{Point2, Quad};
pub use homography::{Transform, TransformUniform, estimate};
pub use mapper::{CoordinateMapper, MapperState};
pub use projection::{Aabb, Projector, screen_quad};
