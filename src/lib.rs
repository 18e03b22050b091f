//! Crystal Ball: interactive graphs in the hyperbolic plane
//!
//! Core library for viewing and reshaping a small graph of points in the
//! hyperbolic plane. Points are stored on the hyperboloid (Lorentz) model for
//! numerical robustness and rendered through the Poincaré disc model.
//!
//! Layout, leaves first:
//! - [`vector`]: Euclidean primitives on fixed-length vectors
//! - [`hyperbolic_models`]: Minkowski form, hyperboloid metric, model conversion
//! - [`tangent`]: exponential / logarithm maps and geodesic parallel transport
//! - [`arc`]: geodesic arcs on the disc for rendering
//! - [`scene`], [`drag`]: the point/edge scene and the drag gestures that mutate it
//! - [`parsing`], [`viewport`]: the textual and canvas collaborators

pub mod arc;
pub mod drag;
pub mod error;
pub mod hyperbolic_models;
pub mod parsing;
pub mod scene;
pub mod tangent;
pub mod telemetry;
pub mod vector;
pub mod viewport;

pub use error::{DragError, GeometryError, SceneError};
pub use hyperbolic_models::{HyperboloidPoint, BASE_POINT};

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A point of the Poincaré disc, the open unit disc x² + y² < 1.
///
/// Only the constructors check the bound; the kernel's conversions keep it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscPoint {
    pub x: f64,
    pub y: f64,
}

impl DiscPoint {
    /// None unless (x, y) is finite and strictly inside the unit circle.
    pub fn new(x: f64, y: f64) -> Option<Self> {
        let norm_sq = x * x + y * y;
        (norm_sq.is_finite() && norm_sq < 1.0).then_some(Self { x, y })
    }

    /// Point at Euclidean radius `r` in [0, 1) and angle `theta`.
    pub fn from_polar(r: f64, theta: f64) -> Option<Self> {
        if !(0.0..1.0).contains(&r) {
            return None;
        }
        Self::new(r * theta.cos(), r * theta.sin())
    }

    pub fn from_array(coords: [f64; 2]) -> Option<Self> {
        Self::new(coords[0], coords[1])
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// |z|², which drives the conformal factor and the lift to the hyperboloid.
    pub fn euclidean_norm_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

/// Wrap an angle into [0, 2π).
pub fn normalize_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(2.0 * PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= 2.0 * PI {
        0.0
    } else {
        wrapped
    }
}
