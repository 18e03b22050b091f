//! Hyperboloid and Poincaré disc models
//!
//! Points of the scene live on the upper sheet of the hyperboloid, which is
//! numerically stable for large distances. The Poincaré disc is the conformal
//! picture that gets drawn. This module holds the Minkowski form, the
//! hyperboloid metric and the maps between the two models:
//!
//! - **Hyperboloid (Lorentz)**: H² = {(x, y, t) : x² + y² - t² = -1, t > 0}
//! - **Poincaré disc**: the open unit disc, conformal to the true metric

use crate::vector::{dot, scale};
use crate::DiscPoint;
use serde::{Deserialize, Serialize};

/// Permitted deviation of ⟨p, p⟩_M from -1 for a point to count as on the hyperboloid.
pub const MANIFOLD_TOLERANCE: f64 = 1e-9;

/// Base point of the hyperboloid, the image of the disc origin.
pub const BASE_POINT: HyperboloidPoint = HyperboloidPoint {
    x: 0.0,
    y: 0.0,
    t: 1.0,
};

/// Point on the upper sheet of the hyperboloid.
/// The last coordinate `t` is the time-like one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperboloidPoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl HyperboloidPoint {
    /// Create a new hyperboloid point, validating ⟨p, p⟩_M = -1 (within
    /// [`MANIFOLD_TOLERANCE`]) and t > 0.
    pub fn new(x: f64, y: f64, t: f64) -> Option<Self> {
        let p = Self { x, y, t };
        p.is_on_manifold(MANIFOLD_TOLERANCE).then_some(p)
    }

    /// Wrap raw coordinates without validation. Results of the exponential
    /// map come through here.
    pub fn from_array(coords: [f64; 3]) -> Self {
        Self {
            x: coords[0],
            y: coords[1],
            t: coords[2],
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.t]
    }

    pub fn is_on_manifold(&self, tolerance: f64) -> bool {
        let mdp = minkowski_dot(&self.as_array(), &self.as_array());
        (mdp + 1.0).abs() <= tolerance && self.t > 0.0
    }
}

impl std::fmt::Display for HyperboloidPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.t)
    }
}

/// Minkowski bilinear form: x₀y₀ + ... + x_{n-2}y_{n-2} - x_{n-1}y_{n-1}
pub fn minkowski_dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    let spatial: f64 = a[..N - 1]
        .iter()
        .zip(b[..N - 1].iter())
        .map(|(x, y)| x * y)
        .sum();
    spatial - a[N - 1] * b[N - 1]
}

/// d(p, q) = arcosh(-⟨p, q⟩_M)
///
/// Rounding can push -⟨p, q⟩_M slightly below 1; it is clamped so acosh
/// stays in its domain.
pub fn hyperboloid_distance(p: &HyperboloidPoint, q: &HyperboloidPoint) -> f64 {
    let cosh_d = -minkowski_dot(&p.as_array(), &q.as_array());
    cosh_d.max(1.0).acosh()
}

/// Norm of a (space-like) tangent vector to the hyperboloid.
pub fn tangent_norm(v: &[f64; 3]) -> f64 {
    minkowski_dot(v, v).max(0.0).sqrt()
}

/// Hyperboloid to Poincaré: (x, y) / (1 + t)
pub fn hyperboloid_to_disc(p: &HyperboloidPoint) -> DiscPoint {
    let denom = p.t + 1.0;
    DiscPoint {
        x: p.x / denom,
        y: p.y / denom,
    }
}

/// Poincaré to Hyperboloid:
/// (x, y, t) = (2u, 2v, 1 + |z|²) / (1 - |z|²)
pub fn disc_to_hyperboloid(d: &DiscPoint) -> HyperboloidPoint {
    let norm_sq = d.euclidean_norm_sq();
    let factor = 2.0 / (1.0 - norm_sq);
    HyperboloidPoint {
        x: factor * d.x,
        y: factor * d.y,
        t: (1.0 + norm_sq) / (1.0 - norm_sq),
    }
}

/// Push a tangent at a disc point forward to the hyperboloid, through the
/// differential of [`disc_to_hyperboloid`].
///
/// The result is Minkowski-orthogonal to `disc_to_hyperboloid(disc_pt)`.
pub fn disc_tangent_to_hyperboloid(disc_pt: &DiscPoint, disc_tangent: &[f64; 2]) -> [f64; 3] {
    let hyper_pt = disc_to_hyperboloid(disc_pt);
    let dp = dot(&disc_pt.as_array(), disc_tangent);
    // t + 1 = 2 / (1 - |z|²), the derivative's scale
    let factor = hyper_pt.t + 1.0;
    let vec = [
        hyper_pt.x * dp + disc_tangent[0],
        hyper_pt.y * dp + disc_tangent[1],
        factor * dp,
    ];
    scale(factor, &vec)
}

/// Local scale of the disc metric at `d` inverted: a Euclidean disc
/// displacement `w` at `d` has hyperbolic length `|w| / conformal_factor(d)`.
pub fn conformal_factor(d: &DiscPoint) -> f64 {
    (1.0 - d.euclidean_norm_sq()) / 2.0
}
