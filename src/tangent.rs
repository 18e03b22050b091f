//! Tangent-space operations on the hyperboloid
//!
//! Closed forms for curvature -1: the exponential map, its inverse the
//! logarithm, and parallel transport along geodesics. Tangent vectors are
//! `[f64; 3]` attached to a stated base point, Minkowski-orthogonal to it.

use crate::error::GeometryError;
use crate::hyperbolic_models::{hyperboloid_distance, minkowski_dot, tangent_norm, HyperboloidPoint};
use crate::vector::{scale, sum};

/// Minimum tangent length for which exp / log / transport are computed.
pub const EXP_DISTANCE_THRESHOLD: f64 = 1e-7;

/// Exponential map at `base`: cosh(n)·base + sinh(n)/n·tangent, n = ‖tangent‖.
///
/// Fails with [`GeometryError::ZeroTangent`] when n is below
/// [`EXP_DISTANCE_THRESHOLD`], where the division is unstable.
pub fn exponential(base: &HyperboloidPoint, tangent: &[f64; 3]) -> Result<HyperboloidPoint, GeometryError> {
    let norm = tangent_norm(tangent);
    if norm.is_nan() || norm < EXP_DISTANCE_THRESHOLD {
        return Err(GeometryError::ZeroTangent { norm });
    }
    let a = norm.cosh();
    let b = norm.sinh() / norm;
    Ok(HyperboloidPoint::from_array(sum(
        &scale(a, &base.as_array()),
        &scale(b, tangent),
    )))
}

/// Logarithm of `other` in the tangent space of `base`.
///
/// `other` is projected onto T_base (other + ⟨base, other⟩·base) and the
/// projection rescaled to the hyperbolic distance between the two points.
pub fn logarithm(base: &HyperboloidPoint, other: &HyperboloidPoint) -> Result<[f64; 3], GeometryError> {
    let mdp = minkowski_dot(&base.as_array(), &other.as_array());
    let proj = sum(&other.as_array(), &scale(mdp, &base.as_array()));
    let norm = tangent_norm(&proj);
    if norm.is_nan() || norm < EXP_DISTANCE_THRESHOLD {
        return Err(GeometryError::CoincidentPoints { separation: norm });
    }
    let dist = hyperboloid_distance(base, other);
    Ok(scale(dist / norm, &proj))
}

/// Geodesic parallel transport of `tangent` (at `base`) along the geodesic
/// with initial velocity `direction`, over a distance of ‖direction‖. The
/// result lies in the tangent space of `exponential(base, direction)`.
///
/// Only the component along the unit direction û turns, into
/// sinh(d)·base + cosh(d)·û; the orthogonal remainder carries over unchanged.
pub fn transport(
    base: &HyperboloidPoint,
    direction: &[f64; 3],
    tangent: &[f64; 3],
) -> Result<[f64; 3], GeometryError> {
    let distance = tangent_norm(direction);
    if distance.is_nan() || distance < EXP_DISTANCE_THRESHOLD {
        return Err(GeometryError::ZeroTangent { norm: distance });
    }
    let unit_direction = scale(1.0 / distance, direction);
    let parallel_component = minkowski_dot(tangent, &unit_direction);
    let unit_direction_transported = sum(
        &scale(distance.sinh(), &base.as_array()),
        &scale(distance.cosh(), &unit_direction),
    );
    let orthogonal = sum(tangent, &scale(-parallel_component, &unit_direction));
    Ok(sum(
        &scale(parallel_component, &unit_direction_transported),
        &orthogonal,
    ))
}

/// Project an arbitrary 3-vector onto the tangent space at `base`.
pub fn project_to_tangent(base: &HyperboloidPoint, v: &[f64; 3]) -> [f64; 3] {
    let mdp = minkowski_dot(&base.as_array(), v);
    sum(v, &scale(mdp, &base.as_array()))
}
