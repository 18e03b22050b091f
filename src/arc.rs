//! Geodesic arcs on the Poincaré disc
//!
//! A geodesic between two disc points is an arc of the Euclidean circle
//! through both that meets the disc boundary at right angles. When the two
//! points lie on a diameter that circle degenerates to a straight segment.

use crate::error::GeometryError;
use crate::vector::{dot, scale, sum};
use crate::{normalize_angle, DiscPoint};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Below this |det [p0; p1]| the two points count as collinear with the origin.
pub const COLLINEARITY_THRESHOLD: f64 = 1e-12;

/// Circle parameters of a geodesic arc, with angles measured clockwise from
/// the horizontal (the canvas convention, y pointing down).
///
/// Invariant: `span < π`. The arc from `start_angle` to `end_angle` runs
/// anticlockwise when `anticlockwise` is set, clockwise otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodesicArc {
    pub center: [f64; 2],
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
    pub span: f64,
}

/// What a renderer should stroke for one edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeodesicSegment {
    Arc(GeodesicArc),
    /// The geodesic is (part of) a diameter.
    Straight { from: DiscPoint, to: DiscPoint },
}

/// Inversion of `pt` (not the origin) through the disc boundary.
pub fn invert_through_boundary(pt: &DiscPoint) -> [f64; 2] {
    scale(1.0 / pt.euclidean_norm_sq(), &pt.as_array())
}

/// Centre of the circle through `p0` and `p1` meeting the disc boundary at
/// right angles. Solves [p0; p1]·c = ½(1 + |p0|², 1 + |p1|²).
pub fn centre_of_arc_through(p0: &DiscPoint, p1: &DiscPoint) -> Result<[f64; 2], GeometryError> {
    let determinant = p0.x * p1.y - p0.y * p1.x;
    if determinant.is_nan() || determinant.abs() < COLLINEARITY_THRESHOLD {
        return Err(GeometryError::CollinearWithOrigin { determinant });
    }
    let target = [
        0.5 * (1.0 + p0.euclidean_norm_sq()),
        0.5 * (1.0 + p1.euclidean_norm_sq()),
    ];
    // inverse of the 2x2 matrix, applied from the left
    let inverse = [
        scale(1.0 / determinant, &[p1.y, -p0.y]),
        scale(1.0 / determinant, &[-p1.x, p0.x]),
    ];
    Ok([dot(&inverse[0], &target), dot(&inverse[1], &target)])
}

/// Angle of `pt` about `centre`, measured clockwise from the horizontal.
pub fn clockwise_angle(pt: &DiscPoint, centre: &[f64; 2]) -> f64 {
    let recentred = sum(&pt.as_array(), &scale(-1.0, centre));
    -recentred[1].atan2(recentred[0])
}

/// Length of the clockwise circular arc from `angle0` to `angle1`, in [0, 2π).
pub fn clockwise_arc_length(angle0: f64, angle1: f64) -> f64 {
    normalize_angle(angle1 - angle0)
}

/// The geodesic arc joining `p0` and `p1`, always the one of span < π.
pub fn geodesic_arc(p0: &DiscPoint, p1: &DiscPoint) -> Result<GeodesicArc, GeometryError> {
    let center = centre_of_arc_through(p0, p1)?;
    let radius = (dot(&center, &center) - 1.0).max(0.0).sqrt();
    let start_angle = clockwise_angle(p0, &center);
    let end_angle = clockwise_angle(p1, &center);
    let clockwise = clockwise_arc_length(start_angle, end_angle);
    let anticlockwise = clockwise > PI;
    let span = if anticlockwise { 2.0 * PI - clockwise } else { clockwise };
    Ok(GeodesicArc {
        center,
        radius,
        start_angle,
        end_angle,
        anticlockwise,
        span,
    })
}

/// Like [`geodesic_arc`], falling back to a straight segment when the points
/// are collinear with the origin.
pub fn geodesic_segment(p0: &DiscPoint, p1: &DiscPoint) -> GeodesicSegment {
    match geodesic_arc(p0, p1) {
        Ok(arc) => GeodesicSegment::Arc(arc),
        Err(_) => GeodesicSegment::Straight { from: *p0, to: *p1 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::euclidean_distance;

    #[test]
    fn test_arc_passes_through_both_points() {
        let p0 = DiscPoint::new(0.3, 0.1).unwrap();
        let p1 = DiscPoint::new(-0.2, 0.5).unwrap();
        let arc = geodesic_arc(&p0, &p1).unwrap();
        assert!((euclidean_distance(&arc.center, &p0.as_array()) - arc.radius).abs() < 1e-10);
        assert!((euclidean_distance(&arc.center, &p1.as_array()) - arc.radius).abs() < 1e-10);
    }

    #[test]
    fn test_arc_is_orthogonal_to_boundary() {
        let p0 = DiscPoint::new(0.6, -0.2).unwrap();
        let p1 = DiscPoint::new(0.1, 0.7).unwrap();
        let arc = geodesic_arc(&p0, &p1).unwrap();
        // orthogonal circles: |c|² = 1 + r²
        assert!((dot(&arc.center, &arc.center) - 1.0 - arc.radius * arc.radius).abs() < 1e-10);
    }

    #[test]
    fn test_arc_span_is_shorter_arc_either_order() {
        let p0 = DiscPoint::new(0.5, 0.4).unwrap();
        let p1 = DiscPoint::new(-0.6, 0.3).unwrap();
        let forward = geodesic_arc(&p0, &p1).unwrap();
        let backward = geodesic_arc(&p1, &p0).unwrap();
        assert!(forward.span < PI);
        assert!(backward.span < PI);
        assert!((forward.span - backward.span).abs() < 1e-10);
        assert_ne!(forward.anticlockwise, backward.anticlockwise);
    }

    #[test]
    fn test_arc_span_matches_sweep_direction() {
        let p0 = DiscPoint::new(-0.1, -0.7).unwrap();
        let p1 = DiscPoint::new(0.65, 0.05).unwrap();
        let arc = geodesic_arc(&p0, &p1).unwrap();
        let cw = clockwise_arc_length(arc.start_angle, arc.end_angle);
        if arc.anticlockwise {
            assert!((arc.span - (2.0 * PI - cw)).abs() < 1e-12);
        } else {
            assert!((arc.span - cw).abs() < 1e-12);
        }
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let p0 = DiscPoint::new(0.2, 0.2).unwrap();
        let p1 = DiscPoint::new(-0.4, -0.4).unwrap();
        assert!(matches!(
            geodesic_arc(&p0, &p1),
            Err(GeometryError::CollinearWithOrigin { .. })
        ));
        assert_eq!(
            geodesic_segment(&p0, &p1),
            GeodesicSegment::Straight { from: p0, to: p1 }
        );
        // the origin itself is on every diameter
        assert!(geodesic_arc(&DiscPoint::origin(), &p1).is_err());
    }

    #[test]
    fn test_clockwise_angle_and_arc_length() {
        let centre = [0.0, 0.0];
        let below = DiscPoint::new(0.0, -0.5).unwrap();
        assert!((clockwise_angle(&below, &centre) - PI / 2.0).abs() < 1e-12);
        assert!((clockwise_arc_length(0.5, 0.25) - (2.0 * PI - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_invert_through_boundary() {
        let p = DiscPoint::new(0.5, 0.0).unwrap();
        assert_eq!(invert_through_boundary(&p), [2.0, 0.0]);
    }
}
