//! Property-based tests for the hyperbolic kernel
//!
//! Verifies the model-conversion, exponential/logarithm, parallel transport
//! and drag invariants across randomly generated inputs using proptest.

use crystal_ball::arc::{geodesic_arc, GeodesicSegment};
use crystal_ball::drag::translate_points;
use crystal_ball::hyperbolic_models::{
    disc_tangent_to_hyperboloid, disc_to_hyperboloid, hyperboloid_distance, hyperboloid_to_disc,
    minkowski_dot, tangent_norm, HyperboloidPoint,
};
use crystal_ball::tangent::{exponential, logarithm, project_to_tangent, transport};
use crystal_ball::vector::euclidean_distance;
use crystal_ball::DiscPoint;
use proptest::prelude::*;
use std::f64::consts::PI;

// ============================================================================
// Custom Strategies
// ============================================================================

/// Points in the Poincaré disc with r ∈ [0, 0.9), so hyperboloid coordinates
/// stay moderate.
pub fn disc_point_strategy() -> impl Strategy<Value = DiscPoint> {
    (0.0..0.9_f64, 0.0..(2.0 * PI)).prop_map(|(r, theta)| {
        DiscPoint::from_polar(r, theta).expect("Generated point should be valid")
    })
}

/// Hyperboloid points, lifted from the disc.
pub fn hyperboloid_point_strategy() -> impl Strategy<Value = HyperboloidPoint> {
    disc_point_strategy().prop_map(|d| disc_to_hyperboloid(&d))
}

/// Cursor positions within the default action radius (disc radius tanh(1)).
pub fn cursor_strategy() -> impl Strategy<Value = HyperboloidPoint> {
    (0.0..0.7_f64, 0.0..(2.0 * PI)).prop_map(|(r, theta)| {
        disc_to_hyperboloid(&DiscPoint::from_polar(r, theta).expect("Generated point should be valid"))
    })
}

/// A base point with a tangent of hyperbolic length in [0.01, 3).
pub fn point_and_tangent_strategy() -> impl Strategy<Value = (HyperboloidPoint, [f64; 3])> {
    (
        hyperboloid_point_strategy(),
        0.01..3.0_f64,
        0.0..(2.0 * PI),
    )
        .prop_map(|(base, length, theta)| {
            // a unit disc direction pushed forward and normalised
            let disc = hyperboloid_to_disc(&base);
            let raw = disc_tangent_to_hyperboloid(&disc, &[theta.cos(), theta.sin()]);
            let norm = tangent_norm(&raw);
            (base, raw.map(|c| c * length / norm))
        })
}

/// Closed-form disc distance, arcosh(1 + 2|a - b|² / ((1 - |a|²)(1 - |b|²))).
fn disc_distance(a: &DiscPoint, b: &DiscPoint) -> f64 {
    let diff = [a.x - b.x, a.y - b.y];
    let denom = (1.0 - a.euclidean_norm_sq()) * (1.0 - b.euclidean_norm_sq());
    (1.0 + 2.0 * (diff[0] * diff[0] + diff[1] * diff[1]) / denom).max(1.0).acosh()
}

fn vectors_close(a: &[f64; 3], b: &[f64; 3], tolerance: f64) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tolerance * (1.0 + y.abs()))
}

// ============================================================================
// Model conversion
// ============================================================================

#[cfg(test)]
mod conversion_properties {
    use super::*;

    proptest! {
        #[test]
        fn hyperboloid_points_are_on_manifold(p in hyperboloid_point_strategy()) {
            let mdp = minkowski_dot(&p.as_array(), &p.as_array());
            prop_assert!((mdp + 1.0).abs() < 1e-9, "⟨p, p⟩ = {}", mdp);
            prop_assert!(p.t > 0.0);
        }

        #[test]
        fn disc_round_trip(d in disc_point_strategy()) {
            let back = hyperboloid_to_disc(&disc_to_hyperboloid(&d));
            prop_assert!((back.x - d.x).abs() < 1e-12);
            prop_assert!((back.y - d.y).abs() < 1e-12);
        }

        #[test]
        fn hyperboloid_round_trip(p in hyperboloid_point_strategy()) {
            let back = disc_to_hyperboloid(&hyperboloid_to_disc(&p));
            prop_assert!(vectors_close(&back.as_array(), &p.as_array(), 1e-10));
        }

        #[test]
        fn disc_and_hyperboloid_distances_agree(a in disc_point_strategy(), b in disc_point_strategy()) {
            let d_disc = disc_distance(&a, &b);
            let d_hyp = hyperboloid_distance(&disc_to_hyperboloid(&a), &disc_to_hyperboloid(&b));
            prop_assert!((d_disc - d_hyp).abs() < 1e-5, "{} vs {}", d_disc, d_hyp);
        }

        #[test]
        fn pushed_tangent_is_orthogonal(d in disc_point_strategy(), u in -1.0..1.0_f64, v in -1.0..1.0_f64) {
            let tangent = disc_tangent_to_hyperboloid(&d, &[u, v]);
            let p = disc_to_hyperboloid(&d);
            let scale = 1.0 + tangent.iter().map(|c| c.abs()).sum::<f64>() * p.t;
            prop_assert!(minkowski_dot(&tangent, &p.as_array()).abs() < 1e-10 * scale);
        }
    }
}

// ============================================================================
// Exponential, logarithm, transport
// ============================================================================

#[cfg(test)]
mod tangent_properties {
    use super::*;

    proptest! {
        #[test]
        fn exponential_travels_tangent_norm((base, tangent) in point_and_tangent_strategy()) {
            let other = exponential(&base, &tangent).unwrap();
            let dist = hyperboloid_distance(&base, &other);
            prop_assert!((dist - tangent_norm(&tangent)).abs() < 1e-6);
            prop_assert!(other.is_on_manifold(1e-6 * other.t * other.t));
        }

        #[test]
        fn logarithm_inverts_exponential((base, tangent) in point_and_tangent_strategy()) {
            let other = exponential(&base, &tangent).unwrap();
            let log = logarithm(&base, &other).unwrap();
            prop_assert!(vectors_close(&log, &tangent, 1e-6), "{:?} vs {:?}", log, tangent);
        }

        #[test]
        fn exponential_inverts_logarithm(a in hyperboloid_point_strategy(), b in hyperboloid_point_strategy()) {
            prop_assume!(hyperboloid_distance(&a, &b) > 1e-3);
            let log = logarithm(&a, &b).unwrap();
            let back = exponential(&a, &log).unwrap();
            prop_assert!(vectors_close(&back.as_array(), &b.as_array(), 1e-6));
        }

        #[test]
        fn transport_is_isometric_and_tangent(
            (base, direction) in point_and_tangent_strategy(),
            x in -2.0..2.0_f64, y in -2.0..2.0_f64, t in -2.0..2.0_f64,
        ) {
            let tangent = project_to_tangent(&base, &[x, y, t]);
            let end = exponential(&base, &direction).unwrap();
            let moved = transport(&base, &direction, &tangent).unwrap();
            let scale = 1.0 + end.t * end.t * tangent_norm(&tangent);
            prop_assert!(minkowski_dot(&moved, &end.as_array()).abs() < 1e-8 * scale);
            prop_assert!((tangent_norm(&moved) - tangent_norm(&tangent)).abs() < 1e-8 * scale);
        }
    }
}

// ============================================================================
// Geodesic arcs
// ============================================================================

#[cfg(test)]
mod arc_properties {
    use super::*;

    proptest! {
        #[test]
        fn arc_never_reflex(a in disc_point_strategy(), b in disc_point_strategy()) {
            let det = a.x * b.y - a.y * b.x;
            prop_assume!(det.abs() > 1e-6);
            let arc = geodesic_arc(&a, &b).unwrap();
            prop_assert!(arc.span < PI);
            prop_assert!((euclidean_distance(&arc.center, &a.as_array()) - arc.radius).abs() < 1e-6 * (1.0 + arc.radius));
            prop_assert!((euclidean_distance(&arc.center, &b.as_array()) - arc.radius).abs() < 1e-6 * (1.0 + arc.radius));
        }

        #[test]
        fn segment_for_every_pair(a in disc_point_strategy(), b in disc_point_strategy()) {
            match crystal_ball::arc::geodesic_segment(&a, &b) {
                GeodesicSegment::Arc(arc) => prop_assert!(arc.span < PI),
                GeodesicSegment::Straight { from, to } => {
                    prop_assert_eq!(from, a);
                    prop_assert_eq!(to, b);
                }
            }
        }
    }
}

// ============================================================================
// Whole-scene drag
// ============================================================================

#[cfg(test)]
mod drag_properties {
    use super::*;

    fn pairwise(points: &[HyperboloidPoint]) -> Vec<f64> {
        let mut out = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                out.push(hyperboloid_distance(&points[i], &points[j]));
            }
        }
        out
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn whole_scene_drag_is_isometry(
            points in proptest::collection::vec(hyperboloid_point_strategy(), 2..8),
            cursors in proptest::collection::vec(cursor_strategy(), 2..6),
        ) {
            let before = pairwise(&points);
            let mut current = points.clone();
            for pair in cursors.windows(2) {
                if hyperboloid_distance(&pair[0], &pair[1]) <= 1e-6 {
                    continue;
                }
                current = translate_points(&current, &pair[0], &pair[1]).unwrap();
            }
            let after = pairwise(&current);
            for (a, b) in before.iter().zip(after.iter()) {
                prop_assert!((a - b).abs() < 1e-6 * (1.0 + a), "{} -> {}", a, b);
            }
        }

        #[test]
        fn drag_there_and_back_is_identity(
            points in proptest::collection::vec(hyperboloid_point_strategy(), 1..6),
            a in cursor_strategy(),
            b in cursor_strategy(),
        ) {
            prop_assume!(hyperboloid_distance(&a, &b) > 1e-3);
            let there = translate_points(&points, &a, &b).unwrap();
            let back = translate_points(&there, &b, &a).unwrap();
            for (p, q) in back.iter().zip(points.iter()) {
                prop_assert!(vectors_close(&p.as_array(), &q.as_array(), 1e-6));
            }
        }
    }
}
