//! Parsing and validation of user-edited point and edge lists
//!
//! Both lists are JSON arrays of arrays, e.g. `[[0.1, 0.2], [-0.3, 0.0]]` for
//! disc points and `[[0, 1], [1, 2]]` for edges. Everything that reaches the
//! kernel has been through these checks.

use crate::error::SceneError;
use crate::hyperbolic_models::{disc_to_hyperboloid, minkowski_dot, HyperboloidPoint};
use crate::scene::{Edge, Scene};
use crate::DiscPoint;
use serde::Serialize;
use serde_json::Value;

/// Permitted deviation of the Minkowski self-product from -1 for input points.
pub const MDP_INPUT_TOLERANCE: f64 = 1e-9;

/// Decode a JSON array of points with `N` numeric coordinates each.
pub fn parse_points<const N: usize>(text: &str) -> Result<Vec<[f64; N]>, SceneError> {
    let value: Value = serde_json::from_str(text).map_err(SceneError::PointsJson)?;
    let Value::Array(items) = value else {
        return Err(SceneError::PointsNotArray);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let coords = match item {
                Value::Array(coords) if coords.len() == N => coords,
                Value::Array(coords) => {
                    return Err(SceneError::PointLength {
                        index,
                        found: coords.len(),
                        expected: N,
                    })
                }
                _ => {
                    return Err(SceneError::PointLength {
                        index,
                        found: 0,
                        expected: N,
                    })
                }
            };
            let mut point = [0.0; N];
            for (slot, value) in point.iter_mut().zip(coords) {
                *slot = value.as_f64().ok_or(SceneError::NonNumeric { index })?;
            }
            Ok(point)
        })
        .collect()
}

/// Decode Poincaré disc points and lift them onto the hyperboloid.
pub fn parse_disc_points(text: &str) -> Result<Vec<HyperboloidPoint>, SceneError> {
    parse_points::<2>(text)?
        .into_iter()
        .enumerate()
        .map(|(index, coords)| {
            DiscPoint::from_array(coords)
                .map(|d| disc_to_hyperboloid(&d))
                .ok_or(SceneError::OutsideDisc { index })
        })
        .collect()
}

/// Decode hyperboloid points, checking each lies on the upper sheet.
pub fn parse_hyperboloid_points(text: &str) -> Result<Vec<HyperboloidPoint>, SceneError> {
    parse_points::<3>(text)?
        .into_iter()
        .enumerate()
        .map(|(index, coords)| {
            let mdp = minkowski_dot(&coords, &coords);
            if (mdp + 1.0).abs() > MDP_INPUT_TOLERANCE {
                return Err(SceneError::OffHyperboloid { index, mdp });
            }
            if coords[2] <= 0.0 {
                return Err(SceneError::LowerSheet { index });
            }
            Ok(HyperboloidPoint::from_array(coords))
        })
        .collect()
}

/// Decode edges for a scene of `point_count` points.
pub fn parse_edges(text: &str, point_count: usize) -> Result<Vec<Edge>, SceneError> {
    let value: Value = serde_json::from_str(text).map_err(SceneError::EdgesJson)?;
    let Value::Array(items) = value else {
        return Err(SceneError::EdgesNotArray);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Array(pair) if pair.len() == 2 => {
                Ok((edge_index(&pair[0], point_count)?, edge_index(&pair[1], point_count)?))
            }
            _ => Err(SceneError::EdgeShape { index }),
        })
        .collect()
}

fn edge_index(value: &Value, point_count: usize) -> Result<usize, SceneError> {
    let integer = value
        .as_i64()
        .or_else(|| {
            // JSON like `1.0` still names an integer
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| SceneError::EdgeNotInteger {
            value: value.to_string(),
        })?;
    usize::try_from(integer)
        .ok()
        .filter(|&i| i < point_count)
        .ok_or(SceneError::EdgeOutOfRange { value: integer })
}

/// Parse a whole scene from the two text areas.
pub fn parse_scene(points_text: &str, edges_text: &str, disc_coordinates: bool) -> Result<Scene, SceneError> {
    let points = if disc_coordinates {
        parse_disc_points(points_text)?
    } else {
        parse_hyperboloid_points(points_text)?
    };
    let edges = parse_edges(edges_text, points.len())?;
    Scene::new(points, edges)
}

/// Compact JSON with one inner array per line; [`parse_points`] reads it back.
pub fn to_pretty_string<T: Serialize + ?Sized>(values: &T) -> Result<String, SceneError> {
    let json = serde_json::to_string(values)?;
    Ok(json.replace(',', ", ").replace("],", "],\n"))
}

/// The scene's points as they appear in the coordinates text area.
pub fn points_to_string(scene: &Scene, disc_coordinates: bool) -> Result<String, SceneError> {
    if disc_coordinates {
        let coords: Vec<[f64; 2]> = scene.disc_points().iter().map(DiscPoint::as_array).collect();
        to_pretty_string(&coords)
    } else {
        let coords: Vec<[f64; 3]> = scene.points().iter().map(HyperboloidPoint::as_array).collect();
        to_pretty_string(&coords)
    }
}
