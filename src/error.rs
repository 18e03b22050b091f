//! Error types for the geometry kernel, scene validation and drag gestures.

use thiserror::Error;

/// Degenerate geometric input handed to the kernel.
///
/// Callers either guard against these with the stability thresholds or catch
/// and suppress them (e.g. draw a degenerate edge as a straight segment).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("tangent vector too short to exponentiate (norm {norm:e})")]
    ZeroTangent { norm: f64 },

    #[error("logarithm of coincident points (separation {separation:e})")]
    CoincidentPoints { separation: f64 },

    #[error("points are collinear with the disc origin (determinant {determinant:e})")]
    CollinearWithOrigin { determinant: f64 },
}

/// Validation errors raised while building a scene from user input.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Points not valid JSON: {0}")]
    PointsJson(#[source] serde_json::Error),

    #[error("Points input must be an array of points.")]
    PointsNotArray,

    #[error("Point {index} has length {found}, should be {expected}.")]
    PointLength {
        index: usize,
        found: usize,
        expected: usize,
    },

    #[error("Point {index} has a non-numeric co-ordinate.")]
    NonNumeric { index: usize },

    #[error("Point {index} is outside of the Poincaré disc!")]
    OutsideDisc { index: usize },

    #[error("Point {index} has Minkowski dot product {mdp} != -1.")]
    OffHyperboloid { index: usize, mdp: f64 },

    #[error("Point {index} lies on the lower sheet of the hyperboloid.")]
    LowerSheet { index: usize },

    #[error("Edges not valid JSON: {0}")]
    EdgesJson(#[source] serde_json::Error),

    #[error("Edges list should be an array.")]
    EdgesNotArray,

    #[error("Edge {index} should be an array of length 2.")]
    EdgeShape { index: usize },

    #[error("Edge index {value} is not an integer!")]
    EdgeNotInteger { value: String },

    #[error("Edge index {value} is out of range (use 0-offset).")]
    EdgeOutOfRange { value: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons a drag gesture refuses to start.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DragError {
    #[error("cursor is {distance:.3} from the base point, beyond the action radius {action_radius}")]
    OutsideActionRadius { distance: f64, action_radius: f64 },

    #[error("selected index {index} is out of range for a scene of {len} points")]
    InvalidSelection { index: usize, len: usize },
}
