//! Scene: hyperboloid points plus undirected edges
//!
//! Point indices are the stable identity used by edges and by the drag
//! session's selection. Only the drag controller writes points, and only when
//! a gesture commits.

use crate::arc::{geodesic_segment, GeodesicSegment};
use crate::error::SceneError;
use crate::hyperbolic_models::{hyperboloid_distance, minkowski_dot, HyperboloidPoint, MANIFOLD_TOLERANCE};
use crate::DiscPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Undirected edge between two point indices.
pub type Edge = (usize, usize);

/// Geodesic to stroke for one edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSegment {
    pub edge: Edge,
    pub segment: GeodesicSegment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    points: Vec<HyperboloidPoint>,
    edges: Vec<Edge>,
}

impl Scene {
    /// Build a scene, checking that every point is on the hyperboloid and
    /// every edge index is in range.
    pub fn new(points: Vec<HyperboloidPoint>, edges: Vec<Edge>) -> Result<Self, SceneError> {
        for (index, point) in points.iter().enumerate() {
            let mdp = minkowski_dot(&point.as_array(), &point.as_array());
            if (mdp + 1.0).abs() > MANIFOLD_TOLERANCE {
                return Err(SceneError::OffHyperboloid { index, mdp });
            }
            if point.t <= 0.0 {
                return Err(SceneError::LowerSheet { index });
            }
        }
        for &(a, b) in &edges {
            for value in [a, b] {
                if value >= points.len() {
                    return Err(SceneError::EdgeOutOfRange {
                        value: i64::try_from(value).unwrap_or(i64::MAX),
                    });
                }
            }
        }
        Ok(Self { points, edges })
    }

    /// Four points joined in a cycle.
    pub fn default_scene() -> Self {
        Self {
            points: vec![
                HyperboloidPoint { x: -0.5139410485506484, y: 1.3264616271459857, t: 1.7388605032252031 },
                HyperboloidPoint { x: 3.616672196267621, y: -0.3840845824324792, t: 3.771980745141395 },
                HyperboloidPoint { x: 0.517764655819748, y: -0.33788191884747387, t: 1.175688917146378 },
                HyperboloidPoint { x: 0.16125537933307643, y: -1.723787151044124, t: 1.9993612578693323 },
            ],
            edges: vec![(0, 1), (1, 2), (2, 3), (3, 0)],
        }
    }

    pub fn points(&self) -> &[HyperboloidPoint] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn point(&self, index: usize) -> Option<&HyperboloidPoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Hyperbolic distance between two points of the scene.
    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        Some(hyperboloid_distance(self.point(a)?, self.point(b)?))
    }

    /// The points in Poincaré disc coordinates.
    pub fn disc_points(&self) -> Vec<DiscPoint> {
        self.points.iter().map(crate::hyperbolic_models::hyperboloid_to_disc).collect()
    }

    /// Geodesic segment for every edge. Edges whose endpoints sit on a common
    /// diameter come back as straight segments.
    pub fn edge_segments(&self) -> Vec<EdgeSegment> {
        let disc = self.disc_points();
        self.edges
            .iter()
            .map(|&(a, b)| {
                let segment = geodesic_segment(&disc[a], &disc[b]);
                if let GeodesicSegment::Straight { .. } = segment {
                    debug!(from = a, to = b, "edge lies on a diameter, drawing straight");
                }
                EdgeSegment { edge: (a, b), segment }
            })
            .collect()
    }

    pub(crate) fn replace_points(&mut self, points: Vec<HyperboloidPoint>) {
        debug_assert_eq!(points.len(), self.points.len());
        self.points = points;
    }

    pub(crate) fn set_point(&mut self, index: usize, point: HyperboloidPoint) {
        self.points[index] = point;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::default_scene()
    }
}
