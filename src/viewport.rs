//! Canvas mapping for the disc
//!
//! The disc is drawn in a square canvas of side `2 * canvas_radius_px`, with
//! the canvas y axis pointing down. This is the renderer-facing side of the
//! kernel: cursor pixels to hyperboloid points, hit-testing, point sizes.

use crate::hyperbolic_models::{disc_to_hyperboloid, hyperboloid_distance, hyperboloid_to_disc, HyperboloidPoint, BASE_POINT};
use crate::scene::Scene;
use crate::vector::euclidean_distance;
use crate::DiscPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The radius of the canvas disc, in pixels.
    pub canvas_radius_px: f64,
    /// Points are drawn larger near the centre; this is the largest size.
    pub max_point_size: f64,
    pub min_point_size: f64,
}

impl Viewport {
    pub fn new(canvas_width_px: f64) -> Self {
        Self {
            canvas_radius_px: canvas_width_px / 2.0,
            ..Self::default()
        }
    }

    /// Map a disc point to its canvas coordinates.
    pub fn disc_to_canvas(&self, d: &DiscPoint) -> [f64; 2] {
        [
            (1.0 + d.x) * self.canvas_radius_px,
            (1.0 - d.y) * self.canvas_radius_px,
        ]
    }

    /// Inverse of [`Viewport::disc_to_canvas`]. The result may lie outside the
    /// open disc.
    pub fn canvas_to_disc(&self, coords: &[f64; 2]) -> [f64; 2] {
        [
            coords[0] / self.canvas_radius_px - 1.0,
            -(coords[1] / self.canvas_radius_px - 1.0),
        ]
    }

    /// Hyperboloid point under the cursor, or None off the disc.
    pub fn cursor_to_hyperboloid(&self, coords: &[f64; 2]) -> Option<HyperboloidPoint> {
        DiscPoint::from_array(self.canvas_to_disc(coords)).map(|d| disc_to_hyperboloid(&d))
    }

    /// Radius in pixels of the circle depicting `point`, shrinking with its
    /// distance from the centre.
    pub fn point_radius(&self, point: &HyperboloidPoint) -> f64 {
        let dist = hyperboloid_distance(&BASE_POINT, point);
        (self.max_point_size - 2.0 * dist).max(self.min_point_size)
    }

    pub fn label_font_size(&self, point: &HyperboloidPoint) -> f64 {
        4.0 * self.point_radius(point)
    }

    /// Index of the point drawn under the cursor. Where circles overlap the
    /// highest index wins, as it is drawn on top.
    pub fn hit_test(&self, scene: &Scene, coords: &[f64; 2]) -> Option<usize> {
        scene
            .points()
            .iter()
            .enumerate()
            .filter(|(_, point)| {
                let canvas_pt = self.disc_to_canvas(&hyperboloid_to_disc(point));
                euclidean_distance(&canvas_pt, coords) <= self.point_radius(point)
            })
            .map(|(index, _)| index)
            .last()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            canvas_radius_px: 300.0,
            max_point_size: 7.0,
            min_point_size: 1.0,
        }
    }
}
