//! Drag gestures on a scene
//!
//! Two mutually exclusive modes, chosen at pointer-down by whether a point
//! was hit:
//! - **Whole scene**: every point is carried by the isometry that moves the
//!   previous cursor location to the new one (log, parallel transport, exp).
//! - **Single point**: the disc displacement of the cursor from the selected
//!   point is turned into a hyperboloid tangent and exponentiated. The result
//!   is held as a tentative point until the gesture commits.
//!
//! Cursor positions arrive already mapped onto the hyperboloid; hit-testing
//! and canvas mapping live in [`crate::viewport`].

use crate::arc::{geodesic_segment, GeodesicSegment};
use crate::error::{DragError, GeometryError};
use crate::hyperbolic_models::{
    conformal_factor, disc_tangent_to_hyperboloid, hyperboloid_distance, hyperboloid_to_disc,
    tangent_norm, HyperboloidPoint, BASE_POINT,
};
use crate::scene::Scene;
use crate::tangent::{exponential, logarithm, transport};
use crate::vector::{difference, scale};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Tunables for drag gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Maximum hyperbolic distance from the base point at which dragging works.
    /// Further out a small cursor motion has too large an effect.
    pub action_radius: f64,
    /// Moves shorter than this (hyperbolic distance, or tangent norm for a
    /// single point) are ignored.
    pub distance_threshold: f64,
    /// Magnifies the displacement when dragging a single point.
    pub single_point_drag_multiplier: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            action_radius: 2.0,
            distance_threshold: 1e-6,
            single_point_drag_multiplier: 4.0,
        }
    }
}

/// State of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    /// Moving every point; `last` is where the cursor was on the previous event.
    DraggingAll { last: HyperboloidPoint },
    /// Moving point `index`; `tentative` is not yet in the scene.
    DraggingOne {
        index: usize,
        tentative: HyperboloidPoint,
    },
}

/// Outcome of a pointer-move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    /// Points (or the tentative point) moved.
    Moved,
    /// Below the stability threshold; nothing changed.
    Skipped,
    /// The cursor left the action radius and the gesture ended in place.
    Aborted,
    /// No gesture in progress.
    Ignored,
}

/// Carry every point by the isometry taking `from` to `to`.
///
/// Each point's logarithm at `from` is parallel-transported along
/// log(from, to) and re-exponentiated at `to`, so pairwise distances are
/// preserved. Fails only if `from` and `to` coincide.
pub fn translate_points(
    points: &[HyperboloidPoint],
    from: &HyperboloidPoint,
    to: &HyperboloidPoint,
) -> Result<Vec<HyperboloidPoint>, GeometryError> {
    let delta = logarithm(from, to)?;
    points
        .iter()
        .map(|point| carry_point(point, from, to, &delta))
        .collect()
}

fn carry_point(
    point: &HyperboloidPoint,
    from: &HyperboloidPoint,
    to: &HyperboloidPoint,
    delta: &[f64; 3],
) -> Result<HyperboloidPoint, GeometryError> {
    let log = match logarithm(from, point) {
        Ok(log) => log,
        // the point sits under the cursor and travels with it
        Err(GeometryError::CoincidentPoints { .. }) => return Ok(*to),
        Err(err) => return Err(err),
    };
    let transported = transport(from, delta, &log)?;
    match exponential(to, &transported) {
        Err(GeometryError::ZeroTangent { .. }) => Ok(*to),
        result => result,
    }
}

/// Hyperboloid tangent at `start` for a disc-plane displacement of its image.
///
/// The displacement is scaled by the conformal factor (1 - |z|²)/2 so that the
/// resulting tangent's hyperbolic length equals the displacement's Euclidean
/// length, then pushed forward onto the hyperboloid.
pub fn single_point_tangent(start: &HyperboloidPoint, disc_displacement: &[f64; 2]) -> [f64; 3] {
    let start_disc = hyperboloid_to_disc(start);
    let disc_tangent = scale(conformal_factor(&start_disc), disc_displacement);
    disc_tangent_to_hyperboloid(&start_disc, &disc_tangent)
}

/// Owns the drag session and applies pointer events to a [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct DragController {
    config: DragConfig,
    session: DragSession,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: DragSession::Idle,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session != DragSession::Idle
    }

    /// Index of the point being dragged, if any.
    pub fn selected(&self) -> Option<usize> {
        match self.session {
            DragSession::DraggingOne { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Where the selected point has been dragged to, if any.
    pub fn tentative_point(&self) -> Option<HyperboloidPoint> {
        match self.session {
            DragSession::DraggingOne { tentative, .. } => Some(tentative),
            _ => None,
        }
    }

    /// Start a gesture. `hit` is the index of the point under the cursor.
    ///
    /// Refused when the cursor is beyond the action radius; any previous
    /// session is discarded either way.
    pub fn pointer_down(
        &mut self,
        scene: &Scene,
        cursor: HyperboloidPoint,
        hit: Option<usize>,
    ) -> Result<(), DragError> {
        self.session = DragSession::Idle;

        let distance = hyperboloid_distance(&BASE_POINT, &cursor);
        if distance > self.config.action_radius {
            warn!(
                distance,
                action_radius = self.config.action_radius,
                "Drag refused: cursor outside action radius"
            );
            return Err(DragError::OutsideActionRadius {
                distance,
                action_radius: self.config.action_radius,
            });
        }

        self.session = match hit {
            Some(index) => {
                let point = scene.point(index).ok_or(DragError::InvalidSelection {
                    index,
                    len: scene.len(),
                })?;
                debug!(index, "Dragging single point");
                DragSession::DraggingOne {
                    index,
                    tentative: *point,
                }
            }
            None => {
                debug!(cursor = %cursor, "Dragging whole scene");
                DragSession::DraggingAll { last: cursor }
            }
        };
        Ok(())
    }

    /// Apply a cursor motion to the active gesture.
    pub fn pointer_move(&mut self, scene: &mut Scene, cursor: HyperboloidPoint) -> DragUpdate {
        match self.session {
            DragSession::Idle => DragUpdate::Ignored,
            DragSession::DraggingAll { last } => self.move_all(scene, last, cursor),
            DragSession::DraggingOne { index, .. } => self.move_one(scene, index, cursor),
        }
    }

    fn move_all(&mut self, scene: &mut Scene, last: HyperboloidPoint, cursor: HyperboloidPoint) -> DragUpdate {
        let from_base = hyperboloid_distance(&BASE_POINT, &cursor);
        if from_base > self.config.action_radius {
            warn!(
                distance = from_base,
                action_radius = self.config.action_radius,
                "Drag aborted: cursor left action radius"
            );
            self.session = DragSession::Idle;
            return DragUpdate::Aborted;
        }

        let step = hyperboloid_distance(&last, &cursor);
        if step <= self.config.distance_threshold {
            debug!(step, "Whole-scene move below threshold, skipped");
            return DragUpdate::Skipped;
        }

        match translate_points(scene.points(), &last, &cursor) {
            Ok(points) => {
                scene.replace_points(points);
                self.session = DragSession::DraggingAll { last: cursor };
                DragUpdate::Moved
            }
            Err(err) => {
                warn!(error = %err, "Whole-scene move failed, skipped");
                DragUpdate::Skipped
            }
        }
    }

    fn move_one(&mut self, scene: &Scene, index: usize, cursor: HyperboloidPoint) -> DragUpdate {
        let Some(start) = scene.point(index).copied() else {
            warn!(index, "Selected point vanished from scene, drag aborted");
            self.session = DragSession::Idle;
            return DragUpdate::Aborted;
        };

        let start_disc = hyperboloid_to_disc(&start);
        let cursor_disc = hyperboloid_to_disc(&cursor);
        let disc_displacement = scale(
            self.config.single_point_drag_multiplier,
            &difference(&cursor_disc.as_array(), &start_disc.as_array()),
        );
        let tangent = single_point_tangent(&start, &disc_displacement);

        let length = tangent_norm(&tangent);
        if length <= self.config.distance_threshold {
            debug!(index, length, "Single-point move below threshold, skipped");
            return DragUpdate::Skipped;
        }

        match exponential(&start, &tangent) {
            Ok(tentative) => {
                self.session = DragSession::DraggingOne { index, tentative };
                DragUpdate::Moved
            }
            Err(err) => {
                warn!(index, error = %err, "Single-point move failed, skipped");
                DragUpdate::Skipped
            }
        }
    }

    /// End the gesture, committing a single-point drag to the scene.
    /// Returns the index of the committed point.
    pub fn pointer_up(&mut self, scene: &mut Scene) -> Option<usize> {
        match std::mem::take(&mut self.session) {
            DragSession::DraggingOne { index, tentative } if index < scene.len() => {
                scene.set_point(index, tentative);
                info!(index, point = %tentative, "Committed single-point drag");
                Some(index)
            }
            _ => None,
        }
    }

    /// The cursor left the canvas; treated like pointer-up.
    pub fn pointer_leave(&mut self, scene: &mut Scene) -> Option<usize> {
        self.pointer_up(scene)
    }

    /// Drop the gesture without committing anything.
    pub fn abandon(&mut self) {
        if let DragSession::DraggingOne { index, .. } = self.session {
            debug!(index, "Discarding tentative point");
        }
        self.session = DragSession::Idle;
    }

    /// Geodesic from the selected point to its tentative location, for drawing
    /// while the gesture is in progress.
    pub fn tentative_segment(&self, scene: &Scene) -> Option<GeodesicSegment> {
        let DragSession::DraggingOne { index, tentative } = self.session else {
            return None;
        };
        let start = scene.point(index)?;
        Some(geodesic_segment(
            &hyperboloid_to_disc(start),
            &hyperboloid_to_disc(&tentative),
        ))
    }
}
