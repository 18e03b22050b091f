//! Scripted drag session over a scene, exported as JSON.
//!
//! Loads a scene (the built-in four-cycle by default), drags the whole scene
//! along a short cursor path, then drags one point, and prints the resulting
//! coordinates and edge geodesics for a disc renderer.
//!
//! Usage:
//!   crystal_ball [--points FILE --edges FILE [--disc]] [--config FILE]
//!                [--log-format pretty|json] [--output FILE]

use crystal_ball::drag::{DragConfig, DragController, DragUpdate};
use crystal_ball::hyperbolic_models::hyperboloid_to_disc;
use crystal_ball::parsing::parse_scene;
use crystal_ball::scene::{EdgeSegment, Scene};
use crystal_ball::telemetry::{init_logging, LogFormat};
use crystal_ball::viewport::Viewport;
use crystal_ball::{DiscPoint, HyperboloidPoint};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

const CANVAS_WIDTH_PX: f64 = 600.0;

#[derive(Debug, Default)]
struct Args {
    points: Option<String>,
    edges: Option<String>,
    disc: bool,
    config: Option<String>,
    log_format: LogFormat,
    output: Option<String>,
}

/// Everything the binary can be configured with from a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SessionConfig {
    drag: DragConfig,
    viewport: Option<Viewport>,
}

#[derive(Serialize)]
struct GestureSummary {
    kind: &'static str,
    moved: usize,
    skipped: usize,
    aborted: bool,
    committed: Option<usize>,
}

#[derive(Serialize)]
struct SceneExport {
    gestures: Vec<GestureSummary>,
    hyperboloid_points: Vec<HyperboloidPoint>,
    disc_points: Vec<DiscPoint>,
    edges: Vec<EdgeSegment>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--points" => args.points = iter.next(),
            "--edges" => args.edges = iter.next(),
            "--disc" => args.disc = true,
            "--config" => args.config = iter.next(),
            "--output" => args.output = iter.next(),
            "--log-format" => {
                let value = iter.next().ok_or("--log-format needs a value")?;
                args.log_format = value.parse()?;
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(args)
}

fn load_scene(args: &Args) -> Result<Scene, Box<dyn std::error::Error>> {
    match (&args.points, &args.edges) {
        (Some(points), Some(edges)) => {
            let points_text = std::fs::read_to_string(points)?;
            let edges_text = std::fs::read_to_string(edges)?;
            Ok(parse_scene(&points_text, &edges_text, args.disc)?)
        }
        (None, None) => Ok(Scene::default_scene()),
        _ => Err("--points and --edges must be given together".into()),
    }
}

fn load_config(args: &Args) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    match &args.config {
        Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => Ok(SessionConfig::default()),
    }
}

/// Press at `from`, move through `path`, release.
fn run_gesture(
    kind: &'static str,
    drag: &mut DragController,
    viewport: &Viewport,
    scene: &mut Scene,
    from: [f64; 2],
    path: &[[f64; 2]],
) -> GestureSummary {
    let mut summary = GestureSummary {
        kind,
        moved: 0,
        skipped: 0,
        aborted: false,
        committed: None,
    };

    let Some(cursor) = viewport.cursor_to_hyperboloid(&from) else {
        tracing::warn!(?from, "Press outside the disc ignored");
        return summary;
    };
    let hit = viewport.hit_test(scene, &from);
    if let Err(err) = drag.pointer_down(scene, cursor, hit) {
        tracing::warn!(error = %err, "Gesture not started");
        return summary;
    }

    for coords in path {
        let Some(cursor) = viewport.cursor_to_hyperboloid(coords) else {
            // off the disc counts as leaving the canvas
            summary.committed = drag.pointer_leave(scene);
            return summary;
        };
        match drag.pointer_move(scene, cursor) {
            DragUpdate::Moved => summary.moved += 1,
            DragUpdate::Skipped => summary.skipped += 1,
            DragUpdate::Aborted => summary.aborted = true,
            DragUpdate::Ignored => {}
        }
    }
    summary.committed = drag.pointer_up(scene);
    summary
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;
    init_logging(args.log_format);

    let mut scene = load_scene(&args)?;
    let config = load_config(&args)?;
    let viewport = config
        .viewport
        .unwrap_or_else(|| Viewport::new(CANVAS_WIDTH_PX));
    let mut drag = DragController::new(config.drag);

    tracing::info!(points = scene.len(), edges = scene.edges().len(), "Scene loaded");

    let mut gestures = Vec::new();

    // Whole-scene drag from near the centre, avoiding any point.
    let centre = viewport.disc_to_canvas(&DiscPoint::origin());
    let start = [centre[0] + 3.0, centre[1] - 3.0];
    let path: Vec<[f64; 2]> = (1..=12)
        .map(|i| [start[0] + 5.0 * i as f64, start[1] + 2.5 * i as f64])
        .collect();
    gestures.push(run_gesture("whole_scene", &mut drag, &viewport, &mut scene, start, &path));

    // Single-point drag of the point closest to the centre.
    if let Some(index) = (0..scene.len()).min_by(|&a, &b| {
        let da = scene.points()[a].t;
        let db = scene.points()[b].t;
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    }) {
        let at = viewport.disc_to_canvas(&hyperboloid_to_disc(&scene.points()[index]));
        let path: Vec<[f64; 2]> = (1..=5).map(|i| [at[0] - 4.0 * i as f64, at[1]]).collect();
        gestures.push(run_gesture("single_point", &mut drag, &viewport, &mut scene, at, &path));
    }

    let export = SceneExport {
        gestures,
        hyperboloid_points: scene.points().to_vec(),
        disc_points: scene.disc_points(),
        edges: scene.edge_segments(),
    };
    let json = serde_json::to_string_pretty(&export)?;

    match &args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json.as_bytes())?;
            tracing::info!(path = %path, "Exported scene");
        }
        None => println!("{}", json),
    }

    Ok(())
}
