use std::sync::Arc;

use anyhow::bail;
use approx::assert_relative_eq;
use glam::{Vec2, Vec3};

use super::{CurveEditSession, SessionEnd, SessionMode, SessionState};
use crate::app::constraints::ConstraintSet;
use crate::app::edit_log::EditCommand;
use crate::app::events::{ArrowKey, InputEvent, Modifiers};
use crate::app::host::{
    CurveBuilder, PolylineBuilder, PreviewRenderer, SessionHost, SessionObserver,
};
use crate::app::script::{ScriptStep, ScriptedPointerSource};
use crate::app::snap::SnapEngine;
use crate::core::{
    ConstraintPlane, EditRejection, GuideCurve, PlaneAxis, PlaneRotation, Polyline, TopViewport,
};
use crate::shared::CurveEditOptions;

// ── Hilfen ──

#[derive(Default)]
struct FrameCounter {
    frames: usize,
    last_points: Vec<Vec3>,
}

impl<C> PreviewRenderer<C> for FrameCounter {
    fn show_preview(&mut self, _curve: Option<&C>, points: &[Vec3]) {
        self.frames += 1;
        self.last_points = points.to_vec();
    }
}

#[derive(Default)]
struct ChangeCounter {
    changes: usize,
    draws: usize,
}

impl SessionObserver for ChangeCounter {
    fn on_point_list_changed(&mut self, _points: &[Vec3]) {
        self.changes += 1;
    }

    fn on_dynamic_draw(&mut self, _cursor: Vec3) {
        self.draws += 1;
    }
}

struct Outcome {
    result: anyhow::Result<Option<Polyline>>,
    source: ScriptedPointerSource,
    renderer: FrameCounter,
    observer: ChangeCounter,
}

fn viewport() -> TopViewport {
    TopViewport::new(Vec2::new(800.0, 600.0))
}

fn drive(session: &mut CurveEditSession, steps: Vec<ScriptStep>) -> Outcome {
    let mut source = ScriptedPointerSource::new(steps);
    let viewport = viewport();
    let mut renderer = FrameCounter::default();
    let mut observer = ChangeCounter::default();
    let result = {
        let mut host = SessionHost {
            input: &mut source,
            viewport: &viewport,
            builder: &PolylineBuilder,
            renderer: &mut renderer,
            observer: Some(&mut observer),
        };
        session.run(&mut host)
    };
    Outcome {
        result,
        source,
        renderer,
        observer,
    }
}

const ADD: Modifiers = Modifiers {
    add: true,
    remove: false,
    no_snap: false,
};
const REMOVE: Modifiers = Modifiers {
    add: false,
    remove: true,
    no_snap: false,
};
const NO_SNAP: Modifiers = Modifiers {
    add: false,
    remove: false,
    no_snap: true,
};

fn v(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, 0.0)
}

fn point(x: f32, y: f32) -> ScriptStep {
    ScriptStep::plain(InputEvent::Point(v(x, y)))
}

fn down(x: f32, y: f32, modifiers: Modifiers) -> ScriptStep {
    ScriptStep::with(InputEvent::PointerDown(v(x, y)), modifiers)
}

fn moved(x: f32, y: f32) -> ScriptStep {
    ScriptStep::plain(InputEvent::PointerMoved(v(x, y)))
}

fn step(event: InputEvent) -> ScriptStep {
    ScriptStep::plain(event)
}

fn line(from: Vec3, to: Vec3) -> Arc<dyn GuideCurve> {
    Arc::new(Polyline::open(vec![from, to]))
}

fn new_curve(constraints: ConstraintSet, snaps: SnapEngine) -> CurveEditSession {
    CurveEditSession::new_curve(constraints, snaps, CurveEditOptions::default())
}

fn edit(points: Vec<Vec3>, closed: bool, options: CurveEditOptions) -> CurveEditSession {
    CurveEditSession::new(
        SessionMode::EditCurve { closed },
        points,
        ConstraintSet::new(),
        SnapEngine::default(),
        options,
    )
    .expect("gültige Edit-Session")
}

fn row() -> Vec<Vec3> {
    vec![v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0)]
}

fn square() -> Vec<Vec3> {
    vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)]
}

// ── Neue Kurve ──

#[test]
fn test_new_curve_appends_points_and_confirms() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let out = drive(
        &mut session,
        vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            step(InputEvent::Confirm),
        ],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points, vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)]);
    assert!(!curve.closed);
    assert_eq!(session.end(), Some(SessionEnd::Confirmed));
    assert_eq!(session.state(), SessionState::Done);
    assert_eq!(session.edit_log().len(), 3);
    assert_eq!(out.observer.changes, 3);
    assert_eq!(out.source.constrain_calls(), 1);
}

#[test]
fn test_preview_frames_do_not_commit_cursor_point() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let out = drive(
        &mut session,
        vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            moved(11.0, 1.0),
            moved(12.0, 2.0),
            moved(13.0, 3.0),
            moved(14.0, 4.0),
            moved(15.0, 5.0),
            step(InputEvent::Confirm),
        ],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points.len(), 2);
    assert_eq!(out.renderer.frames, 5);
    assert_eq!(out.observer.draws, 5);
    assert_eq!(out.renderer.last_points.len(), 3);
    assert_eq!(out.renderer.last_points[2], v(15.0, 5.0));
}

#[test]
fn test_undo_stops_at_single_point() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let out = drive(
        &mut session,
        vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(20.0, 0.0),
            step(InputEvent::Undo),
            step(InputEvent::Undo),
            step(InputEvent::Undo),
            step(InputEvent::Confirm),
        ],
    );

    // Ein Punkt reicht für keine Kurve
    assert!(out.result.unwrap().is_none());
    assert_eq!(session.points().points(), &[v(0.0, 0.0)]);
    let undone = session
        .edit_log()
        .entries()
        .iter()
        .filter(|c| matches!(c, EditCommand::Undone { .. }))
        .count();
    assert_eq!(undone, 2);
}

#[test]
fn test_max_points_completes_session() {
    let mut session =
        new_curve(ConstraintSet::new(), SnapEngine::default()).with_max_points(Some(2));
    let out = drive(
        &mut session,
        vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(20.0, 0.0),
            step(InputEvent::Confirm),
        ],
    );

    assert_eq!(out.result.unwrap().expect("Kurve erwartet").points.len(), 2);
    assert_eq!(session.end(), Some(SessionEnd::Completed));
    assert_eq!(out.source.remaining(), 2);
}

#[test]
fn test_object_picked_keeps_points() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let out = drive(
        &mut session,
        vec![
            point(0.0, 0.0),
            point(5.0, 5.0),
            step(InputEvent::ObjectPicked),
        ],
    );
    assert_eq!(out.result.unwrap().expect("Kurve erwartet").points.len(), 2);
    assert_eq!(session.end(), Some(SessionEnd::ObjectPicked));
}

#[test]
fn test_cancel_discards_and_string_input_is_ignored() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let out = drive(
        &mut session,
        vec![
            point(0.0, 0.0),
            step(InputEvent::StringInput("Grad 5".into())),
            point(10.0, 0.0),
            step(InputEvent::Cancel),
        ],
    );
    assert!(out.result.unwrap().is_none());
    assert_eq!(session.state(), SessionState::Cancelled);
    assert_eq!(session.points().len(), 2);
}

#[test]
fn test_exhausted_script_cancels_session() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let out = drive(&mut session, vec![point(0.0, 0.0), point(1.0, 0.0)]);
    assert!(out.result.unwrap().is_none());
    assert_eq!(session.end(), Some(SessionEnd::Cancelled));
}

// ── Constraints und Snap ──

#[test]
fn test_unique_curves_anchor_one_point_each() {
    let mut constraints = ConstraintSet::new();
    constraints.register_curves([
        line(v(0.0, 0.0), v(10.0, 0.0)),
        line(v(0.0, 0.0), v(0.0, 10.0)),
    ]);
    let options = CurveEditOptions {
        unique_curves: true,
        ..CurveEditOptions::default()
    };
    let mut session = CurveEditSession::new_curve(constraints, SnapEngine::default(), options);

    let out = drive(
        &mut session,
        vec![
            point(5.0, 0.0),
            point(6.0, 0.0),
            point(3.0, 3.0),
            point(0.0, 5.0),
            step(InputEvent::Confirm),
        ],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points, vec![v(5.0, 0.0), v(0.0, 5.0)]);
    assert_eq!(session.constraints().curve_count(), 0);
}

#[test]
fn test_undo_frees_guide_curve_for_next_point() {
    let mut constraints = ConstraintSet::new();
    constraints.register_curves([
        line(v(0.0, 0.0), v(10.0, 0.0)),
        line(v(0.0, 0.0), v(0.0, 10.0)),
    ]);
    let options = CurveEditOptions {
        unique_curves: true,
        ..CurveEditOptions::default()
    };
    let mut session = CurveEditSession::new_curve(constraints, SnapEngine::default(), options);

    let out = drive(
        &mut session,
        vec![
            point(5.0, 0.0),
            point(0.0, 5.0),
            step(InputEvent::Undo),
            point(0.0, 6.0),
            step(InputEvent::Confirm),
        ],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points, vec![v(5.0, 0.0), v(0.0, 6.0)]);
    assert_eq!(session.constraints().curve_count(), 0);
}

#[test]
fn test_delete_and_grab_free_guide_curve_in_edit_mode() {
    let mut constraints = ConstraintSet::new();
    constraints.register_curves([line(v(0.0, 0.0), v(20.0, 0.0))]);
    let options = CurveEditOptions {
        unique_curves: true,
        ..CurveEditOptions::default()
    };
    let mut session = CurveEditSession::new(
        SessionMode::EditCurve { closed: false },
        vec![v(0.0, 20.0), v(20.0, 20.0)],
        constraints,
        SnapEngine::default(),
        options,
    )
    .expect("gültige Edit-Session");

    let out = drive(
        &mut session,
        vec![
            down(12.0, 0.0, ADD),
            down(12.0, 0.0, REMOVE),
            down(8.0, 0.0, ADD),
            // Ablegen neben der Kurve: Punkt bleibt und bleibt verankert
            down(8.0, 0.0, Modifiers::default()),
            point(8.0, 5.0),
            down(8.0, 0.0, Modifiers::default()),
            point(15.0, 0.0),
            step(InputEvent::Confirm),
        ],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points, vec![v(0.0, 20.0), v(15.0, 0.0), v(20.0, 20.0)]);
    assert_eq!(session.constraints().curve_count(), 0);
}

#[test]
fn test_closing_click_does_not_consume_guide_curve() {
    let mut constraints = ConstraintSet::new();
    constraints.register_plane(ConstraintPlane::world_xy(Vec3::ZERO));
    constraints.register_curves([line(v(-5.0, 0.2), v(5.0, 0.2))]);
    let options = CurveEditOptions {
        unique_curves: true,
        ..CurveEditOptions::default()
    };
    let mut session = CurveEditSession::new_curve(constraints, SnapEngine::default(), options);

    let out = drive(
        &mut session,
        vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 0.2),
        ],
    );

    let curve = out.result.unwrap().expect("geschlossene Kurve erwartet");
    assert!(curve.closed);
    assert_eq!(curve.points.len(), 4);
    assert_eq!(curve.points[3], v(0.0, 0.0));
    assert_eq!(session.constraints().curve_count(), 1);
    assert_eq!(session.edit_log().last(), Some(&EditCommand::Closed));
}

#[test]
fn test_snap_curve_attracts_unless_no_snap_held() {
    let snaps = SnapEngine::new(vec![line(v(-10.0, 1.0), v(10.0, 1.0))]);
    let mut session = new_curve(ConstraintSet::new(), snaps);

    let out = drive(
        &mut session,
        vec![
            point(3.0, 0.5),
            ScriptStep::with(InputEvent::Point(v(4.0, 0.5)), NO_SNAP),
            step(InputEvent::Confirm),
        ],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_relative_eq!(curve.points[0].y, 1.0, epsilon = 1e-5);
    assert_relative_eq!(curve.points[0].x, 3.0, epsilon = 1e-5);
    assert_eq!(curve.points[1], v(4.0, 0.5));
}

#[test]
fn test_guide_curves_suppress_snapping() {
    let mut constraints = ConstraintSet::new();
    constraints.register_plane(ConstraintPlane::world_xy(Vec3::ZERO));
    constraints.register_curves([line(v(0.0, 0.0), v(10.0, 0.0))]);
    let snaps = SnapEngine::new(vec![line(v(-10.0, 1.0), v(10.0, 1.0))]);
    let mut session = new_curve(constraints, snaps);

    let out = drive(
        &mut session,
        vec![point(3.0, 0.5), point(5.0, 0.0), step(InputEvent::Confirm)],
    );

    // Ebene + Kurven: Punkte neben der Kurve sind erlaubt, aber es wird nicht gesnappt
    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points, vec![v(3.0, 0.5), v(5.0, 0.0)]);
}

#[test]
fn test_keyboard_rotation_turns_plane_and_points() {
    let mut constraints = ConstraintSet::new();
    constraints.register_plane(ConstraintPlane::world_xy(Vec3::ZERO));
    let mut session = new_curve(constraints, SnapEngine::default());

    let out = drive(
        &mut session,
        vec![
            point(10.0, 0.0),
            step(InputEvent::RotatePlane {
                key: ArrowKey::Left,
                large_step: true,
            }),
            step(InputEvent::Confirm),
        ],
    );
    assert!(out.result.is_ok());

    let p = session.points().points()[0];
    assert_relative_eq!(p.length(), 10.0, epsilon = 1e-4);
    assert_relative_eq!(p.z.abs(), 10.0 * 5f32.to_radians().sin(), epsilon = 1e-4);
    let plane = session.constraints().plane().expect("Ebene erwartet");
    assert!(plane.distance_to(p) < 1e-4);
    assert_eq!(out.source.constrain_calls(), 2);
    assert_eq!(
        session.edit_log().last(),
        Some(&EditCommand::PlaneRotated(PlaneRotation {
            axis: PlaneAxis::Y,
            degrees: -5.0
        }))
    );
}

#[test]
fn test_rotation_without_plane_is_ignored() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let out = drive(
        &mut session,
        vec![
            point(10.0, 0.0),
            step(InputEvent::RotatePlane {
                key: ArrowKey::Up,
                large_step: false,
            }),
            step(InputEvent::Confirm),
        ],
    );
    assert!(out.result.is_ok());
    assert_eq!(session.points().points(), &[v(10.0, 0.0)]);
    assert_eq!(out.source.constrain_calls(), 1);
}

// ── Bearbeiten ──

#[test]
fn test_edit_session_rejects_empty_or_degenerate_input() {
    let empty = CurveEditSession::new(
        SessionMode::EditCurve { closed: false },
        Vec::new(),
        ConstraintSet::new(),
        SnapEngine::default(),
        CurveEditOptions::default(),
    );
    assert_eq!(empty.err(), Some(EditRejection::NothingToEdit));

    let two = CurveEditSession::new(
        SessionMode::EditCurve { closed: true },
        vec![v(0.0, 0.0), v(1.0, 0.0)],
        ConstraintSet::new(),
        SnapEngine::default(),
        CurveEditOptions::default(),
    );
    assert_eq!(two.err(), Some(EditRejection::DegenerateCurve));
}

#[test]
fn test_grab_move_release_commits_new_position() {
    let mut session = edit(row(), false, CurveEditOptions::default());
    let out = drive(
        &mut session,
        vec![
            down(10.0, 0.2, Modifiers::default()),
            moved(10.0, 5.0),
            point(10.0, 5.0),
            step(InputEvent::Confirm),
        ],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points[1], v(10.0, 5.0));
    assert_eq!(out.source.grid_snap_toggles(), &[false, true]);
    assert!(out.source.grid_snap_enabled());
    assert_eq!(out.renderer.last_points[1], v(10.0, 5.0));
    assert_eq!(
        session.edit_log().last(),
        Some(&EditCommand::Moved {
            index: 1,
            from: v(10.0, 0.0),
            to: v(10.0, 5.0)
        })
    );
}

#[test]
fn test_locked_endpoint_cannot_be_grabbed() {
    let options = CurveEditOptions {
        lock_endpoints: true,
        ..CurveEditOptions::default()
    };
    let mut session = edit(row(), false, options);
    let out = drive(
        &mut session,
        vec![
            down(0.0, 0.0, Modifiers::default()),
            point(5.0, 5.0),
            step(InputEvent::Confirm),
        ],
    );

    assert_eq!(out.result.unwrap().expect("Kurve erwartet").points, row());
    assert!(out.source.grid_snap_toggles().is_empty());
}

#[test]
fn test_pick_radius_limits_grab() {
    let options = CurveEditOptions {
        pick_radius_px: Some(5.0),
        ..CurveEditOptions::default()
    };
    let mut session = edit(row(), false, options);
    let out = drive(
        &mut session,
        vec![
            down(5.0, 5.0, Modifiers::default()),
            point(5.0, 5.0),
            step(InputEvent::Confirm),
        ],
    );
    assert_eq!(out.result.unwrap().expect("Kurve erwartet").points, row());
    assert!(out.source.grid_snap_toggles().is_empty());
}

#[test]
fn test_release_off_guide_curve_reverts_move() {
    let mut constraints = ConstraintSet::new();
    constraints.register_curves([line(v(0.0, 0.0), v(30.0, 0.0))]);
    let mut session = CurveEditSession::new(
        SessionMode::EditCurve { closed: false },
        row(),
        constraints,
        SnapEngine::default(),
        CurveEditOptions::default(),
    )
    .unwrap();

    let out = drive(
        &mut session,
        vec![
            down(10.0, 0.0, Modifiers::default()),
            moved(10.0, 5.0),
            point(10.0, 5.0),
            step(InputEvent::Confirm),
        ],
    );

    assert_eq!(out.result.unwrap().expect("Kurve erwartet").points, row());
    // Vorschau zeigt den zuletzt bestätigten Stand
    assert_eq!(out.renderer.last_points[1], v(10.0, 0.0));
    assert_eq!(out.source.grid_snap_toggles(), &[false, true]);
    assert_eq!(out.observer.changes, 0);
}

#[test]
fn test_moving_first_point_of_closed_curve_mirrors_duplicate() {
    let mut session = edit(square(), true, CurveEditOptions::default());
    let out = drive(
        &mut session,
        vec![
            down(0.2, 0.2, Modifiers::default()),
            point(-1.0, -1.0),
            step(InputEvent::Confirm),
        ],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert!(curve.closed);
    assert_eq!(curve.points.len(), 5);
    assert_eq!(curve.points[0], v(-1.0, -1.0));
    assert_eq!(curve.points[4], v(-1.0, -1.0));
}

#[test]
fn test_insert_at_closing_segment_rewrites_duplicate() {
    let mut session = edit(square(), true, CurveEditOptions::default());
    let out = drive(
        &mut session,
        vec![down(-0.5, 4.0, ADD), step(InputEvent::Confirm)],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points.len(), 6);
    assert_eq!(curve.points[0], v(-0.5, 4.0));
    assert_eq!(curve.points[5], v(-0.5, 4.0));
    assert_eq!(curve.points[1], v(0.0, 0.0));
    assert_eq!(curve.points[4], v(0.0, 10.0));
}

#[test]
fn test_delete_first_point_of_closed_curve_rewrites_duplicate() {
    let pentagon = vec![
        v(0.0, 0.0),
        v(10.0, 0.0),
        v(15.0, 8.0),
        v(5.0, 15.0),
        v(-5.0, 8.0),
    ];
    let mut session = edit(pentagon, true, CurveEditOptions::default());
    let out = drive(
        &mut session,
        vec![down(0.2, 0.2, REMOVE), step(InputEvent::Confirm)],
    );

    let curve = out.result.unwrap().expect("Kurve erwartet");
    assert_eq!(curve.points.len(), 5);
    assert_eq!(curve.points[0], v(10.0, 0.0));
    assert_eq!(curve.points[4], v(10.0, 0.0));
}

#[test]
fn test_delete_on_closed_triangle_is_rejected() {
    let triangle = vec![v(0.0, 0.0), v(10.0, 0.0), v(5.0, 8.0)];
    let mut session = edit(triangle, true, CurveEditOptions::default());
    let out = drive(
        &mut session,
        vec![down(10.0, 0.0, REMOVE), step(InputEvent::Confirm)],
    );
    assert_eq!(out.result.unwrap().expect("Kurve erwartet").points.len(), 4);
    assert_eq!(out.observer.changes, 0);
}

// ── Fehlerpfade ──

struct FailingBuilder;

impl CurveBuilder for FailingBuilder {
    type Curve = ();

    fn build_curve(&self, _points: &[Vec3], degree: usize, _closed: bool) -> anyhow::Result<()> {
        bail!("Grad {degree} passt nicht zur Punktanzahl")
    }
}

#[test]
fn test_builder_failure_is_propagated() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let mut source = ScriptedPointerSource::from_events([
        InputEvent::Point(v(0.0, 0.0)),
        InputEvent::Point(v(1.0, 0.0)),
        InputEvent::Confirm,
    ]);
    let viewport = viewport();
    let mut renderer = FrameCounter::default();
    let mut host = SessionHost {
        input: &mut source,
        viewport: &viewport,
        builder: &FailingBuilder,
        renderer: &mut renderer,
        observer: None,
    };

    let result = session.run(&mut host);
    assert!(result.is_err());
    assert_eq!(session.points().len(), 2);
}

/// Builder, der wie ein B-Spline-Builder mehr Punkte als den Grad verlangt.
#[derive(Default)]
struct StrictBuilder {
    degrees: std::cell::RefCell<Vec<(usize, usize)>>,
}

impl CurveBuilder for StrictBuilder {
    type Curve = ();

    fn build_curve(&self, points: &[Vec3], degree: usize, _closed: bool) -> anyhow::Result<()> {
        anyhow::ensure!(
            points.len() > degree,
            "Grad {degree} braucht mehr als {degree} Punkte, erhalten: {}",
            points.len()
        );
        self.degrees.borrow_mut().push((points.len(), degree));
        Ok(())
    }
}

#[test]
fn test_degree_is_capped_for_short_preview_and_result() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let mut source = ScriptedPointerSource::new(vec![
        point(0.0, 0.0),
        moved(5.0, 0.0),
        point(5.0, 0.0),
        moved(5.0, 5.0),
        point(5.0, 5.0),
        step(InputEvent::Confirm),
    ]);
    let viewport = viewport();
    let builder = StrictBuilder::default();
    let mut renderer = FrameCounter::default();
    let result = {
        let mut host = SessionHost {
            input: &mut source,
            viewport: &viewport,
            builder: &builder,
            renderer: &mut renderer,
            observer: None,
        };
        session.run(&mut host)
    };

    assert_eq!(result.unwrap(), Some(()));
    assert_eq!(renderer.frames, 2);
    assert_eq!(builder.degrees.into_inner(), vec![(2, 1), (3, 2), (3, 2)]);
}

#[test]
fn test_events_after_end_are_ignored() {
    let mut session = new_curve(ConstraintSet::new(), SnapEngine::default());
    let mut source = ScriptedPointerSource::default();
    let viewport = viewport();
    let mut renderer = FrameCounter::default();
    let mut host = SessionHost {
        input: &mut source,
        viewport: &viewport,
        builder: &PolylineBuilder,
        renderer: &mut renderer,
        observer: None,
    };

    session
        .handle_event(InputEvent::Cancel, Modifiers::default(), &mut host)
        .unwrap();
    session
        .handle_event(InputEvent::Point(Vec3::ONE), Modifiers::default(), &mut host)
        .unwrap();

    assert!(session.points().is_empty());
    assert_eq!(session.state(), SessionState::Cancelled);
}
