//! Kurvenpunkt-Editor Library.
//! Interaktives Setzen und Bearbeiten von Kurven-Kontrollpunkten mit
//! Constraints, Snap-Kurven und Vorschau-Rollback.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    run_session, ConstraintSet, CurveBuilder, CurveEditSession, EditCommand, InputEvent,
    Modifiers, PointerSource, PolylineBuilder, PreviewRenderer, ScriptStep,
    ScriptedPointerSource, SessionEnd, SessionHost, SessionMode, SessionObserver, SessionState,
    SnapEngine,
};
pub use core::{
    ConstraintGeometry, ConstraintPlane, CurveHit, EditRejection, GuideCurve, PlaneAxis,
    PlaneRotation, PointList, Polyline, TopViewport, Viewport,
};
pub use shared::CurveEditOptions;
