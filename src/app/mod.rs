//! Application-Layer: Edit-Session, Constraints, Snap, Hit-Testing und Vorschau.

pub mod constraints;
pub mod edit_log;
pub mod events;
pub mod host;
pub mod locator;
pub mod preview;
pub mod script;
/// Edit-Session
///
/// Zustandsautomat, der Eingabe-Events in bestätigte Punkt-Änderungen und
/// Vorschau-Frames übersetzt.
pub mod session;
pub mod snap;

pub use constraints::{Acceptance, ConstraintKind, ConstraintSet, CurveId, CursorConstraint};
pub use edit_log::{EditCommand, EditLog};
pub use events::{ArrowKey, InputEvent, Modifiers};
pub use host::{
    CurveBuilder, PointerSource, PolylineBuilder, PreviewRenderer, SessionHost, SessionObserver,
};
pub use locator::{insertion_slot, locate, InsertionSlot, Located};
pub use preview::{render_frame, PreviewMutation, Tentative};
pub use script::{ReplayScript, ScriptStep, ScriptedPointerSource};
pub use session::{run_session, CurveEditSession, SessionEnd, SessionMode, SessionState};
pub use snap::SnapEngine;
