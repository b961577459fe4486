//! Geteilte Konfiguration für `core`, `app` und die Replay-Binary.

pub mod options;

pub use options::CurveEditOptions;
pub use options::{CLOSE_TOLERANCE, CURVE_TOLERANCE, SNAP_TOLERANCE};
