//! Eingabe-Events der blockierenden Pointer-/Tastatur-Quelle.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{PlaneAxis, PlaneRotation};

/// Ein Event aus `PointerSource::next_event`.
///
/// Positionen sind Weltkoordinaten, die der Host bereits auf die aktive
/// Cursor-Constraint (Mesh/Fläche/Ebene) beschränkt hat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Maustaste gedrückt (Greifen, Einfügen, Löschen)
    PointerDown(Vec3),
    /// Punkt bestätigt / Maustaste losgelassen (Anhängen, Ablegen)
    Point(Vec3),
    /// Cursor bewegt: ein Vorschau-Frame
    PointerMoved(Vec3),
    /// Zuletzt gesetzten Punkt entfernen
    Undo,
    /// Session bestätigen
    Confirm,
    /// Session verwerfen
    Cancel,
    /// Objekt gepickt (nur Nachbearbeitungs-Sessions): vorzeitig beenden
    ObjectPicked,
    /// Texteingabe in der Befehlszeile
    StringInput(String),
    /// Pfeiltaste: Constraint-Ebene drehen
    RotatePlane {
        key: ArrowKey,
        #[serde(default)]
        large_step: bool,
    },
}

/// Modifier-Zustand zum Zeitpunkt eines Events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Punkt einfügen statt greifen/anhängen
    #[serde(default)]
    pub add: bool,
    /// Nächsten Punkt löschen
    #[serde(default)]
    pub remove: bool,
    /// Snap-Kurven ignorieren
    #[serde(default)]
    pub no_snap: bool,
}

/// Pfeiltasten für die Ebenen-Rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    /// Links/Rechts drehen um die lokale Y-Achse, Hoch/Runter um die lokale X-Achse.
    pub fn rotation(self, step_deg: f32) -> PlaneRotation {
        let (axis, sign) = match self {
            ArrowKey::Left => (PlaneAxis::Y, -1.0),
            ArrowKey::Right => (PlaneAxis::Y, 1.0),
            ArrowKey::Up => (PlaneAxis::X, -1.0),
            ArrowKey::Down => (PlaneAxis::X, 1.0),
        };
        PlaneRotation {
            axis,
            degrees: sign * step_deg,
        }
    }
}
