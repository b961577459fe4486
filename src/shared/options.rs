//! Zentrale Konfiguration für den Kurvenpunkt-Editor.
//!
//! `CurveEditOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Kurve ───────────────────────────────────────────────────────────

/// Standard-Kurvengrad für den Kurven-Builder.
pub const CURVE_DEGREE: usize = 3;

// ── Toleranzen ──────────────────────────────────────────────────────

/// Abstand (Welteinheiten) zum ersten Punkt, ab dem eine neue Kurve geschlossen wird.
pub const CLOSE_TOLERANCE: f32 = 1.0;
/// Enge Toleranz (Welteinheiten): Kandidat gilt als "auf der Führungskurve".
pub const CURVE_TOLERANCE: f32 = 0.01;
/// Fangradius (Welteinheiten) der Snap-Kurven.
pub const SNAP_TOLERANCE: f32 = 2.0;

// ── Ebenen-Rotation ─────────────────────────────────────────────────

/// Rotationsschritt pro Pfeiltaste in Grad.
pub const ROTATION_STEP_DEG: f32 = 1.0;
/// Rotationsschritt mit gehaltener Schritt-Taste in Grad.
pub const ROTATION_STEP_LARGE_DEG: f32 = 5.0;

// ── Edit-Log ────────────────────────────────────────────────────────

/// Maximale Anzahl protokollierter Bearbeitungen pro Session.
pub const EDIT_LOG_CAPACITY: usize = 1000;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `curve_point_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveEditOptions {
    // ── Kurve ───────────────────────────────────────────────────
    /// Kurvengrad für den externen Kurven-Builder
    pub degree: usize,

    // ── Toleranzen ──────────────────────────────────────────────
    /// Schließ-Toleranz in Welteinheiten
    pub close_tolerance: f32,
    /// Toleranz für "Punkt liegt auf Führungskurve"
    pub curve_tolerance: f32,
    /// Fangradius der Snap-Kurven
    pub snap_tolerance: f32,
    /// Pick-Radius für das Greifen eines Punkts in Screen-Pixeln.
    /// Ohne Wert wird immer der nächste Punkt gegriffen.
    #[serde(default)]
    pub pick_radius_px: Option<f32>,

    // ── Verhalten ───────────────────────────────────────────────
    /// Jede Führungskurve darf nur einen Punkt verankern
    #[serde(default)]
    pub unique_curves: bool,
    /// Endpunkte einer bearbeiteten Kurve sperren
    #[serde(default)]
    pub lock_endpoints: bool,

    // ── Ebenen-Rotation ─────────────────────────────────────────
    /// Rotationsschritt pro Pfeiltaste (Grad)
    pub rotation_step_deg: f32,
    /// Rotationsschritt mit Schritt-Taste (Grad)
    pub rotation_step_large_deg: f32,

    // ── Edit-Log ────────────────────────────────────────────────
    /// Kapazität des Edit-Logs
    #[serde(default = "default_edit_log_capacity")]
    pub edit_log_capacity: usize,
}

impl Default for CurveEditOptions {
    fn default() -> Self {
        Self {
            degree: CURVE_DEGREE,

            close_tolerance: CLOSE_TOLERANCE,
            curve_tolerance: CURVE_TOLERANCE,
            snap_tolerance: SNAP_TOLERANCE,
            pick_radius_px: None,

            unique_curves: false,
            lock_endpoints: false,

            rotation_step_deg: ROTATION_STEP_DEG,
            rotation_step_large_deg: ROTATION_STEP_LARGE_DEG,

            edit_log_capacity: EDIT_LOG_CAPACITY,
        }
    }
}

/// Serde-Default für `edit_log_capacity` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_edit_log_capacity() -> usize {
    EDIT_LOG_CAPACITY
}

impl CurveEditOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("curve_point_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("curve_point_editor.toml")
    }

    /// Rotationsschritt in Grad, abhängig von der Schritt-Taste.
    pub fn rotation_step(&self, large_step: bool) -> f32 {
        if large_step {
            self.rotation_step_large_deg
        } else {
            self.rotation_step_deg
        }
    }
}
