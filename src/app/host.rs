//! Schnittstellen zum Host: Eingabequelle, Kurven-Builder, Vorschau, Beobachter.
//!
//! Die Session ruft diese Traits nur vom Interaktions-Thread aus auf.

use anyhow::bail;
use glam::Vec3;

use super::constraints::CursorConstraint;
use super::events::{InputEvent, Modifiers};
use crate::core::{Polyline, Viewport};

/// Blockierende Pointer-/Tastatur-Quelle des Hosts.
pub trait PointerSource {
    /// Wartet auf das nächste Event (einziger Suspendierungspunkt der Session).
    fn next_event(&mut self) -> InputEvent;

    /// Modifier-Zustand zum zuletzt gelieferten Event.
    fn modifiers(&self) -> Modifiers;

    /// Beschränkt den Cursor auf Mesh/Fläche/Ebene (Host-Fähigkeit).
    fn constrain_to(&mut self, constraint: CursorConstraint);

    /// Schaltet das normale Grid-Snapping des Hosts an/aus.
    fn set_grid_snap(&mut self, enabled: bool);
}

/// Reine Funktion `BuildCurve(points, degree, closed) -> Curve`.
pub trait CurveBuilder {
    type Curve;

    /// Baut eine Kurve aus den Kontrollpunkten.
    ///
    /// Ein Fehler ist eine Vertragsverletzung (Grad passt nicht zur Punktanzahl)
    /// und wird von der Session unverändert weitergereicht.
    fn build_curve(&self, points: &[Vec3], degree: usize, closed: bool)
        -> anyhow::Result<Self::Curve>;
}

/// Zeichnet die Vorschau-Kurve und die Punkt-Marker eines Frames.
pub trait PreviewRenderer<C> {
    fn show_preview(&mut self, curve: Option<&C>, points: &[Vec3]);
}

/// Beobachter für Host-Integration (Logging, gekoppeltes Redraw).
///
/// Reine Beobachter: sie steuern den Ablauf der Session nicht.
pub trait SessionObserver {
    /// Nach jeder bestätigten Änderung der Punktliste.
    fn on_point_list_changed(&mut self, _points: &[Vec3]) {}

    /// Bei jedem Vorschau-Frame mit der aktuellen Cursor-Position.
    fn on_dynamic_draw(&mut self, _cursor: Vec3) {}
}

/// Bündelt alle Host-Schnittstellen einer laufenden Session.
pub struct SessionHost<'a, B: CurveBuilder> {
    pub input: &'a mut dyn PointerSource,
    pub viewport: &'a dyn Viewport,
    pub builder: &'a B,
    pub renderer: &'a mut dyn PreviewRenderer<B::Curve>,
    pub observer: Option<&'a mut dyn SessionObserver>,
}

impl<B: CurveBuilder> SessionHost<'_, B> {
    pub(crate) fn notify_changed(&mut self, points: &[Vec3]) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_point_list_changed(points);
        }
    }

    pub(crate) fn notify_dynamic_draw(&mut self, cursor: Vec3) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_dynamic_draw(cursor);
        }
    }
}

/// Referenz-Builder: verbindet die Kontrollpunkte als Polylinie.
///
/// Der Grad wird ignoriert; genügt für Vorschau, Tests und die Replay-Binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolylineBuilder;

impl CurveBuilder for PolylineBuilder {
    type Curve = Polyline;

    fn build_curve(&self, points: &[Vec3], degree: usize, closed: bool) -> anyhow::Result<Polyline> {
        if points.len() < 2 {
            bail!(
                "Kurve braucht mindestens 2 Punkte (Grad {}), erhalten: {}",
                degree,
                points.len()
            );
        }
        if closed && (points.len() < 4 || points.first() != points.last()) {
            bail!("Geschlossene Kurve ohne schließendes Duplikat des Startpunkts");
        }
        Ok(Polyline {
            points: points.to_vec(),
            closed,
        })
    }
}
