//! Edit-Session: Zustandsautomat für das interaktive Setzen und Bearbeiten
//! von Kurven-Kontrollpunkten.
//!
//! **Neue Kurve:** Punkte anhängen → optional schließen (Klick nahe Startpunkt)
//! → Bestätigen. **Bearbeiten:** Punkt greifen/ablegen, mit Modifier einfügen
//! oder löschen → Bestätigen.
//!
//! Aufgeteilt in:
//! - `editing`: bestätigte Mutationen (Anhängen, Einfügen, Löschen, Greifen, …)
//! - `frame`: Vorschau-Frame pro Cursor-Bewegung

mod editing;
mod frame;

use anyhow::Context;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::constraints::{ConstraintSet, CurveId};
use super::edit_log::EditLog;
use super::events::{InputEvent, Modifiers};
use super::host::{CurveBuilder, SessionHost};
use super::snap::SnapEngine;
use crate::core::{EditRejection, PointList};
use crate::shared::CurveEditOptions;

/// Art der Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Neue Kurve: Punkte werden angehängt
    NewCurve,
    /// Bestehende Kurve bearbeiten (greifen, einfügen, löschen)
    EditCurve { closed: bool },
}

/// Zustand des Automaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Neue-Kurve-Modus: wartet auf Punkte
    Picking,
    /// Bearbeiten-Modus: wartet auf Greifen/Einfügen/Löschen
    Editing,
    /// Ein Punkt ist gegriffen
    Moving { index: usize },
    Done,
    Cancelled,
}

/// Wie die Session beendet wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Bestätigt
    Confirmed,
    /// Natürlich beendet (Kurve geschlossen oder Punkt-Limit erreicht)
    Completed,
    /// Objekt gepickt, vorzeitig beendet ohne Verwerfen
    ObjectPicked,
    Cancelled,
}

/// Eine laufende Edit-Session. Besitzt Punktliste, Constraints und Snap-Kurven.
#[derive(Debug)]
pub struct CurveEditSession {
    mode: SessionMode,
    state: SessionState,
    points: PointList,
    /// Verbrauchte Führungskurve je Punkt (parallel zu `points`, Unique-Modus)
    anchors: Vec<Option<CurveId>>,
    /// Führungskurve des gegriffenen Punkts, während er bewegt wird
    held_anchor: Option<CurveId>,
    constraints: ConstraintSet,
    snaps: SnapEngine,
    options: CurveEditOptions,
    max_points: Option<usize>,
    log: EditLog,
    end: Option<SessionEnd>,
}

impl CurveEditSession {
    /// Erstellt eine Session.
    ///
    /// Im Bearbeiten-Modus muss mindestens ein Punkt vorhanden sein; eine
    /// geschlossene Kurve braucht mindestens 3 echte Punkte. Mit
    /// `lock_endpoints` werden die Endpunkte gesperrt (geschlossen: nur Index 0).
    pub fn new(
        mode: SessionMode,
        initial_points: Vec<Vec3>,
        constraints: ConstraintSet,
        snaps: SnapEngine,
        options: CurveEditOptions,
    ) -> Result<Self, EditRejection> {
        let points = match mode {
            SessionMode::NewCurve => PointList::seeded(initial_points, options.degree, false)?,
            SessionMode::EditCurve { closed } => {
                if initial_points.is_empty() {
                    return Err(EditRejection::NothingToEdit);
                }
                let mut list = PointList::seeded(initial_points, options.degree, closed)?;
                if options.lock_endpoints {
                    list.lock(0)?;
                    if !closed && list.len() > 1 {
                        list.lock(list.len() - 1)?;
                    }
                }
                list
            }
        };
        Ok(Self {
            mode,
            state: SessionState::Idle,
            anchors: vec![None; points.len()],
            held_anchor: None,
            points,
            constraints,
            snaps,
            log: EditLog::with_capacity(options.edit_log_capacity),
            options,
            max_points: None,
            end: None,
        })
    }

    /// Leere Neue-Kurve-Session.
    pub fn new_curve(
        constraints: ConstraintSet,
        snaps: SnapEngine,
        options: CurveEditOptions,
    ) -> Self {
        Self {
            mode: SessionMode::NewCurve,
            state: SessionState::Idle,
            points: PointList::new(options.degree),
            anchors: Vec::new(),
            held_anchor: None,
            constraints,
            snaps,
            log: EditLog::with_capacity(options.edit_log_capacity),
            options,
            max_points: None,
            end: None,
        }
    }

    /// Beendet den Neue-Kurve-Modus automatisch bei `max` Punkten.
    pub fn with_max_points(mut self, max: Option<usize>) -> Self {
        self.max_points = max;
        self
    }

    /// Sperrt einen weiteren Punkt gegen Verschieben und Löschen.
    pub fn lock_point(&mut self, index: usize) -> Result<(), EditRejection> {
        self.points.lock(index)
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Bestätigte Punktliste.
    pub fn points(&self) -> &PointList {
        &self.points
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn options(&self) -> &CurveEditOptions {
        &self.options
    }

    /// Protokoll aller bestätigten Änderungen.
    pub fn edit_log(&self) -> &EditLog {
        &self.log
    }

    /// `Some` sobald die Session beendet ist.
    pub fn end(&self) -> Option<SessionEnd> {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }

    /// Startet die Session: Zustand setzen, Cursor-Constraint an den Host geben.
    pub fn begin<B: CurveBuilder>(&mut self, host: &mut SessionHost<'_, B>) {
        if self.state != SessionState::Idle {
            return;
        }
        self.state = match self.mode {
            SessionMode::NewCurve => SessionState::Picking,
            SessionMode::EditCurve { .. } => SessionState::Editing,
        };
        host.input.constrain_to(self.constraints.cursor_constraint());
        log::info!(
            "Kurven-Session gestartet: {:?}, {} Punkte, {} Constraint-Arten",
            self.mode,
            self.points.real_len(),
            self.constraints.active_kind_count()
        );
    }

    /// Verarbeitet ein einzelnes Event.
    ///
    /// Verworfene Eingaben (Constraint, gesperrter Punkt, …) lassen die
    /// Punktliste unverändert und sind kein Fehler. `Err` entsteht nur, wenn
    /// der Kurven-Builder die Vorschau nicht bauen kann.
    pub fn handle_event<B: CurveBuilder>(
        &mut self,
        event: InputEvent,
        modifiers: Modifiers,
        host: &mut SessionHost<'_, B>,
    ) -> anyhow::Result<()> {
        if self.is_finished() {
            log::debug!("Event nach Session-Ende ignoriert: {:?}", event);
            return Ok(());
        }
        self.begin(host);

        match event {
            InputEvent::PointerDown(pos) => match self.state {
                SessionState::Editing if modifiers.add => self.insert(pos, modifiers, host),
                SessionState::Editing if modifiers.remove => self.delete(pos, host),
                SessionState::Editing => self.grab(pos, host),
                _ => log::debug!("PointerDown im Zustand {:?} ignoriert", self.state),
            },
            InputEvent::Point(pos) => match self.state {
                SessionState::Picking => self.append(pos, modifiers, host),
                SessionState::Moving { index } => self.release(index, pos, modifiers, host),
                _ => {}
            },
            InputEvent::PointerMoved(pos) => {
                self.preview_frame(pos, modifiers, host)
                    .context("Vorschau-Kurve konnte nicht gebaut werden")?;
            }
            InputEvent::Undo => self.undo(host),
            InputEvent::Confirm => self.finish(SessionEnd::Confirmed, host),
            InputEvent::Cancel => self.finish(SessionEnd::Cancelled, host),
            InputEvent::ObjectPicked => self.finish(SessionEnd::ObjectPicked, host),
            InputEvent::StringInput(text) => {
                log::info!("Texteingabe ignoriert: {:?}", text);
            }
            InputEvent::RotatePlane { key, large_step } => {
                let step = self.options.rotation_step(large_step);
                self.rotate_plane(key.rotation(step), host);
            }
        }
        Ok(())
    }

    /// Führt die Session bis zum Ende aus.
    ///
    /// Gibt die gebaute Kurve zurück, `None` bei Abbruch oder weniger als
    /// 2 Punkten. Ein Builder-Fehler ist eine Vertragsverletzung und wird
    /// als `Err` weitergereicht.
    pub fn run<B: CurveBuilder>(
        &mut self,
        host: &mut SessionHost<'_, B>,
    ) -> anyhow::Result<Option<B::Curve>> {
        self.begin(host);
        while !self.is_finished() {
            let event = host.input.next_event();
            let modifiers = host.input.modifiers();
            self.handle_event(event, modifiers, host)?;
        }
        self.build_result(host.builder)
    }

    /// Baut die Ergebniskurve aus der bestätigten Punktliste.
    pub fn build_result<B: CurveBuilder>(&self, builder: &B) -> anyhow::Result<Option<B::Curve>> {
        match self.end {
            None | Some(SessionEnd::Cancelled) => Ok(None),
            Some(_) if self.points.len() < 2 => {
                log::info!(
                    "Session beendet mit {} Punkt(en), keine Kurve",
                    self.points.len()
                );
                Ok(None)
            }
            Some(_) => {
                let degree = self.points.build_degree();
                builder
                    .build_curve(self.points.points(), degree, self.points.is_closed())
                    .map(Some)
                    .with_context(|| {
                        format!(
                            "Kurve aus {} Punkten (Grad {}, geschlossen: {}) nicht baubar",
                            self.points.len(),
                            degree,
                            self.points.is_closed()
                        )
                    })
            }
        }
    }

    fn finish<B: CurveBuilder>(&mut self, end: SessionEnd, host: &mut SessionHost<'_, B>) {
        if let SessionState::Moving { index } = self.state {
            host.input.set_grid_snap(true);
            self.reanchor_held(index);
        }
        self.state = match end {
            SessionEnd::Cancelled => SessionState::Cancelled,
            _ => SessionState::Done,
        };
        self.end = Some(end);
        log::info!(
            "Kurven-Session beendet: {:?}, {} Punkte, geschlossen: {}",
            end,
            self.points.len(),
            self.points.is_closed()
        );
    }

    /// Constraint- und Snap-Filter für einen Kandidaten.
    ///
    /// Snap-Kurven greifen nicht, solange Führungskurven registriert sind
    /// oder der No-Snap-Modifier gehalten wird.
    fn filter_candidate(
        &self,
        candidate: Vec3,
        modifiers: Modifiers,
    ) -> Result<(Vec3, Option<CurveId>), EditRejection> {
        let acceptance = self
            .constraints
            .is_acceptable(candidate, self.options.curve_tolerance);
        if !acceptance.accepted {
            return Err(EditRejection::ConstraintRejected);
        }
        let point = if self.constraints.has_curve_constraint() || modifiers.no_snap {
            candidate
        } else {
            self.snaps
                .try_get_snap_point(candidate, self.options.snap_tolerance)
                .unwrap_or(candidate)
        };
        Ok((point, acceptance.on_curve))
    }

    /// Im Unique-Modus verankert jede Führungskurve nur einen Punkt.
    ///
    /// Gibt die verbrauchte Kurve zurück, damit sie beim Entfernen des
    /// Punkts wieder frei wird.
    fn consume_anchor(&mut self, anchor: Option<CurveId>) -> Option<CurveId> {
        let id = anchor.filter(|_| self.options.unique_curves)?;
        if !self.constraints.consume_curve(id) {
            return None;
        }
        log::debug!(
            "Führungskurve {} verbraucht, {} verbleibend",
            id,
            self.constraints.curve_count()
        );
        Some(id)
    }

    /// Gibt die Führungskurve eines entfernten oder verschobenen Punkts frei.
    fn restore_anchor(&mut self, anchor: Option<CurveId>) {
        if let Some(id) = anchor {
            if self.constraints.restore_curve(id) {
                log::debug!(
                    "Führungskurve {} wieder frei, {} verfügbar",
                    id,
                    self.constraints.curve_count()
                );
            }
        }
    }

    /// Nimmt den Anker des Punkts an `index` heraus (Punkt wird entfernt).
    fn take_anchor(&mut self, index: usize) -> Option<CurveId> {
        if index < self.anchors.len() {
            self.anchors.remove(index)
        } else {
            None
        }
    }

    /// Verankert den gegriffenen Punkt wieder an seiner alten Kurve
    /// (Ablegen verworfen oder Session beendet).
    fn reanchor_held(&mut self, index: usize) {
        let held = self.held_anchor.take();
        let anchor = self.consume_anchor(held);
        if let Some(slot) = self.anchors.get_mut(index) {
            *slot = anchor;
        }
    }
}

/// Führt eine komplette Session in einem Aufruf aus.
pub fn run_session<B: CurveBuilder>(
    mode: SessionMode,
    initial_points: Vec<Vec3>,
    constraints: ConstraintSet,
    snaps: SnapEngine,
    max_points: Option<usize>,
    options: CurveEditOptions,
    host: &mut SessionHost<'_, B>,
) -> anyhow::Result<Option<B::Curve>> {
    let mut session = CurveEditSession::new(mode, initial_points, constraints, snaps, options)
        .context("Session konnte nicht gestartet werden")?
        .with_max_points(max_points);
    session.run(host)
}

#[cfg(test)]
mod tests;
