//! Bestätigte Mutationen der Punktliste.
//!
//! Jede Operation prüft zuerst und mutiert dann. Eine verworfene Operation
//! wird auf Debug-Level geloggt und lässt die Liste unverändert.

use glam::Vec3;

use super::{CurveEditSession, SessionEnd, SessionMode, SessionState};
use crate::app::edit_log::EditCommand;
use crate::app::events::Modifiers;
use crate::app::host::{CurveBuilder, SessionHost};
use crate::app::locator::{insertion_slot, locate, InsertionSlot, Located};
use crate::core::{EditRejection, PlaneRotation};

impl CurveEditSession {
    /// Neue-Kurve-Modus: Kandidat filtern, anhängen, Schließen prüfen.
    pub(super) fn append<B: CurveBuilder>(
        &mut self,
        pos: Vec3,
        modifiers: Modifiers,
        host: &mut SessionHost<'_, B>,
    ) {
        let (point, anchor) = match self.filter_candidate(pos, modifiers) {
            Ok(accepted) => accepted,
            Err(rejection) => {
                log::debug!("Punkt verworfen: {rejection}");
                return;
            }
        };

        if self.closes_at(point) {
            match self.points.close_with_duplicate() {
                Ok(()) => {
                    self.anchors.push(None);
                    self.log.record(EditCommand::Closed);
                    log::debug!("Kurve geschlossen mit {} Punkten", self.points.real_len());
                    host.notify_changed(self.points.points());
                    self.finish(SessionEnd::Completed, host);
                    return;
                }
                Err(rejection) => log::debug!("Schließen verworfen: {rejection}"),
            }
        }

        let index = self.points.len();
        self.points.append(point);
        let anchor = self.consume_anchor(anchor);
        self.anchors.push(anchor);
        self.log.record(EditCommand::Appended { index, point });
        host.notify_changed(self.points.points());

        if self.max_points.is_some_and(|max| self.points.len() >= max) {
            log::debug!("Punkt-Limit {} erreicht", self.points.len());
            self.finish(SessionEnd::Completed, host);
        }
    }

    /// Schließt der Klick eine neue Kurve? Ab dem 4. Punkt, wenn er innerhalb
    /// der Schließ-Toleranz am Startpunkt liegt.
    ///
    /// Statt des Klick-Punkts wird dann ein exaktes Duplikat des Startpunkts
    /// gespeichert; die Führungskurve des Klicks bleibt frei.
    fn closes_at(&self, point: Vec3) -> bool {
        if self.mode != SessionMode::NewCurve || self.points.len() < 3 {
            return false;
        }
        self.points
            .first()
            .is_some_and(|first| first.distance(point) <= self.options.close_tolerance)
    }

    /// Letzten Punkt entfernen (nur offene Kurven mit mehr als einem Punkt).
    pub(super) fn undo<B: CurveBuilder>(&mut self, host: &mut SessionHost<'_, B>) {
        if self.state != SessionState::Picking {
            log::debug!("Undo im Zustand {:?} ignoriert", self.state);
            return;
        }
        if self.points.is_closed() || self.points.len() <= 1 {
            log::debug!("Undo ignoriert: {} Punkt(e)", self.points.len());
            return;
        }
        match self.points.remove_at(self.points.len() - 1) {
            Ok(point) => {
                let anchor = self.anchors.pop().flatten();
                self.restore_anchor(anchor);
                self.log.record(EditCommand::Undone { point });
                host.notify_changed(self.points.points());
            }
            Err(rejection) => log::debug!("Undo verworfen: {rejection}"),
        }
    }

    /// Nächsten Punkt und Einfügeseite zur Cursor-Position bestimmen.
    fn locate_at<B: CurveBuilder>(
        &self,
        pos: Vec3,
        host: &SessionHost<'_, B>,
    ) -> Result<Located, EditRejection> {
        let cursor = host.viewport.world_to_screen(pos);
        locate(self.points.points(), self.points.is_closed(), cursor, host.viewport)
            .ok_or(EditRejection::NothingToEdit)
    }

    /// Add-Modifier: Punkt zwischen nächstem Punkt und Einfügeseite einfügen.
    pub(super) fn insert<B: CurveBuilder>(
        &mut self,
        pos: Vec3,
        modifiers: Modifiers,
        host: &mut SessionHost<'_, B>,
    ) {
        if let Err(rejection) = self.try_insert(pos, modifiers, host) {
            log::debug!("Einfügen verworfen: {rejection}");
            return;
        }
        host.notify_changed(self.points.points());
    }

    fn try_insert<B: CurveBuilder>(
        &mut self,
        pos: Vec3,
        modifiers: Modifiers,
        host: &SessionHost<'_, B>,
    ) -> Result<(), EditRejection> {
        let located = self.locate_at(pos, host)?;
        let (point, anchor) = self.filter_candidate(pos, modifiers)?;
        let closed = self.points.is_closed();

        let index = match insertion_slot(&located, self.points.real_len(), closed) {
            InsertionSlot::At(index) => {
                self.points.insert_at(index, point)?;
                index
            }
            InsertionSlot::Wrap => {
                // Neuer Startpunkt: Duplikat am Ende mitziehen
                self.points.insert_at(0, point)?;
                let last = self.points.len() - 1;
                self.points.replace(last, point)?;
                0
            }
        };
        let anchor = self.consume_anchor(anchor);
        self.anchors.insert(index.min(self.anchors.len()), anchor);
        self.log.record(EditCommand::Inserted { index, point });
        Ok(())
    }

    /// Remove-Modifier: nächsten Punkt löschen, sofern nicht gesperrt.
    pub(super) fn delete<B: CurveBuilder>(&mut self, pos: Vec3, host: &mut SessionHost<'_, B>) {
        if let Err(rejection) = self.try_delete(pos, host) {
            log::debug!("Löschen verworfen: {rejection}");
            return;
        }
        host.notify_changed(self.points.points());
    }

    fn try_delete<B: CurveBuilder>(
        &mut self,
        pos: Vec3,
        host: &SessionHost<'_, B>,
    ) -> Result<(), EditRejection> {
        let located = self.locate_at(pos, host)?;
        let index = located.nearest;
        let closed = self.points.is_closed();

        if (closed && self.points.real_len() <= 3) || self.points.real_len() <= 1 {
            return Err(EditRejection::DegenerateCurve);
        }
        if self.points.is_locked(index) {
            return Err(EditRejection::LockedPoint(index));
        }

        let point = self.points.remove_at(index)?;
        let anchor = self.take_anchor(index);
        self.restore_anchor(anchor);
        if closed && index == 0 {
            let first = self.points.first().ok_or(EditRejection::DegenerateCurve)?;
            let last = self.points.len() - 1;
            self.points.replace(last, first)?;
        }
        self.log.record(EditCommand::Removed { index, point });
        Ok(())
    }

    /// Ohne Modifier: nächsten Punkt greifen (Pick-Radius, Sperre beachten).
    pub(super) fn grab<B: CurveBuilder>(&mut self, pos: Vec3, host: &mut SessionHost<'_, B>) {
        let located = match self.locate_at(pos, host) {
            Ok(located) => located,
            Err(rejection) => {
                log::debug!("Greifen verworfen: {rejection}");
                return;
            }
        };
        if let Some(radius) = self.options.pick_radius_px {
            if located.screen_distance > radius {
                log::debug!(
                    "Kein Punkt im Pick-Radius ({:.1}px > {:.1}px)",
                    located.screen_distance,
                    radius
                );
                return;
            }
        }
        if self.points.is_locked(located.nearest) {
            log::debug!(
                "Greifen verworfen: {}",
                EditRejection::LockedPoint(located.nearest)
            );
            return;
        }

        self.state = SessionState::Moving {
            index: located.nearest,
        };
        // Eigene Führungskurve freigeben, damit der Punkt auf ihr gleiten kann
        let held = self.anchors.get_mut(located.nearest).and_then(Option::take);
        self.held_anchor = held;
        self.restore_anchor(held);
        host.input.set_grid_snap(false);
        log::debug!("Punkt {} gegriffen", located.nearest);
    }

    /// Gegriffenen Punkt ablegen. Bei verworfenem Kandidaten bleibt er an
    /// seiner bestätigten Position.
    pub(super) fn release<B: CurveBuilder>(
        &mut self,
        index: usize,
        pos: Vec3,
        modifiers: Modifiers,
        host: &mut SessionHost<'_, B>,
    ) {
        self.state = SessionState::Editing;
        host.input.set_grid_snap(true);

        let (point, anchor) = match self.filter_candidate(pos, modifiers) {
            Ok(accepted) => accepted,
            Err(rejection) => {
                log::debug!("Verschieben von Punkt {index} verworfen: {rejection}");
                self.reanchor_held(index);
                return;
            }
        };
        match self.points.replace_mirrored(index, point) {
            Ok((from, _)) => {
                self.held_anchor = None;
                let anchor = self.consume_anchor(anchor);
                if let Some(slot) = self.anchors.get_mut(index) {
                    *slot = anchor;
                }
                self.log.record(EditCommand::Moved {
                    index,
                    from,
                    to: point,
                });
                host.notify_changed(self.points.points());
            }
            Err(rejection) => {
                log::debug!("Verschieben verworfen: {rejection}");
                self.reanchor_held(index);
            }
        }
    }

    /// Dreht die Constraint-Ebene um ihren Ursprung und alle Punkte mit.
    pub(super) fn rotate_plane<B: CurveBuilder>(
        &mut self,
        rotation: PlaneRotation,
        host: &mut SessionHost<'_, B>,
    ) {
        let Some(plane) = self.constraints.plane().copied() else {
            log::debug!("Ebenen-Rotation ohne Ebenen-Constraint ignoriert");
            return;
        };
        let transform = plane.rotation_transform(rotation);
        self.constraints.transform_plane(&transform);
        self.points.transform_all(&transform);
        host.input.constrain_to(self.constraints.cursor_constraint());

        self.log.record(EditCommand::PlaneRotated(rotation));
        log::debug!(
            "Ebene um {:.1}° ({:?}) gedreht",
            rotation.degrees,
            rotation.axis
        );
        if !self.points.is_empty() {
            host.notify_changed(self.points.points());
        }
    }
}
