//! Geordnete Kontrollpunkt-Liste einer Polypunkt-Kurve.
//!
//! Die Liste kennt keine Geometrie-Logik. Sie verwaltet nur:
//! - die Punkt-Reihenfolge (= Kurvenreihenfolge)
//! - das Closed-Flag (letzter Punkt ist dann ein Duplikat des ersten)
//! - den Kurvengrad für den externen Kurven-Builder
//! - gesperrte Indizes, die bei Einfüge-/Löschoperationen mitwandern

use std::collections::BTreeSet;

use glam::{Affine3A, Vec3};

use super::EditRejection;

/// Kontrollpunkt-Liste mit gesperrten Indizes und Closed-Flag.
#[derive(Debug, Clone, PartialEq)]
pub struct PointList {
    points: Vec<Vec3>,
    closed: bool,
    degree: usize,
    locked: BTreeSet<usize>,
}

impl PointList {
    /// Erstellt eine leere, offene Liste (Neue-Kurve-Modus).
    pub fn new(degree: usize) -> Self {
        Self {
            points: Vec::new(),
            closed: false,
            degree,
            locked: BTreeSet::new(),
        }
    }

    /// Erstellt eine Liste aus den abgetasteten Punkten einer bestehenden Kurve.
    ///
    /// Bei `closed = true` wird das schließende Duplikat ergänzt, falls es fehlt.
    /// Eine geschlossene Kurve braucht mindestens 3 verschiedene Punkte.
    pub fn seeded(points: Vec<Vec3>, degree: usize, closed: bool) -> Result<Self, EditRejection> {
        let mut list = Self {
            points,
            closed: false,
            degree,
            locked: BTreeSet::new(),
        };
        if closed {
            if list.points.len() >= 2 && list.points.first() == list.points.last() {
                list.points.pop();
            }
            list.close_with_duplicate()?;
        }
        Ok(list)
    }

    /// Gesamtzahl gespeicherter Punkte (inkl. schließendem Duplikat).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück, wenn keine Punkte vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Anzahl "echter" Punkte: das schließende Duplikat zählt nicht mit.
    pub fn real_len(&self) -> usize {
        if self.closed {
            self.points.len().saturating_sub(1)
        } else {
            self.points.len()
        }
    }

    /// Read-only Sicht auf alle gespeicherten Punkte.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Die echten Punkte ohne schließendes Duplikat.
    pub fn real_points(&self) -> &[Vec3] {
        &self.points[..self.real_len()]
    }

    /// Punkt an Index `index`.
    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    pub fn first(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Kurvengrad (nur für den externen Kurven-Builder relevant).
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Grad, mit dem der Builder aufgerufen wird: höchstens `len() - 1`.
    ///
    /// Zwei Punkte ergeben eine Gerade, drei höchstens eine quadratische Kurve.
    pub fn build_degree(&self) -> usize {
        self.degree.min(self.points.len().saturating_sub(1)).max(1)
    }

    /// Aktuell gesperrte Indizes in aufsteigender Reihenfolge.
    pub fn locked_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.locked.iter().copied()
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.locked.contains(&index)
    }

    /// Sperrt den Punkt an `index` gegen Verschieben und Löschen.
    pub fn lock(&mut self, index: usize) -> Result<(), EditRejection> {
        self.check_index(index)?;
        self.locked.insert(index);
        Ok(())
    }

    /// Hängt einen Punkt an das Ende der Liste an.
    ///
    /// Nur für offene Listen: bei geschlossener Liste landet der Punkt hinter
    /// dem Duplikat.
    pub fn append(&mut self, point: Vec3) {
        self.points.push(point);
    }

    /// Fügt `point` an `index` ein (`index == len()` entspricht `append`).
    ///
    /// Alle gesperrten Indizes `>= index` wandern um eins nach hinten,
    /// damit derselbe logische Punkt gesperrt bleibt.
    ///
    /// Bei geschlossener Liste und `index == 0` muss der Aufrufer das
    /// Duplikat am Ende auf den neuen Startpunkt setzen.
    pub fn insert_at(&mut self, index: usize, point: Vec3) -> Result<(), EditRejection> {
        if index > self.points.len() {
            return Err(EditRejection::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.points.insert(index, point);
        self.locked = self
            .locked
            .iter()
            .map(|&i| if i >= index { i + 1 } else { i })
            .collect();
        Ok(())
    }

    /// Entfernt den Punkt an `index` und gibt ihn zurück.
    ///
    /// Gesperrte Punkte werden nicht entfernt. Gesperrte Indizes hinter
    /// `index` rücken um eins nach vorne.
    ///
    /// Bei geschlossener Liste und `index == 0` muss der Aufrufer das
    /// Duplikat am Ende auf den neuen Startpunkt setzen.
    pub fn remove_at(&mut self, index: usize) -> Result<Vec3, EditRejection> {
        self.check_index(index)?;
        if self.is_locked(index) {
            return Err(EditRejection::LockedPoint(index));
        }
        let removed = self.points.remove(index);
        self.locked = self
            .locked
            .iter()
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
        Ok(removed)
    }

    /// Ersetzt den Punkt an `index` und gibt die alte Position zurück.
    ///
    /// Spiegelt nicht auf das Duplikat; für Index 0 geschlossener Listen
    /// `replace_mirrored` verwenden.
    pub fn replace(&mut self, index: usize, point: Vec3) -> Result<Vec3, EditRejection> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.points[index], point))
    }

    /// Wie `replace`, spiegelt Index 0 einer geschlossenen Kurve aber auf das Duplikat.
    ///
    /// Gibt die alte Position und (falls gespiegelt) die alte Duplikat-Position zurück.
    pub fn replace_mirrored(
        &mut self,
        index: usize,
        point: Vec3,
    ) -> Result<(Vec3, Option<Vec3>), EditRejection> {
        let previous = self.replace(index, point)?;
        let mirrored = if self.closed && index == 0 {
            let last = self.points.len() - 1;
            Some(self.replace(last, point)?)
        } else {
            None
        };
        Ok((previous, mirrored))
    }

    /// Entfernt den letzten Punkt ohne Sperr-Prüfung (nur für eigene Anhänge).
    pub(crate) fn pop(&mut self) -> Option<Vec3> {
        let popped = self.points.pop()?;
        self.locked.remove(&self.points.len());
        Some(popped)
    }

    /// Schließt die Kurve: hängt ein Duplikat des ersten Punkts an.
    ///
    /// Braucht mindestens 3 echte Punkte, damit `len() >= 4` gilt.
    pub fn close_with_duplicate(&mut self) -> Result<(), EditRejection> {
        if self.closed {
            return Ok(());
        }
        if self.points.len() < 3 {
            return Err(EditRejection::DegenerateCurve);
        }
        self.points.push(self.points[0]);
        self.closed = true;
        Ok(())
    }

    /// Wendet eine Transformation auf alle Punkte an (z.B. Ebenen-Rotation).
    pub fn transform_all(&mut self, transform: &Affine3A) {
        for p in &mut self.points {
            *p = transform.transform_point3(*p);
        }
        if self.closed {
            // Duplikat bitgenau halten, Rundung darf die Invariante nicht brechen
            let last = self.points.len() - 1;
            self.points[last] = self.points[0];
        }
    }

    fn check_index(&self, index: usize) -> Result<(), EditRejection> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(EditRejection::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
        }
    }
}
