//! Protokoll bestätigter Punkt-Änderungen einer Session.

use glam::Vec3;
use serde::Serialize;

use crate::core::PlaneRotation;

/// Eine bestätigte Änderung der Punktliste.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EditCommand {
    Appended { index: usize, point: Vec3 },
    Inserted { index: usize, point: Vec3 },
    Removed { index: usize, point: Vec3 },
    Moved { index: usize, from: Vec3, to: Vec3 },
    /// Kurve geschlossen (schließendes Duplikat angehängt)
    Closed,
    Undone { point: Vec3 },
    PlaneRotated(PlaneRotation),
}

/// Speichert bestätigte Änderungen in Reihenfolge.
#[derive(Debug, Clone)]
pub struct EditLog {
    entries: Vec<EditCommand>,
    capacity: usize,
}

impl Default for EditLog {
    fn default() -> Self {
        Self::with_capacity(crate::shared::options::EDIT_LOG_CAPACITY)
    }
}

impl EditLog {
    /// Erstellt ein leeres Log mit Obergrenze `capacity` (mindestens 2).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(2),
        }
    }

    /// Fügt eine Änderung hinzu.
    /// Bei voller Kapazität wird die ältere Hälfte verworfen.
    pub fn record(&mut self, command: EditCommand) {
        if self.entries.len() >= self.capacity {
            self.entries.drain(..self.capacity / 2);
        }
        self.entries.push(command);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[EditCommand] {
        &self.entries
    }

    pub fn last(&self) -> Option<&EditCommand> {
        self.entries.last()
    }
}
