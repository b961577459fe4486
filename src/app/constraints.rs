//! Constraint-Set und Akzeptanzprüfung für Kandidatenpunkte.
//!
//! Mesh, Fläche und Ebene schränkt bereits der Host über `constrain_to` ein.
//! Hier wird nur nachträglich gegen die Führungskurven geprüft.

use std::sync::Arc;

use glam::{Affine3A, Vec3};
use indexmap::IndexMap;

use crate::core::{ConstraintGeometry, ConstraintPlane, GuideCurve};

/// Stabile ID einer registrierten Führungskurve (Registrierungsreihenfolge).
pub type CurveId = usize;

/// Art einer Constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Mesh,
    Surface,
    Plane,
    Curves,
}

impl ConstraintKind {
    fn bit(self) -> u8 {
        match self {
            ConstraintKind::Mesh => 1,
            ConstraintKind::Surface => 2,
            ConstraintKind::Plane => 4,
            ConstraintKind::Curves => 8,
        }
    }
}

/// Geometrie, auf die der Host den Cursor beschränken soll.
#[derive(Debug, Clone, Default)]
pub enum CursorConstraint {
    /// Keine Beschränkung
    #[default]
    Free,
    Mesh(Arc<dyn ConstraintGeometry>),
    Surface(Arc<dyn ConstraintGeometry>),
    Plane(ConstraintPlane),
}

impl CursorConstraint {
    /// Wendet die Beschränkung auf einen rohen Cursor-Punkt an.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        match self {
            CursorConstraint::Free => point,
            CursorConstraint::Mesh(geometry) | CursorConstraint::Surface(geometry) => {
                geometry.pull_back(point)
            }
            CursorConstraint::Plane(plane) => plane.project(point),
        }
    }
}

/// Ergebnis von `ConstraintSet::is_acceptable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acceptance {
    pub accepted: bool,
    /// Führungskurve, auf der der Kandidat liegt
    pub on_curve: Option<CurveId>,
}

impl Acceptance {
    const REJECTED: Self = Self {
        accepted: false,
        on_curve: None,
    };
    const ACCEPTED: Self = Self {
        accepted: true,
        on_curve: None,
    };
}

/// Höchstens je ein Mesh, eine Fläche, eine Ebene plus eine Liste Führungskurven.
#[derive(Debug, Default)]
pub struct ConstraintSet {
    mesh: Option<Arc<dyn ConstraintGeometry>>,
    surface: Option<Arc<dyn ConstraintGeometry>>,
    plane: Option<ConstraintPlane>,
    curves: IndexMap<CurveId, Arc<dyn GuideCurve>>,
    /// Verbrauchte Führungskurven (Unique-Modus), rückgabefähig
    consumed: IndexMap<CurveId, Arc<dyn GuideCurve>>,
    next_curve_id: CurveId,
    /// Bitmaske der Arten, die schon einmal aktiv wurden
    seen_kinds: u8,
    active_kinds: usize,
}

impl ConstraintSet {
    /// Erstellt ein leeres Constraint-Set (keine Einschränkung).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_mesh(&mut self, mesh: Arc<dyn ConstraintGeometry>) {
        self.mesh = Some(mesh);
        self.mark_active(ConstraintKind::Mesh);
    }

    pub fn register_surface(&mut self, surface: Arc<dyn ConstraintGeometry>) {
        self.surface = Some(surface);
        self.mark_active(ConstraintKind::Surface);
    }

    pub fn register_plane(&mut self, plane: ConstraintPlane) {
        self.plane = Some(plane);
        self.mark_active(ConstraintKind::Plane);
    }

    /// Registriert Führungskurven und gibt ihre IDs zurück.
    pub fn register_curves(
        &mut self,
        curves: impl IntoIterator<Item = Arc<dyn GuideCurve>>,
    ) -> Vec<CurveId> {
        let mut ids = Vec::new();
        for curve in curves {
            let id = self.next_curve_id;
            self.next_curve_id += 1;
            self.curves.insert(id, curve);
            ids.push(id);
        }
        if !self.curves.is_empty() {
            self.mark_active(ConstraintKind::Curves);
        }
        ids
    }

    /// Der Zähler steigt nur beim ersten Aktivwerden einer Art.
    fn mark_active(&mut self, kind: ConstraintKind) {
        if self.seen_kinds & kind.bit() == 0 {
            self.seen_kinds |= kind.bit();
            self.active_kinds += 1;
        }
    }

    /// Anzahl gleichzeitig aktiver Constraint-Arten.
    pub fn active_kind_count(&self) -> usize {
        self.active_kinds
    }

    /// Wurden Führungskurven registriert? (auch wenn inzwischen alle verbraucht sind)
    pub fn has_curve_constraint(&self) -> bool {
        self.seen_kinds & ConstraintKind::Curves.bit() != 0
    }

    /// Sind Führungskurven die einzige aktive Constraint-Art?
    pub fn curves_only(&self) -> bool {
        self.has_curve_constraint() && self.active_kinds == 1
    }

    /// Anzahl noch verfügbarer Führungskurven.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    pub fn plane(&self) -> Option<&ConstraintPlane> {
        self.plane.as_ref()
    }

    /// Prüft einen Kandidaten gegen die Führungskurven.
    ///
    /// - nur Kurven aktiv, Kandidat auf keiner → verworfen
    /// - Kurven aktiv, Kandidat auf einer → akzeptiert, erste Kurve (Registrierung) wird gemeldet
    /// - sonst akzeptiert
    pub fn is_acceptable(&self, candidate: Vec3, tolerance: f32) -> Acceptance {
        if !self.has_curve_constraint() {
            return Acceptance::ACCEPTED;
        }
        let on_curve = self
            .curves
            .iter()
            .find(|(_, curve)| curve.closest_point(candidate, tolerance).is_some())
            .map(|(&id, _)| id);

        match on_curve {
            Some(id) => Acceptance {
                accepted: true,
                on_curve: Some(id),
            },
            None if self.curves_only() => Acceptance::REJECTED,
            None => Acceptance::ACCEPTED,
        }
    }

    /// Entfernt eine Führungskurve, nachdem sie einen Punkt verankert hat.
    ///
    /// Der Art-Zähler bleibt unverändert.
    pub fn consume_curve(&mut self, id: CurveId) -> bool {
        match self.curves.shift_remove(&id) {
            Some(curve) => {
                self.consumed.insert(id, curve);
                true
            }
            None => false,
        }
    }

    /// Gibt eine verbrauchte Führungskurve zurück (Punkt entfernt oder verschoben).
    ///
    /// Die Kurve landet wieder an ihrer Registrierungsposition, damit die
    /// erste Kurve an Schnittpunkten weiterhin gewinnt.
    pub fn restore_curve(&mut self, id: CurveId) -> bool {
        let Some(curve) = self.consumed.shift_remove(&id) else {
            return false;
        };
        let position = self
            .curves
            .keys()
            .position(|&other| other > id)
            .unwrap_or(self.curves.len());
        self.curves.shift_insert(position, id, curve);
        true
    }

    /// Transformiert die Ebene (Tastatur-Rotation). `false` ohne Ebene.
    pub fn transform_plane(&mut self, transform: &Affine3A) -> bool {
        match self.plane.as_mut() {
            Some(plane) => {
                plane.transform(transform);
                true
            }
            None => false,
        }
    }

    /// Cursor-Beschränkung für den Host (Mesh vor Fläche vor Ebene).
    pub fn cursor_constraint(&self) -> CursorConstraint {
        if let Some(mesh) = &self.mesh {
            CursorConstraint::Mesh(Arc::clone(mesh))
        } else if let Some(surface) = &self.surface {
            CursorConstraint::Surface(Arc::clone(surface))
        } else if let Some(plane) = self.plane {
            CursorConstraint::Plane(plane)
        } else {
            CursorConstraint::Free
        }
    }
}
