//! Geometrische Abfragen auf Führungs-/Snap-Kurven und Constraint-Geometrie.
//!
//! Die eigentlichen Kernel (NURBS, Meshes) liegen beim Host. Hier stehen nur
//! die Schnittstellen plus eine Polyline als einfache Referenz-Implementierung.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Ergebnis einer Closest-Point-Abfrage auf einer Kurve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHit {
    /// Nächster Punkt auf der Kurve
    pub point: Vec3,
    /// Kurvenparameter des Treffers
    pub parameter: f32,
    /// Abstand zwischen Abfragepunkt und `point`
    pub distance: f32,
}

/// Kurve, auf die Punkte beschränkt oder gesnappt werden können.
pub trait GuideCurve: std::fmt::Debug {
    /// Nächster Kurvenpunkt innerhalb von `max_distance`, sonst `None`.
    fn closest_point(&self, point: Vec3, max_distance: f32) -> Option<CurveHit>;
}

/// Mesh oder Fläche, auf die der Host den Cursor beschränkt.
pub trait ConstraintGeometry: std::fmt::Debug {
    /// Zieht einen Punkt auf die Geometrie zurück.
    fn pull_back(&self, point: Vec3) -> Vec3;
}

/// Offene oder geschlossene Polylinie.
///
/// Dient als Führungs-/Snap-Kurve und als Ergebnis des Referenz-Kurven-Builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Vec3>,
    #[serde(default)]
    pub closed: bool,
}

impl Polyline {
    /// Offene Polylinie durch `points`.
    pub fn open(points: Vec<Vec3>) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// Summierte Segmentlänge.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Segmente inkl. Schluss-Segment, falls geschlossen und nicht dupliziert.
    fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let closing = match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(&first), Some(&last)) if first != last => Some((last, first)),
            _ => None,
        };
        self.points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing)
    }
}

impl GuideCurve for Polyline {
    fn closest_point(&self, point: Vec3, max_distance: f32) -> Option<CurveHit> {
        if let [single] = self.points.as_slice() {
            let distance = single.distance(point);
            return (distance <= max_distance).then_some(CurveHit {
                point: *single,
                parameter: 0.0,
                distance,
            });
        }

        let mut best: Option<CurveHit> = None;
        for (seg, (a, b)) in self.segments().enumerate() {
            let ab = b - a;
            let len_sq = ab.length_squared();
            let t = if len_sq < f32::EPSILON {
                0.0
            } else {
                ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0)
            };
            let candidate = a + ab * t;
            let distance = candidate.distance(point);
            if distance > max_distance {
                continue;
            }
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(CurveHit {
                    point: candidate,
                    parameter: seg as f32 + t,
                    distance,
                });
            }
        }
        best
    }
}
