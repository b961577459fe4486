//! Snap-Kurven: magnetisches Einrasten ohne Gültigkeitsprüfung.

use std::sync::Arc;

use glam::Vec3;

use crate::core::{CurveHit, GuideCurve};

/// Unabhängige Liste von Snap-Kurven.
#[derive(Debug, Clone, Default)]
pub struct SnapEngine {
    curves: Vec<Arc<dyn GuideCurve>>,
}

impl SnapEngine {
    pub fn new(curves: Vec<Arc<dyn GuideCurve>>) -> Self {
        Self { curves }
    }

    pub fn add_curve(&mut self, curve: Arc<dyn GuideCurve>) {
        self.curves.push(curve);
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Nächster Punkt auf der nächstgelegenen Snap-Kurve innerhalb von `tolerance`.
    ///
    /// Bei exakt gleichem Abstand gewinnt die zuerst registrierte Kurve.
    pub fn try_get_snap_point(&self, candidate: Vec3, tolerance: f32) -> Option<Vec3> {
        let mut best: Option<CurveHit> = None;
        for curve in &self.curves {
            let Some(hit) = curve.closest_point(candidate, tolerance) else {
                continue;
            };
            if best.map_or(true, |b| hit.distance < b.distance) {
                best = Some(hit);
            }
        }
        best.map(|hit| hit.point)
    }
}
