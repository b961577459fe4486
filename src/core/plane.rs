//! Constraint-Ebene mit lokalem Achsensystem und schrittweiser Rotation.

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

/// Lokale Achse der Ebene, um die rotiert wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneAxis {
    /// Lokale X-Achse der Ebene
    X,
    /// Lokale Y-Achse der Ebene
    Y,
}

/// Rotation der Ebene um eine ihrer lokalen Achsen durch den Ursprung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneRotation {
    pub axis: PlaneAxis,
    /// Winkel in Grad (positiv = rechtsdrehend um die Achse)
    pub degrees: f32,
}

/// Ebene aus Ursprung und zwei orthonormalen Achsen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintPlane {
    pub origin: Vec3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
}

impl ConstraintPlane {
    /// Welt-XY-Ebene durch `origin`.
    pub fn world_xy(origin: Vec3) -> Self {
        Self {
            origin,
            x_axis: Vec3::X,
            y_axis: Vec3::Y,
        }
    }

    /// Normale der Ebene (X × Y).
    pub fn normal(&self) -> Vec3 {
        self.x_axis.cross(self.y_axis).normalize_or_zero()
    }

    /// Projiziert einen Punkt senkrecht auf die Ebene.
    pub fn project(&self, point: Vec3) -> Vec3 {
        let normal = self.normal();
        point - normal * (point - self.origin).dot(normal)
    }

    /// Abstand eines Punkts zur Ebene (vorzeichenlos).
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.normal()).abs()
    }

    /// Baut die Transformation für eine Rotation um eine lokale Achse durch den Ursprung.
    ///
    /// Dieselbe Transformation wird auf Ebene und Kontrollpunkte angewendet,
    /// damit beide konsistent bleiben.
    pub fn rotation_transform(&self, rotation: PlaneRotation) -> Affine3A {
        let axis = match rotation.axis {
            PlaneAxis::X => self.x_axis,
            PlaneAxis::Y => self.y_axis,
        }
        .normalize_or_zero();
        if axis == Vec3::ZERO {
            return Affine3A::IDENTITY;
        }
        Affine3A::from_translation(self.origin)
            * Affine3A::from_axis_angle(axis, rotation.degrees.to_radians())
            * Affine3A::from_translation(-self.origin)
    }

    /// Wendet eine Transformation auf Ursprung und Achsen an.
    pub fn transform(&mut self, transform: &Affine3A) {
        self.origin = transform.transform_point3(self.origin);
        self.x_axis = transform.transform_vector3(self.x_axis).normalize_or_zero();
        self.y_axis = transform.transform_vector3(self.y_axis).normalize_or_zero();
    }
}
