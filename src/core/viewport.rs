//! Welt→Screen-Projektion für das Hit-Testing der Kontrollpunkte.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Projiziert Weltpunkte in Screen-Pixel (Ursprung oben links, Y nach unten).
pub trait Viewport {
    fn world_to_screen(&self, world: Vec3) -> Vec2;
}

/// Orthografische Draufsicht (Blick entlang −Z) mit Pan und Zoom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopViewport {
    /// Weltpunkt in der Bildschirmmitte
    pub center: Vec3,
    /// Zoom-Level (1.0 = `BASE_PIXELS_PER_UNIT`)
    pub zoom: f32,
    /// Viewport-Größe in Pixeln
    pub screen_size: Vec2,
}

impl TopViewport {
    /// Screen-Pixel pro Welteinheit bei Zoom 1.0.
    pub const BASE_PIXELS_PER_UNIT: f32 = 10.0;
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f32 = 0.1;
    /// Maximaler Zoom-Faktor.
    pub const ZOOM_MAX: f32 = 100.0;

    /// Erstellt einen Viewport, zentriert auf den Weltursprung.
    pub fn new(screen_size: Vec2) -> Self {
        Self {
            center: Vec3::ZERO,
            zoom: 1.0,
            screen_size,
        }
    }

    /// Zentriert die Ansicht auf einen Punkt
    pub fn look_at(&mut self, target: Vec3) {
        self.center = target;
    }

    /// Ändert den Zoom-Level
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    fn pixels_per_unit(&self) -> f32 {
        Self::BASE_PIXELS_PER_UNIT * self.zoom
    }
}

impl Viewport for TopViewport {
    fn world_to_screen(&self, world: Vec3) -> Vec2 {
        let offset = (world - self.center).truncate() * self.pixels_per_unit();
        // Screen-Y zeigt nach unten, Welt-Y nach oben
        self.screen_size * 0.5 + Vec2::new(offset.x, -offset.y)
    }
}

/// Beliebige perspektivische/orthografische Ansicht über eine View-Projection-Matrix.
#[derive(Debug, Clone)]
pub struct ProjectionViewport {
    pub view_projection: Mat4,
    pub screen_size: Vec2,
}

impl Viewport for ProjectionViewport {
    fn world_to_screen(&self, world: Vec3) -> Vec2 {
        let ndc = self.view_projection.project_point3(world);
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.screen_size.x,
            (1.0 - ndc.y) * 0.5 * self.screen_size.y,
        )
    }
}
