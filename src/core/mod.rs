//! Core-Domänentypen: Kontrollpunkt-Liste, Constraint-Ebene, Kurven-Abfragen, Viewport.

pub mod curve;
pub mod plane;
/// Kontrollpunkt-Liste
///
/// Geordnete Punkte, Closed-Flag und gesperrte Indizes.
/// Wird ausschließlich von der Edit-Session mutiert.
pub mod point_list;
mod rejection;
pub mod viewport;

pub use curve::{ConstraintGeometry, CurveHit, GuideCurve, Polyline};
pub use plane::{ConstraintPlane, PlaneAxis, PlaneRotation};
pub use point_list::PointList;
pub use rejection::EditRejection;
pub use viewport::{ProjectionViewport, TopViewport, Viewport};
