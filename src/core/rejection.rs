//! Gründe, aus denen eine Bearbeitung der Punktliste verworfen wird.
//!
//! Keiner dieser Fälle ist fatal: die Session protokolliert sie und
//! lässt das Modell unverändert.

/// Verworfene Bearbeitung der Kontrollpunkt-Liste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditRejection {
    /// Kandidat liegt auf keiner aktiven Führungskurve
    #[error("Kandidat liegt auf keiner aktiven Führungskurve")]
    ConstraintRejected,
    /// Zu wenige Punkte für die Operation (z.B. Schließen mit ≤ 3 Punkten)
    #[error("zu wenige Kontrollpunkte für diese Operation")]
    DegenerateCurve,
    /// Gesperrter Punkt darf weder verschoben noch gelöscht werden
    #[error("Kontrollpunkt {0} ist gesperrt")]
    LockedPoint(usize),
    /// Index liegt außerhalb der Punktliste
    #[error("Index {index} außerhalb der Punktliste (Länge {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Keine Kontrollpunkte vorhanden, auf die sich die Operation beziehen könnte
    #[error("keine Kontrollpunkte vorhanden")]
    NothingToEdit,
}
