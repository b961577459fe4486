//! Vorschau pro Frame mit Rollback statt Snapshot.
//!
//! Ablauf eines Frames: vorläufige Mutation anwenden → Kurve bauen →
//! Vorschau zeichnen → exakt die inverse Mutation anwenden. Die bestätigte
//! Punktliste ist danach bitgenau wie vorher.

use glam::Vec3;

use super::host::{CurveBuilder, PreviewRenderer};
use crate::core::{EditRejection, PointList};

/// Vorläufige Änderung eines Vorschau-Frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tentative {
    /// Cursor-Punkt anhängen (Neue-Kurve-Modus)
    Append(Vec3),
    /// Gegriffenen Punkt an die Cursor-Position setzen
    Move { index: usize, point: Vec3 },
}

/// Angewendete vorläufige Mutation mit allem, was für die Umkehrung nötig ist.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use = "eine vorläufige Mutation muss mit `revert` zurückgenommen werden"]
pub enum PreviewMutation {
    Appended,
    Replaced {
        index: usize,
        previous: Vec3,
        /// Alte Position des schließenden Duplikats (nur Index 0 geschlossener Kurven)
        mirrored: Option<Vec3>,
    },
}

impl PreviewMutation {
    /// Wendet `tentative` auf die Liste an.
    pub fn apply(list: &mut PointList, tentative: Tentative) -> Result<Self, EditRejection> {
        match tentative {
            Tentative::Append(point) => {
                list.append(point);
                Ok(PreviewMutation::Appended)
            }
            Tentative::Move { index, point } => {
                let (previous, mirrored) = list.replace_mirrored(index, point)?;
                Ok(PreviewMutation::Replaced {
                    index,
                    previous,
                    mirrored,
                })
            }
        }
    }

    /// Nimmt exakt diese Mutation zurück.
    pub fn revert(self, list: &mut PointList) {
        match self {
            PreviewMutation::Appended => {
                list.pop();
            }
            PreviewMutation::Replaced {
                index,
                previous,
                mirrored,
            } => {
                // Indizes stammen aus `apply` auf derselben Liste und sind gültig
                let _ = list.replace(index, previous);
                if let Some(dup) = mirrored {
                    let last = list.len() - 1;
                    let _ = list.replace(last, dup);
                }
            }
        }
    }
}

/// Zeichnet einen Vorschau-Frame und stellt die Liste danach wieder her.
///
/// `tentative = None` zeigt nur die bestätigten Punkte (z.B. ungültiger Kandidat).
/// Eine Kurve wird erst ab 2 Punkten gebaut, der Grad ist durch die
/// Punktanzahl begrenzt. Builder-Fehler werden erst nach dem Rollback
/// weitergereicht.
pub fn render_frame<B: CurveBuilder>(
    list: &mut PointList,
    tentative: Option<Tentative>,
    closed: bool,
    builder: &B,
    renderer: &mut dyn PreviewRenderer<B::Curve>,
) -> anyhow::Result<()> {
    let mutation = match tentative {
        Some(t) => match PreviewMutation::apply(list, t) {
            Ok(m) => Some(m),
            Err(rejection) => {
                log::debug!("Vorschau ohne Cursor-Punkt: {rejection}");
                None
            }
        },
        None => None,
    };

    let built = if list.len() >= 2 {
        builder
            .build_curve(list.points(), list.build_degree(), closed)
            .map(Some)
    } else {
        Ok(None)
    };
    if let Ok(curve) = &built {
        renderer.show_preview(curve.as_ref(), list.points());
    }

    if let Some(m) = mutation {
        m.revert(list);
    }
    built.map(|_| ())
}
