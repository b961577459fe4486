//! Hit-Testing im Screen-Space: nächster Kontrollpunkt plus Einfügeseite.
//!
//! Die Einfügeseite entscheidet ein Winkelvergleich am Cursor: der Nachbar,
//! dessen Richtung vom Cursor aus den größeren Winkel zur Richtung des
//! nächsten Punkts bildet, begrenzt das Einfüge-Segment.

use glam::{Vec2, Vec3};

use crate::core::Viewport;

/// Ergebnis von `locate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located {
    /// Index des nächsten echten Punkts (erster bei Gleichstand)
    pub nearest: usize,
    /// Nachbar auf der Einfügeseite; `None` bei nur einem Punkt
    pub insertion_side: Option<usize>,
    /// Screen-Abstand Cursor → `nearest` in Pixeln
    pub screen_distance: f32,
}

/// Wo ein neuer Punkt eingefügt wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionSlot {
    /// Einfügen an Index
    At(usize),
    /// Geschlossene Kurve, Segment zwischen letztem echten und erstem Punkt:
    /// an Index 0 einfügen und das schließende Duplikat neu setzen
    Wrap,
}

/// Unsigned Winkel zwischen `cursor→a` und `cursor→b` im Screen-Space.
fn cursor_angle(cursor: Vec2, a: Vec2, b: Vec2) -> f32 {
    let da = a - cursor;
    let db = b - cursor;
    da.perp_dot(db).atan2(da.dot(db)).abs()
}

/// Findet den nächsten Punkt und die Einfügeseite zur Cursor-Position.
///
/// `points` sind die gespeicherten Punkte; bei `closed` wird das schließende
/// Duplikat ignoriert. `None`, wenn keine echten Punkte existieren.
pub fn locate(
    points: &[Vec3],
    closed: bool,
    cursor: Vec2,
    viewport: &dyn Viewport,
) -> Option<Located> {
    let real = if closed {
        &points[..points.len().saturating_sub(1)]
    } else {
        points
    };
    if real.is_empty() {
        return None;
    }

    let screen: Vec<Vec2> = real.iter().map(|&p| viewport.world_to_screen(p)).collect();

    let (nearest, screen_distance) = screen
        .iter()
        .enumerate()
        .map(|(i, s)| (i, s.distance(cursor)))
        .fold((0, f32::INFINITY), |best, cur| {
            if cur.1 < best.1 {
                cur
            } else {
                best
            }
        });

    let count = real.len();
    let insertion_side = if count == 1 {
        None
    } else if !closed && nearest == 0 {
        Some(1)
    } else if !closed && nearest == count - 1 {
        Some(count - 2)
    } else {
        let next = (nearest + 1) % count;
        let prev = (nearest + count - 1) % count;
        let angle_next = cursor_angle(cursor, screen[nearest], screen[next]);
        let angle_prev = cursor_angle(cursor, screen[nearest], screen[prev]);
        if angle_next > angle_prev {
            Some(next)
        } else {
            Some(prev)
        }
    };

    Some(Located {
        nearest,
        insertion_side,
        screen_distance,
    })
}

/// Leitet den Einfügeplatz aus nächstem Punkt und Einfügeseite ab.
///
/// `real_len` ist die Anzahl echter Punkte (ohne schließendes Duplikat).
pub fn insertion_slot(located: &Located, real_len: usize, closed: bool) -> InsertionSlot {
    let Some(side) = located.insertion_side else {
        // Nur ein Punkt: hinter ihm anhängen
        return InsertionSlot::At(located.nearest + 1);
    };
    let (lo, hi) = if located.nearest < side {
        (located.nearest, side)
    } else {
        (side, located.nearest)
    };
    if closed && lo == 0 && hi + 1 == real_len && real_len > 2 {
        InsertionSlot::Wrap
    } else {
        InsertionSlot::At(hi)
    }
}
