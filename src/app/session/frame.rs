//! Vorschau-Frame pro Cursor-Bewegung.

use glam::Vec3;

use super::{CurveEditSession, SessionState};
use crate::app::events::Modifiers;
use crate::app::host::{CurveBuilder, SessionHost};
use crate::app::preview::{render_frame, Tentative};

impl CurveEditSession {
    /// Zeichnet einen Vorschau-Frame mit dem Cursor-Punkt.
    ///
    /// Neue Kurven werden in der Vorschau immer offen gezeigt. Ein verworfener
    /// Kandidat zeigt nur den bestätigten Stand.
    pub(super) fn preview_frame<B: CurveBuilder>(
        &mut self,
        pos: Vec3,
        modifiers: Modifiers,
        host: &mut SessionHost<'_, B>,
    ) -> anyhow::Result<()> {
        host.notify_dynamic_draw(pos);

        let candidate = self.filter_candidate(pos, modifiers).ok().map(|(p, _)| p);
        let (tentative, closed) = match self.state {
            SessionState::Picking => (candidate.map(Tentative::Append), false),
            SessionState::Moving { index } => (
                candidate.map(|point| Tentative::Move { index, point }),
                self.points.is_closed(),
            ),
            SessionState::Editing => (None, self.points.is_closed()),
            SessionState::Idle | SessionState::Done | SessionState::Cancelled => return Ok(()),
        };

        render_frame(
            &mut self.points,
            tentative,
            closed,
            host.builder,
            &mut *host.renderer,
        )
    }
}
