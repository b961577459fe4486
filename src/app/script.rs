//! Skriptgesteuerte Eingabequelle und JSON-Replay-Skripte.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::constraints::{ConstraintSet, CursorConstraint};
use super::events::{InputEvent, Modifiers};
use super::host::PointerSource;
use super::session::{CurveEditSession, SessionMode};
use super::snap::SnapEngine;
use crate::core::{ConstraintPlane, GuideCurve, Polyline, TopViewport};
use crate::shared::CurveEditOptions;

/// Ein Skript-Schritt: Event plus Modifier-Zustand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub event: InputEvent,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl ScriptStep {
    pub fn plain(event: InputEvent) -> Self {
        Self {
            event,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with(event: InputEvent, modifiers: Modifiers) -> Self {
        Self { event, modifiers }
    }
}

impl From<InputEvent> for ScriptStep {
    fn from(event: InputEvent) -> Self {
        Self::plain(event)
    }
}

/// Spielt eine feste Event-Folge ab und verhält sich wie ein Host.
///
/// Positionen werden wie beim echten Host auf die zuletzt gesetzte
/// Cursor-Constraint beschränkt. Ist das Skript erschöpft, folgt `Cancel`.
#[derive(Debug, Default)]
pub struct ScriptedPointerSource {
    steps: VecDeque<ScriptStep>,
    current: Modifiers,
    constraint: CursorConstraint,
    grid_snap: bool,
    constrain_calls: usize,
    grid_snap_toggles: Vec<bool>,
}

impl ScriptedPointerSource {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            grid_snap: true,
            ..Self::default()
        }
    }

    /// Skript nur aus Events ohne Modifier.
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self::new(events.into_iter().map(ScriptStep::plain))
    }

    /// Noch nicht abgespielte Schritte.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    pub fn grid_snap_enabled(&self) -> bool {
        self.grid_snap
    }

    /// Alle `set_grid_snap`-Aufrufe in Reihenfolge.
    pub fn grid_snap_toggles(&self) -> &[bool] {
        &self.grid_snap_toggles
    }

    /// Wie oft `constrain_to` aufgerufen wurde.
    pub fn constrain_calls(&self) -> usize {
        self.constrain_calls
    }

    pub fn constraint(&self) -> &CursorConstraint {
        &self.constraint
    }

    fn restrict(&self, event: InputEvent) -> InputEvent {
        match event {
            InputEvent::PointerDown(p) => InputEvent::PointerDown(self.constraint.apply(p)),
            InputEvent::Point(p) => InputEvent::Point(self.constraint.apply(p)),
            InputEvent::PointerMoved(p) => InputEvent::PointerMoved(self.constraint.apply(p)),
            other => other,
        }
    }
}

impl PointerSource for ScriptedPointerSource {
    fn next_event(&mut self) -> InputEvent {
        match self.steps.pop_front() {
            Some(step) => {
                self.current = step.modifiers;
                self.restrict(step.event)
            }
            None => {
                log::warn!("Skript erschöpft, Session wird abgebrochen");
                self.current = Modifiers::default();
                InputEvent::Cancel
            }
        }
    }

    fn modifiers(&self) -> Modifiers {
        self.current
    }

    fn constrain_to(&mut self, constraint: CursorConstraint) {
        self.constrain_calls += 1;
        self.constraint = constraint;
    }

    fn set_grid_snap(&mut self, enabled: bool) {
        self.grid_snap = enabled;
        self.grid_snap_toggles.push(enabled);
    }
}

/// Replay-Skript: Startzustand einer Session plus Event-Folge (JSON).
#[derive(Debug, Deserialize)]
pub struct ReplayScript {
    pub mode: SessionMode,
    #[serde(default)]
    pub initial_points: Vec<Vec3>,
    /// Zusätzlich gesperrte Punkt-Indizes
    #[serde(default)]
    pub locked: Vec<usize>,
    #[serde(default)]
    pub plane: Option<ConstraintPlane>,
    #[serde(default)]
    pub guide_curves: Vec<Polyline>,
    #[serde(default)]
    pub snap_curves: Vec<Polyline>,
    #[serde(default)]
    pub max_points: Option<usize>,
    #[serde(default = "default_viewport")]
    pub viewport: TopViewport,
    pub steps: Vec<ScriptStep>,
}

fn default_viewport() -> TopViewport {
    TopViewport::new(Vec2::new(1280.0, 720.0))
}

impl ReplayScript {
    /// Lädt ein Skript aus einer JSON-Datei.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Skript nicht lesbar: {}", path.display()))?;
        let script: Self = serde_json::from_str(&content)
            .with_context(|| format!("Skript fehlerhaft: {}", path.display()))?;
        log::info!(
            "Skript geladen: {} Schritte, {} Startpunkte",
            script.steps.len(),
            script.initial_points.len()
        );
        Ok(script)
    }

    /// Baut Session, Eingabequelle und Viewport aus dem Skript.
    pub fn into_parts(
        self,
        options: CurveEditOptions,
    ) -> anyhow::Result<(CurveEditSession, ScriptedPointerSource, TopViewport)> {
        let mut constraints = ConstraintSet::new();
        if let Some(plane) = self.plane {
            constraints.register_plane(plane);
        }
        constraints.register_curves(
            self.guide_curves
                .into_iter()
                .map(|c| Arc::new(c) as Arc<dyn GuideCurve>),
        );
        let snaps = SnapEngine::new(
            self.snap_curves
                .into_iter()
                .map(|c| Arc::new(c) as Arc<dyn GuideCurve>)
                .collect(),
        );

        let mut session =
            CurveEditSession::new(self.mode, self.initial_points, constraints, snaps, options)
                .context("Session konnte nicht gestartet werden")?
                .with_max_points(self.max_points);
        for index in self.locked {
            session
                .lock_point(index)
                .with_context(|| format!("Punkt {index} nicht sperrbar"))?;
        }
        Ok((session, ScriptedPointerSource::new(self.steps), self.viewport))
    }
}
