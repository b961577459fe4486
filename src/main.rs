//! Kurvenpunkt-Editor: Replay-Binary.
//!
//! Spielt ein JSON-Event-Skript gegen eine Edit-Session ab und gibt die
//! resultierenden Kontrollpunkte aus.
//!
//! Aufruf: `curve-edit-replay <skript.json> [optionen.toml]`

use std::path::PathBuf;

use anyhow::bail;
use curve_point_editor::app::ReplayScript;
use curve_point_editor::{
    CurveEditOptions, Polyline, PolylineBuilder, PreviewRenderer, SessionHost, SessionObserver,
};
use glam::Vec3;

/// Protokolliert Vorschau-Frames statt sie zu zeichnen.
#[derive(Default)]
struct LoggingRenderer {
    frames: usize,
}

impl PreviewRenderer<Polyline> for LoggingRenderer {
    fn show_preview(&mut self, curve: Option<&Polyline>, points: &[Vec3]) {
        self.frames += 1;
        log::debug!(
            "Vorschau #{}: {} Punkte, Länge {:.2}",
            self.frames,
            points.len(),
            curve.map_or(0.0, Polyline::length)
        );
    }
}

struct LoggingObserver;

impl SessionObserver for LoggingObserver {
    fn on_point_list_changed(&mut self, points: &[Vec3]) {
        log::debug!("Punktliste geändert: {} Punkte", points.len());
    }
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Kurvenpunkt-Editor Replay v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next().map(PathBuf::from) else {
        bail!("Aufruf: curve-edit-replay <skript.json> [optionen.toml]");
    };
    let options_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(CurveEditOptions::config_path);

    let options = CurveEditOptions::load_from_file(&options_path);
    let script = ReplayScript::load(&script_path)?;
    replay(script, options)
}

fn replay(script: ReplayScript, options: CurveEditOptions) -> anyhow::Result<()> {
    let (mut session, mut source, viewport) = script.into_parts(options)?;
    let mut renderer = LoggingRenderer::default();
    let mut observer = LoggingObserver;
    let mut host = SessionHost {
        input: &mut source,
        viewport: &viewport,
        builder: &PolylineBuilder,
        renderer: &mut renderer,
        observer: Some(&mut observer),
    };
    let curve = session.run(&mut host)?;

    log::info!(
        "Session beendet: {:?}, {} Änderungen, {} Vorschau-Frames",
        session.end(),
        session.edit_log().len(),
        renderer.frames
    );
    match curve {
        Some(curve) => {
            println!(
                "Kurve: {} Punkte, geschlossen: {}, Länge {:.3}",
                curve.points.len(),
                curve.closed,
                curve.length()
            );
            for (i, p) in curve.points.iter().enumerate() {
                println!("{:>4}: {:>10.3} {:>10.3} {:>10.3}", i, p.x, p.y, p.z);
            }
        }
        None => println!("Keine Kurve erzeugt"),
    }
    Ok(())
}
