use std::process::ExitCode;

use isowalk_engine::{run_headless, DrawDirective, FrameSink};
use tracing::{debug, error, info};

use super::bootstrap::{AppError, AppWiring};

/// Stands in for a renderer: counts what it is handed and logs each frame.
#[derive(Debug, Default)]
pub(crate) struct LoggingFrameSink {
    frames: u64,
    sprites: u64,
    overlays: u64,
}

impl FrameSink for LoggingFrameSink {
    fn present(&mut self, step: u64, directives: &[DrawDirective]) {
        let overlays = directives
            .iter()
            .filter(|directive| matches!(directive, DrawDirective::Outline(_)))
            .count();
        let sprites = directives.len() - overlays;
        self.frames += 1;
        self.sprites += sprites as u64;
        self.overlays += overlays as u64;
        debug!(step, sprites, overlays, "frame_presented");
    }
}

pub(crate) fn run(app: Result<AppWiring, AppError>) -> ExitCode {
    let AppWiring {
        config,
        mut session,
        mut script,
    } = match app {
        Ok(wiring) => wiring,
        Err(err) => {
            error!(error = %err, "startup_failed");
            return ExitCode::FAILURE;
        }
    };

    let mut sink = LoggingFrameSink::default();
    let summary = run_headless(&config, &mut session, &mut script, &mut sink);
    let hero = session.hero_position();
    info!(
        steps = summary.steps_run,
        directives = summary.directives_presented,
        frames = sink.frames,
        sprites = sink.sprites,
        overlays = sink.overlays,
        quit = summary.quit_requested,
        hero_x = hero.x,
        hero_y = hero.y,
        chunk_x = session.chunk_offset().x,
        chunk_y = session.chunk_offset().y,
        walking = session.has_walk(),
        highlights = session.highlight_count(),
        elapsed_seconds = session.elapsed_seconds(),
        "run_complete"
    );

    ExitCode::SUCCESS
}
