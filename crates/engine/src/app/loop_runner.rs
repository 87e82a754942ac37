use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::input::InputSnapshot;
use super::rendering::{DrawDirective, DrawList};
use super::scene::{Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    pub max_steps: u64,
    /// Sleep between steps so the run takes wall-clock time.
    pub realtime: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            max_steps: 600,
            realtime: false,
        }
    }
}

impl LoopConfig {
    pub fn fixed_dt(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_tps.max(1) as f64)
    }
}

/// Supplies the input edges for each step.
pub trait InputSource {
    fn snapshot_for_step(&mut self, step: u64) -> InputSnapshot;
}

/// Rendering collaborator. Receives each step's directives in depth order.
pub trait FrameSink {
    fn present(&mut self, step: u64, directives: &[DrawDirective]);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub steps_run: u64,
    pub directives_presented: u64,
    pub quit_requested: bool,
}

pub fn run_headless(
    config: &LoopConfig,
    scene: &mut dyn Scene,
    input: &mut dyn InputSource,
    sink: &mut dyn FrameSink,
) -> LoopSummary {
    let fixed_dt = config.fixed_dt();
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let progress_every = u64::from(config.target_tps.max(1));
    info!(
        target_tps = config.target_tps,
        max_steps = config.max_steps,
        realtime = config.realtime,
        "loop_config"
    );

    scene.load();
    let mut frame = DrawList::new();
    let mut summary = LoopSummary::default();
    let mut last_step_instant = Instant::now();

    for step in 0..config.max_steps {
        let snapshot = input.snapshot_for_step(step);
        let command = scene.update(fixed_dt_seconds, &snapshot, &mut frame);
        let directives = frame.drain_sorted();
        sink.present(step, &directives);
        summary.steps_run = summary.steps_run.saturating_add(1);
        summary.directives_presented = summary
            .directives_presented
            .saturating_add(directives.len() as u64);

        if (step + 1) % progress_every == 0 {
            debug!(step, directives = directives.len(), "loop_progress");
        }
        if command == SceneCommand::Quit {
            summary.quit_requested = true;
            info!(step, "quit_requested");
            break;
        }

        if config.realtime {
            let elapsed = Instant::now().saturating_duration_since(last_step_instant);
            let sleep = compute_cap_sleep(elapsed, Some(fixed_dt));
            if sleep > Duration::ZERO {
                thread::sleep(sleep);
            }
            last_step_instant = Instant::now();
        }
    }

    info!(
        steps = summary.steps_run,
        directives = summary.directives_presented,
        "loop_finished"
    );
    summary
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}
