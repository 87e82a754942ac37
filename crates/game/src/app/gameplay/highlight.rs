/// Ancillary action: a fading outline on one tile. Knows only its target,
/// the chunk offset at creation and its own clock.
struct HighlightAction {
    target: GridPos,
    chunk_offset: GridPos,
    duration_seconds: f32,
    elapsed_seconds: f32,
}

impl HighlightAction {
    fn new(target: GridPos, chunk_offset: GridPos, duration_seconds: f32) -> Self {
        Self {
            target,
            chunk_offset,
            duration_seconds,
            elapsed_seconds: 0.0,
        }
    }

    fn alpha(&self) -> f32 {
        if self.duration_seconds <= 0.0 {
            return 0.0;
        }
        1.0 - self.elapsed_seconds / self.duration_seconds
    }
}

impl Action<StepContext> for HighlightAction {
    fn resume(&mut self, ctx: &mut StepContext) -> ActionStatus {
        let local = world_to_chunk_local(self.target, self.chunk_offset);
        ctx.draws
            .push_outline(tile_outline(local, Tint::YELLOW.faded(self.alpha())));
        self.elapsed_seconds += ctx.dt;
        if self.elapsed_seconds >= self.duration_seconds - HIGHLIGHT_COMPLETION_EPSILON {
            ActionStatus::Completed
        } else {
            ActionStatus::Running
        }
    }

    fn label(&self) -> &'static str {
        "highlight"
    }
}
