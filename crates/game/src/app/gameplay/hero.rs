#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hero {
    pub(crate) position: Vec2,
}

impl Hero {
    pub(crate) fn at(cell: GridPos) -> Self {
        Self {
            position: cell.as_vec2(),
        }
    }

    pub(crate) fn cell(&self) -> GridPos {
        self.position.floor_to_grid()
    }
}

/// Primary action: walks the hero along a planned path, one bounded move per
/// resumption, drawing the hero while any cell remains.
///
/// The position is read from and written back to the step context every
/// resumption, so whatever else moved the hero in between is respected and a
/// replaced walk can never restore an old position.
struct WalkAction {
    remaining: VecDeque<GridPos>,
    last_position: Vec2,
    clock_seconds: f32,
    started: bool,
    speed_tiles_per_second: f32,
    sheet: SpriteSheet,
}

impl WalkAction {
    fn new(steps: Vec<GridPos>, speed_tiles_per_second: f32, sheet: SpriteSheet) -> Self {
        Self {
            remaining: steps.into(),
            last_position: Vec2::ZERO,
            clock_seconds: 0.0,
            started: false,
            speed_tiles_per_second,
            sheet,
        }
    }

    fn advance(&mut self, ctx: &mut StepContext) {
        let Some(head) = self.remaining.front().copied() else {
            return;
        };
        let position = ctx.hero.position;
        let to_head = head.as_vec2() - position;
        let distance = to_head.length();
        if distance > SNAP_THRESHOLD_TILES {
            let travel = (self.speed_tiles_per_second * ctx.dt).min(distance);
            ctx.hero.position = position + to_head * (travel / distance);
        } else {
            ctx.hero.position = head.as_vec2();
            self.remaining.pop_front();
        }
    }

    fn animation_frame(&self) -> u32 {
        (self.clock_seconds * HERO_ANIMATION_FPS).floor() as u32 % HERO_ANIMATION_FRAMES
    }
}

impl Action<StepContext> for WalkAction {
    fn resume(&mut self, ctx: &mut StepContext) -> ActionStatus {
        self.last_position = ctx.hero.position;
        if self.started {
            self.clock_seconds += ctx.dt;
            self.advance(ctx);
        }
        self.started = true;

        if self.remaining.is_empty() {
            return ActionStatus::Completed;
        }

        let flip = grid_to_iso(ctx.hero.position - self.last_position).x > 0.0;
        let local = ctx.hero.position - ctx.chunk_offset.as_vec2();
        ctx.draws.push_sprite(actor_draw(
            &self.sheet,
            local,
            self.animation_frame(),
            flip,
        ));
        ActionStatus::Running
    }

    fn label(&self) -> &'static str {
        "walk"
    }
}
