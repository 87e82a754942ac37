/// Everything an action may touch during one resumption.
pub(crate) struct StepContext {
    pub(crate) dt: f32,
    pub(crate) hero: Hero,
    pub(crate) chunk_offset: GridPos,
    pub(crate) draws: DrawList,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SessionSettings {
    pub(crate) walk_speed: f32,
    pub(crate) highlight_seconds: f32,
    pub(crate) camera: Camera2D,
    pub(crate) pick_bias: Vec2,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED_TILES_PER_SECOND,
            highlight_seconds: DEFAULT_HIGHLIGHT_SECONDS,
            camera: Camera2D::default(),
            pick_bias: DEFAULT_PICK_BIAS,
        }
    }
}

/// One hero on one map. Owns the scheduler and all per-step state.
pub(crate) struct GameSession {
    map: TileMap,
    sprites: SpriteCatalog,
    settings: SessionSettings,
    scheduler: ActionScheduler<StepContext>,
    ctx: StepContext,
    elapsed_seconds: f32,
}

impl GameSession {
    pub(crate) fn new(map: TileMap, sprites: SpriteCatalog, settings: SessionSettings) -> Self {
        let hero = Hero::at(map.spawn());
        let chunk_offset = chunk_offset_for(hero.position);
        Self {
            map,
            sprites,
            settings,
            scheduler: ActionScheduler::new(),
            ctx: StepContext {
                dt: 0.0,
                hero,
                chunk_offset,
                draws: DrawList::new(),
            },
            elapsed_seconds: 0.0,
        }
    }

    /// Runs one simulation step and returns its directives in depth order.
    pub(crate) fn step(&mut self, dt: f32, input: &InputSnapshot) -> Vec<DrawDirective> {
        self.run_step(dt, input);
        self.ctx.draws.drain_sorted()
    }

    fn run_step(&mut self, dt: f32, input: &InputSnapshot) {
        self.ctx.dt = dt;
        self.apply_nudges(input);
        if let Some(click_px) = input.click_released_px() {
            self.handle_click(click_px);
        }

        self.ctx.chunk_offset = chunk_offset_for(self.ctx.hero.position);
        self.emit_visible_tiles();

        let had_walk = self.scheduler.has_primary();
        if self.scheduler.resume_primary(&mut self.ctx) == ActionStatus::Completed {
            if had_walk {
                info!(
                    hero_x = self.ctx.hero.position.x,
                    hero_y = self.ctx.hero.position.y,
                    "walk_completed"
                );
            }
            self.emit_idle_hero();
        }
        self.scheduler.resume_ancillary(&mut self.ctx);

        self.elapsed_seconds += dt;
    }

    fn apply_nudges(&mut self, input: &InputSnapshot) {
        for action in MOVE_ACTIONS {
            if !input.is_pressed(action) {
                continue;
            }
            let Some(offset) = action.nudge_offset() else {
                continue;
            };
            let destination = self.ctx.hero.position + offset.as_vec2();
            let cell = destination.floor_to_grid();
            if !self.map.is_walkable(cell) {
                debug!(?action, cell_x = cell.x, cell_y = cell.y, "nudge_rejected");
                continue;
            }
            if self.scheduler.cancel_primary() {
                debug!(?action, "walk_cancelled_by_nudge");
            }
            self.ctx.hero.position = destination;
        }
    }

    fn handle_click(&mut self, click_px: Vec2) {
        let world = self.settings.camera.screen_to_world(click_px);
        let chunk_offset = chunk_offset_for(self.ctx.hero.position);
        let goal = cursor_to_grid(world, chunk_offset, self.settings.pick_bias);
        self.request_walk_to(goal);
    }

    /// Plans from the hero's cell to `goal` and, when a route exists, starts a
    /// highlight there and makes the walk the primary action. Returns whether
    /// a walk was scheduled.
    pub(crate) fn request_walk_to(&mut self, goal: GridPos) -> bool {
        let start = self.ctx.hero.cell();
        let Some(path) = self.map.find_path(start, goal) else {
            debug!(goal_x = goal.x, goal_y = goal.y, "click_ignored");
            return false;
        };

        let chunk_offset = chunk_offset_for(self.ctx.hero.position);
        self.scheduler.spawn_ancillary(Box::new(HighlightAction::new(
            goal,
            chunk_offset,
            self.settings.highlight_seconds,
        )));
        let steps = path.len();
        let walk = WalkAction::new(
            path.into_steps(),
            self.settings.walk_speed,
            self.sprites.sheet(SpriteId::Hero),
        );
        let replaced = self.scheduler.set_primary(Box::new(walk));
        info!(
            goal_x = goal.x,
            goal_y = goal.y,
            steps,
            replaced,
            "walk_scheduled"
        );
        true
    }

    fn emit_visible_tiles(&mut self) {
        let floor = self.sprites.sheet(SpriteId::FloorTile);
        let hazard = self.sprites.sheet(SpriteId::HazardTile);
        let hazard_frame = (self.elapsed_seconds / HAZARD_FRAME_SECONDS).floor() as u32;
        for (local, class) in self.map.visible_chunk_tiles(self.ctx.chunk_offset) {
            let draw = match class {
                TileClass::Floor | TileClass::Start => floor_tile_draw(&floor, local),
                TileClass::Hazard => animated_tile_draw(&hazard, local, hazard_frame),
                TileClass::Absent => continue,
            };
            self.ctx.draws.push_sprite(draw);
        }
    }

    fn emit_idle_hero(&mut self) {
        let local = self.ctx.hero.position - self.ctx.chunk_offset.as_vec2();
        let sheet = self.sprites.sheet(SpriteId::Hero);
        self.ctx
            .draws
            .push_sprite(actor_draw(&sheet, local, 0, false));
    }

    pub(crate) fn hero_position(&self) -> Vec2 {
        self.ctx.hero.position
    }

    pub(crate) fn has_walk(&self) -> bool {
        self.scheduler.has_primary()
    }

    pub(crate) fn highlight_count(&self) -> usize {
        self.scheduler.ancillary_len()
    }

    pub(crate) fn chunk_offset(&self) -> GridPos {
        self.ctx.chunk_offset
    }

    pub(crate) fn elapsed_seconds(&self) -> f32 {
        self.elapsed_seconds
    }
}

impl Scene for GameSession {
    fn load(&mut self) {
        let spawn = self.map.spawn();
        info!(
            spawn_x = spawn.x,
            spawn_y = spawn.y,
            map_width = self.map.width(),
            map_height = self.map.height(),
            "session_started"
        );
    }

    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        frame: &mut DrawList,
    ) -> SceneCommand {
        self.run_step(fixed_dt_seconds, input);
        frame.append(&mut self.ctx.draws);
        if input.is_pressed(InputAction::Quit) {
            return SceneCommand::Quit;
        }
        SceneCommand::None
    }
}
