use std::collections::VecDeque;

use isowalk_engine::{
    actor_draw, animated_tile_draw, chunk_offset_for, cursor_to_grid, floor_tile_draw,
    grid_to_iso, tile_outline, world_to_chunk_local, Action, ActionScheduler, ActionStatus,
    Camera2D, DrawDirective, DrawList, GridPos, InputAction, InputSnapshot, Scene, SceneCommand,
    SpriteCatalog, SpriteId, SpriteSheet, TileClass, TileMap, Tint, Vec2, MOVE_ACTIONS,
};
use tracing::{debug, info};

const SNAP_THRESHOLD_TILES: f32 = 0.1;
const HERO_ANIMATION_FPS: f32 = 8.0;
const HERO_ANIMATION_FRAMES: u32 = 4;
const HAZARD_FRAME_SECONDS: f32 = 0.1;
const HIGHLIGHT_COMPLETION_EPSILON: f32 = 1e-5;
pub(crate) const DEFAULT_WALK_SPEED_TILES_PER_SECOND: f32 = 6.0;
pub(crate) const DEFAULT_HIGHLIGHT_SECONDS: f32 = 0.4;
pub(crate) const DEFAULT_PICK_BIAS: Vec2 = Vec2 { x: 0.0, y: 1.0 };

include!("hero.rs");
include!("highlight.rs");
include!("session.rs");
