mod input;
mod loop_runner;
mod rendering;
mod scene;
mod scheduler;

pub use input::{InputAction, InputSnapshot, MOVE_ACTIONS};
pub use loop_runner::{run_headless, FrameSink, InputSource, LoopConfig, LoopSummary};
pub use rendering::{
    actor_draw, animated_tile_draw, chunk_offset_for, cursor_to_grid, floor_tile_draw,
    grid_to_iso, iso_to_grid, load_sprite_catalog, tile_outline, world_to_chunk_local,
    DrawDirective, DrawList, OutlineDraw, Rect, SpriteCatalog, SpriteCatalogError, SpriteDraw,
    SpriteId, SpriteKeyError, SpriteSheet, Tint, CHUNK_SIZE, ISO_SCALE_PX, TILE_HEIGHT_PX,
    TILE_WIDTH_PX,
};
pub use scene::{
    Camera2D, GridPos, Scene, SceneCommand, Vec2, CAMERA_ZOOM_DEFAULT, CAMERA_ZOOM_MAX,
    CAMERA_ZOOM_MIN,
};
pub use scheduler::{Action, ActionScheduler, ActionStatus};
