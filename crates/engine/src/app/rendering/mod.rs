mod draw;
mod sprites;
mod transform;

pub use draw::{
    actor_draw, animated_tile_draw, floor_tile_draw, tile_outline, DrawDirective, DrawList,
    OutlineDraw, Rect, SpriteDraw, Tint,
};
pub use sprites::{
    load_sprite_catalog, SpriteCatalog, SpriteCatalogError, SpriteId, SpriteKeyError,
    SpriteSheet,
};
pub use transform::{
    chunk_offset_for, cursor_to_grid, grid_to_iso, iso_to_grid, world_to_chunk_local, CHUNK_SIZE,
    ISO_SCALE_PX, TILE_HEIGHT_PX, TILE_WIDTH_PX,
};
