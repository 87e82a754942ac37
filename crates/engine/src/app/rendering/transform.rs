use crate::app::{GridPos, Vec2};

pub const TILE_WIDTH_PX: f32 = 32.0;
/// Pixels per grid unit along each iso axis; half of the tile width.
pub const ISO_SCALE_PX: f32 = TILE_WIDTH_PX / 2.0;
pub const TILE_HEIGHT_PX: f32 = ISO_SCALE_PX;
/// Edge length, in tiles, of the visible chunk window.
pub const CHUNK_SIZE: i32 = 16;

/// Projects a (possibly fractional) grid position to iso-space pixels.
pub fn grid_to_iso(grid: Vec2) -> Vec2 {
    Vec2 {
        x: (grid.x - grid.y) * ISO_SCALE_PX,
        y: ((grid.x + grid.y) / 2.0) * ISO_SCALE_PX,
    }
}

/// Exact inverse of [`grid_to_iso`].
pub fn iso_to_grid(iso: Vec2) -> Vec2 {
    let u = iso.x / ISO_SCALE_PX;
    let v = iso.y / ISO_SCALE_PX;
    Vec2 {
        x: (2.0 * v + u) / 2.0,
        y: (2.0 * v - u) / 2.0,
    }
}

pub fn world_to_chunk_local(world: GridPos, chunk_offset: GridPos) -> GridPos {
    world - chunk_offset
}

/// Origin of the chunk containing `position`: `floor(position / CHUNK_SIZE) * CHUNK_SIZE`.
pub fn chunk_offset_for(position: Vec2) -> GridPos {
    let cell = position.floor_to_grid();
    GridPos {
        x: cell.x.div_euclid(CHUNK_SIZE) * CHUNK_SIZE,
        y: cell.y.div_euclid(CHUNK_SIZE) * CHUNK_SIZE,
    }
}

/// Maps an iso-space world point (already through the camera) to the grid cell
/// under it. `pick_bias` is added in grid units before flooring.
pub fn cursor_to_grid(world: Vec2, chunk_offset: GridPos, pick_bias: Vec2) -> GridPos {
    (iso_to_grid(world) + pick_bias).floor_to_grid() + chunk_offset
}
