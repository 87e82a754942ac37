mod loader;
mod planner;
mod tiles;

pub use loader::{load_tile_map, load_tile_map_with, MapLoadError};
pub use planner::{uniform_cost_search, Path, NEIGHBOR_ORDER};
pub use tiles::{ColorTable, Rgba, TileClass, TileMap};
