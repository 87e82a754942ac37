use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::tiles::{ColorTable, Rgba, TileMap};

#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("failed to decode map image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("map has zero width or height")]
    Empty,
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
    #[error("map has no start tile")]
    MissingStart,
    #[error("map has {count} start tiles, expected exactly one")]
    MultipleStarts { count: usize },
    #[error("malformed color table: {reason}")]
    MalformedColorTable { reason: String },
}

/// Loads a map image with the standard color table.
pub fn load_tile_map(path: &Path) -> Result<TileMap, MapLoadError> {
    load_tile_map_with(path, &ColorTable::standard())
}

pub fn load_tile_map_with(path: &Path, table: &ColorTable) -> Result<TileMap, MapLoadError> {
    let image = image::open(path).map_err(|source| MapLoadError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels: Vec<Rgba> = rgba.pixels().map(|pixel| pixel.0).collect();
    let map = TileMap::from_pixels(width, height, &pixels, table)?;
    info!(
        path = %path.display(),
        width,
        height,
        spawn_x = map.spawn().x,
        spawn_y = map.spawn().y,
        "map_loaded"
    );
    Ok(map)
}
