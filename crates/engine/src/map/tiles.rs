use std::collections::HashMap;

use tracing::debug;

use crate::app::{GridPos, CHUNK_SIZE};

use super::loader::MapLoadError;
use super::planner::{uniform_cost_search, Path};

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileClass {
    /// Outside the loaded map, or a pixel with no table entry.
    Absent,
    Floor,
    /// Only seen in the source pixels. Rewritten to `Floor` at load.
    Start,
    /// Animated, but walks exactly like `Floor`.
    Hazard,
}

impl TileClass {
    pub fn is_walkable(self) -> bool {
        matches!(self, TileClass::Floor | TileClass::Start | TileClass::Hazard)
    }
}

/// Exact-match color classification table for map images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<(Rgba, TileClass)>,
}

impl ColorTable {
    pub fn new(entries: Vec<(Rgba, TileClass)>) -> Result<Self, MapLoadError> {
        for (index, (color, class)) in entries.iter().enumerate() {
            if *class == TileClass::Absent {
                return Err(MapLoadError::MalformedColorTable {
                    reason: format!("color {color:?} maps to Absent"),
                });
            }
            if entries[..index].iter().any(|(other, _)| other == color) {
                return Err(MapLoadError::MalformedColorTable {
                    reason: format!("color {color:?} appears more than once"),
                });
            }
        }
        if !entries.iter().any(|(_, class)| *class == TileClass::Start) {
            return Err(MapLoadError::MalformedColorTable {
                reason: "no color maps to Start".to_string(),
            });
        }
        Ok(Self { entries })
    }

    pub fn standard() -> Self {
        Self {
            entries: vec![
                ([255, 0, 255, 255], TileClass::Start),
                ([255, 0, 0, 255], TileClass::Hazard),
                ([0, 0, 0, 255], TileClass::Floor),
            ],
        }
    }

    pub fn classify(&self, color: Rgba) -> TileClass {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == color)
            .map(|(_, class)| *class)
            .unwrap_or(TileClass::Absent)
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Static tile grid. Immutable once built; the single `Start` cell has
/// already been rewritten to `Floor` and recorded as the spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<TileClass>,
    spawn: GridPos,
}

impl TileMap {
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: &[Rgba],
        table: &ColorTable,
    ) -> Result<Self, MapLoadError> {
        if width == 0 || height == 0 {
            return Err(MapLoadError::Empty);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(MapLoadError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        let tiles = pixels.iter().map(|pixel| table.classify(*pixel)).collect();
        Self::from_classes(width, height, tiles)
    }

    /// Text grid for tests and demos: `.` floor, `^` hazard, `S` start,
    /// anything else absent. Rows are padded to the longest one.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, MapLoadError> {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(MapLoadError::Empty);
        }
        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            let mut count = 0;
            for ch in row.chars() {
                tiles.push(match ch {
                    '.' => TileClass::Floor,
                    '^' => TileClass::Hazard,
                    'S' => TileClass::Start,
                    _ => TileClass::Absent,
                });
                count += 1;
            }
            tiles.extend(std::iter::repeat(TileClass::Absent).take(width - count));
        }
        Self::from_classes(width as u32, height as u32, tiles)
    }

    fn from_classes(width: u32, height: u32, mut tiles: Vec<TileClass>) -> Result<Self, MapLoadError> {
        let starts: Vec<usize> = tiles
            .iter()
            .enumerate()
            .filter(|(_, class)| **class == TileClass::Start)
            .map(|(index, _)| index)
            .collect();
        let spawn_index = match starts.as_slice() {
            [] => return Err(MapLoadError::MissingStart),
            [index] => *index,
            many => return Err(MapLoadError::MultipleStarts { count: many.len() }),
        };
        tiles[spawn_index] = TileClass::Floor;
        let spawn = GridPos::new(
            (spawn_index % width as usize) as i32,
            (spawn_index / width as usize) as i32,
        );
        Ok(Self {
            width,
            height,
            tiles,
            spawn,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn spawn(&self) -> GridPos {
        self.spawn
    }

    fn index_of(&self, pos: GridPos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as u32, pos.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn classify(&self, pos: GridPos) -> TileClass {
        self.index_of(pos)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(TileClass::Absent)
    }

    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.classify(pos).is_walkable()
    }

    /// Shortest walkable route from `start` to `goal`, `None` when there is
    /// nothing to do or no way there.
    pub fn find_path(&self, start: GridPos, goal: GridPos) -> Option<Path> {
        if !self.is_walkable(goal) {
            debug!(goal_x = goal.x, goal_y = goal.y, "path_goal_not_walkable");
            return None;
        }
        let path = uniform_cost_search(start, goal, |pos| self.is_walkable(pos).then_some(1));
        if path.is_none() && start != goal {
            debug!(
                start_x = start.x,
                start_y = start.y,
                goal_x = goal.x,
                goal_y = goal.y,
                "path_unreachable"
            );
        }
        path
    }

    /// The `CHUNK_SIZE` square at `chunk_offset` plus a one-tile border, as
    /// chunk-local positions. Row-major, `y` outer.
    pub fn visible_chunk_tiles(
        &self,
        chunk_offset: GridPos,
    ) -> impl Iterator<Item = (GridPos, TileClass)> + '_ {
        (-1..=CHUNK_SIZE).flat_map(move |y| {
            (-1..=CHUNK_SIZE).map(move |x| {
                let local = GridPos::new(x, y);
                (local, self.classify(local + chunk_offset))
            })
        })
    }

    pub fn class_counts(&self) -> HashMap<TileClass, usize> {
        let mut counts = HashMap::new();
        for class in &self.tiles {
            *counts.entry(*class).or_insert(0) += 1;
        }
        counts
    }
}
