use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::draw::Rect;

const SPRITE_COUNT: usize = 3;

/// Every sprite the game draws. The catalog must carry an entry for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteId {
    Hero,
    FloorTile,
    HazardTile,
}

impl SpriteId {
    pub const ALL: [SpriteId; SPRITE_COUNT] =
        [SpriteId::Hero, SpriteId::FloorTile, SpriteId::HazardTile];

    pub const fn key(self) -> &'static str {
        match self {
            SpriteId::Hero => "hero",
            SpriteId::FloorTile => "iso_floor",
            SpriteId::HazardTile => "floor_fire",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    const fn index(self) -> usize {
        match self {
            SpriteId::Hero => 0,
            SpriteId::FloorTile => 1,
            SpriteId::HazardTile => 2,
        }
    }
}

/// Horizontal strip of equally sized frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub id: SpriteId,
    pub frame_width: f32,
    pub frame_height: f32,
    pub frames: u32,
}

impl SpriteSheet {
    /// Source rectangle of `index` (wrapped into range). A flipped frame has a
    /// negative width, which renderers treat as a horizontal mirror.
    pub fn frame_rect(&self, index: u32, flip_horizontal: bool) -> Rect {
        let index = index % self.frames.max(1);
        let width = if flip_horizontal {
            -self.frame_width
        } else {
            self.frame_width
        };
        Rect {
            x: self.frame_width * index as f32,
            y: 0.0,
            w: width,
            h: self.frame_height,
        }
    }
}

#[derive(Debug, Error)]
pub enum SpriteCatalogError {
    #[error("failed to read sprite catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse sprite catalog at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid sprite key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: SpriteKeyError,
    },
    #[error("sprite catalog has an entry for unknown sprite '{key}'")]
    Unknown { key: String },
    #[error("sprite catalog is missing an entry for '{}'", .id.key())]
    Missing { id: SpriteId },
    #[error("sprite '{}' must have positive frame size and at least one frame", .id.key())]
    Degenerate { id: SpriteId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not start with '/'")]
    LeadingSlash,
    #[error("sprite key must not contain '..'")]
    ParentTraversal,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

pub(crate) fn validate_sprite_key(key: &str) -> Result<(), SpriteKeyError> {
    if key.is_empty() {
        return Err(SpriteKeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(SpriteKeyError::LeadingSlash);
    }
    if key.contains("..") {
        return Err(SpriteKeyError::ParentTraversal);
    }
    for ch in key.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-') {
            continue;
        }
        return Err(SpriteKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    sprites: BTreeMap<String, SheetEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct SheetEntry {
    frame_width: f32,
    frame_height: f32,
    frames: u32,
}

/// Sprite-sheet metadata for every [`SpriteId`], verified complete at load.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCatalog {
    sheets: [SpriteSheet; SPRITE_COUNT],
}

impl SpriteCatalog {
    /// Sheets used by the bundled prototype art.
    pub fn builtin() -> Self {
        Self {
            sheets: [
                SpriteSheet {
                    id: SpriteId::Hero,
                    frame_width: 32.0,
                    frame_height: 32.0,
                    frames: 4,
                },
                SpriteSheet {
                    id: SpriteId::FloorTile,
                    frame_width: 32.0,
                    frame_height: 32.0,
                    frames: 1,
                },
                SpriteSheet {
                    id: SpriteId::HazardTile,
                    frame_width: 32.0,
                    frame_height: 32.0,
                    frames: 5,
                },
            ],
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SpriteCatalogError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let file: CatalogFile = serde_path_to_error::deserialize(&mut deserializer).map_err(
            |error| {
                let path = error.path().to_string();
                SpriteCatalogError::Parse {
                    path,
                    source: error.into_inner(),
                }
            },
        )?;

        let mut resolved: [Option<SpriteSheet>; SPRITE_COUNT] = [None; SPRITE_COUNT];
        for (key, entry) in file.sprites {
            validate_sprite_key(&key).map_err(|source| SpriteCatalogError::InvalidKey {
                key: key.clone(),
                source,
            })?;
            let id = SpriteId::from_key(&key).ok_or(SpriteCatalogError::Unknown { key })?;
            let sheet_ok = entry.frame_width.is_finite()
                && entry.frame_height.is_finite()
                && entry.frame_width > 0.0
                && entry.frame_height > 0.0
                && entry.frames > 0;
            if !sheet_ok {
                return Err(SpriteCatalogError::Degenerate { id });
            }
            resolved[id.index()] = Some(SpriteSheet {
                id,
                frame_width: entry.frame_width,
                frame_height: entry.frame_height,
                frames: entry.frames,
            });
        }

        let mut sheets = Self::builtin().sheets;
        for id in SpriteId::ALL {
            sheets[id.index()] = resolved[id.index()].ok_or(SpriteCatalogError::Missing { id })?;
        }
        Ok(Self { sheets })
    }

    pub fn sheet(&self, id: SpriteId) -> SpriteSheet {
        self.sheets[id.index()]
    }
}

pub fn load_sprite_catalog(path: &Path) -> Result<SpriteCatalog, SpriteCatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| SpriteCatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    SpriteCatalog::from_json_str(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CATALOG: &str = r#"{
        "sprites": {
            "hero": { "frame_width": 24, "frame_height": 40, "frames": 4 },
            "iso_floor": { "frame_width": 32, "frame_height": 32, "frames": 1 },
            "floor_fire": { "frame_width": 32, "frame_height": 48, "frames": 5 }
        }
    }"#;

    #[test]
    fn accepts_valid_keys() {
        for key in ["hero", "tiles/iso_floor", "floor-fire_2"] {
            assert!(validate_sprite_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_invalid_keys() {
        for key in ["", "/a", "..", "a/../b", "Hero", "a.b"] {
            assert!(validate_sprite_key(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn every_sprite_id_round_trips_through_its_key() {
        for id in SpriteId::ALL {
            assert_eq!(SpriteId::from_key(id.key()), Some(id));
            assert!(validate_sprite_key(id.key()).is_ok());
        }
    }

    #[test]
    fn full_catalog_resolves_every_sheet() {
        let catalog = SpriteCatalog::from_json_str(FULL_CATALOG).expect("catalog");
        let hero = catalog.sheet(SpriteId::Hero);
        assert_eq!(hero.frame_width, 24.0);
        assert_eq!(hero.frame_height, 40.0);
        assert_eq!(catalog.sheet(SpriteId::HazardTile).frames, 5);
    }

    #[test]
    fn missing_entry_fails_completeness_check() {
        let raw = r#"{ "sprites": { "hero": { "frame_width": 32, "frame_height": 32, "frames": 4 } } }"#;
        let error = SpriteCatalog::from_json_str(raw).expect_err("incomplete");
        assert!(matches!(
            error,
            SpriteCatalogError::Missing {
                id: SpriteId::FloorTile
            }
        ));
    }

    #[test]
    fn unknown_and_degenerate_entries_are_rejected() {
        let unknown = FULL_CATALOG.replace("\"floor_fire\"", "\"lava\"");
        assert!(matches!(
            SpriteCatalog::from_json_str(&unknown),
            Err(SpriteCatalogError::Unknown { .. })
        ));
        let degenerate = FULL_CATALOG.replace("\"frames\": 5", "\"frames\": 0");
        assert!(matches!(
            SpriteCatalog::from_json_str(&degenerate),
            Err(SpriteCatalogError::Degenerate {
                id: SpriteId::HazardTile
            })
        ));
    }

    #[test]
    fn parse_errors_carry_json_path() {
        let raw = FULL_CATALOG.replace("\"frames\": 4", "\"frames\": \"four\"");
        match SpriteCatalog::from_json_str(&raw) {
            Err(SpriteCatalogError::Parse { path, .. }) => {
                assert_eq!(path, "sprites.hero.frames");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn flipped_frame_rect_has_negative_width() {
        let sheet = SpriteCatalog::builtin().sheet(SpriteId::Hero);
        let rect = sheet.frame_rect(2, true);
        assert_eq!(rect.x, 64.0);
        assert_eq!(rect.w, -32.0);
        assert_eq!(sheet.frame_rect(6, false).x, 64.0);
    }

    #[test]
    fn catalog_loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sprites.json");
        fs::write(&path, FULL_CATALOG).expect("write");
        let catalog = load_sprite_catalog(&path).expect("load");
        assert_eq!(catalog.sheet(SpriteId::Hero).frame_width, 24.0);
        assert!(matches!(
            load_sprite_catalog(&dir.path().join("missing.json")),
            Err(SpriteCatalogError::Read { .. })
        ));
    }
}
