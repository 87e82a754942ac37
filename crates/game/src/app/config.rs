use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use isowalk_engine::{AppPaths, Camera2D, LoopConfig, Vec2, CAMERA_ZOOM_DEFAULT};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::gameplay::{
    SessionSettings, DEFAULT_HIGHLIGHT_SECONDS, DEFAULT_PICK_BIAS,
    DEFAULT_WALK_SPEED_TILES_PER_SECOND,
};

pub(crate) const CONFIG_ENV_VAR: &str = "ISOWALK_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path} at {json_path}: {source}")]
    Parse {
        path: PathBuf,
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CameraConfig {
    pub(crate) offset: [f32; 2],
    pub(crate) target: [f32; 2],
    pub(crate) zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera2D::default();
        Self {
            offset: [camera.offset.x, camera.offset.y],
            target: [camera.target.x, camera.target.y],
            zoom: CAMERA_ZOOM_DEFAULT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Relative paths resolve against the project root.
    pub(crate) map_path: PathBuf,
    /// Builtin sheets when absent.
    pub(crate) sprites_path: Option<PathBuf>,
    /// No scripted input when absent.
    pub(crate) script_path: Option<PathBuf>,
    pub(crate) target_tps: u32,
    pub(crate) max_steps: u64,
    pub(crate) realtime: bool,
    pub(crate) walk_speed: f32,
    pub(crate) highlight_seconds: f32,
    pub(crate) camera: CameraConfig,
    pub(crate) pick_bias: [f32; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        let loop_defaults = LoopConfig::default();
        Self {
            map_path: PathBuf::from("assets/maps/map1.png"),
            sprites_path: None,
            script_path: None,
            target_tps: loop_defaults.target_tps,
            max_steps: loop_defaults.max_steps,
            realtime: loop_defaults.realtime,
            walk_speed: DEFAULT_WALK_SPEED_TILES_PER_SECOND,
            highlight_seconds: DEFAULT_HIGHLIGHT_SECONDS,
            camera: CameraConfig::default(),
            pick_bias: [DEFAULT_PICK_BIAS.x, DEFAULT_PICK_BIAS.y],
        }
    }
}

impl GameConfig {
    pub(crate) fn from_json_str(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let config: GameConfig =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
                let json_path = error.path().to_string();
                ConfigError::Parse {
                    path: origin.to_path_buf(),
                    json_path,
                    source: error.into_inner(),
                }
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.target_tps == 0 {
            return Err(ConfigError::Invalid {
                field: "target_tps",
                reason: "must be at least 1".to_string(),
            });
        }
        for (field, value) in [
            ("walk_speed", self.walk_speed),
            ("highlight_seconds", self.highlight_seconds),
            ("camera.zoom", self.camera.zoom),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and positive, got {value}"),
                });
            }
        }
        let finite_pairs = [self.camera.offset, self.camera.target, self.pick_bias];
        if finite_pairs.iter().flatten().any(|value| !value.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "camera/pick_bias",
                reason: "coordinates must be finite".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn resolve(&self, root: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }

    pub(crate) fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            target_tps: self.target_tps,
            max_steps: self.max_steps,
            realtime: self.realtime,
        }
    }

    pub(crate) fn session_settings(&self) -> SessionSettings {
        let mut camera = Camera2D {
            offset: Vec2::new(self.camera.offset[0], self.camera.offset[1]),
            target: Vec2::new(self.camera.target[0], self.camera.target[1]),
            zoom: CAMERA_ZOOM_DEFAULT,
        };
        camera.set_zoom_clamped(self.camera.zoom);
        SessionSettings {
            walk_speed: self.walk_speed,
            highlight_seconds: self.highlight_seconds,
            camera,
            pick_bias: Vec2::new(self.pick_bias[0], self.pick_bias[1]),
        }
    }
}

pub(crate) fn load_config_file(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    GameConfig::from_json_str(&raw, path)
}

/// `ISOWALK_CONFIG` if set (the file must exist), otherwise
/// `assets/config.json`, otherwise defaults.
pub(crate) fn load_game_config(paths: &AppPaths) -> Result<GameConfig, ConfigError> {
    if let Some(explicit) = env::var_os(CONFIG_ENV_VAR) {
        let path = PathBuf::from(explicit);
        info!(path = %path.display(), "config_from_env");
        return load_config_file(&path);
    }

    let default_path = paths.assets_dir.join(DEFAULT_CONFIG_FILE);
    if !default_path.is_file() {
        info!(path = %default_path.display(), "config_defaulted");
        return Ok(GameConfig::default());
    }
    load_config_file(&default_path)
}
