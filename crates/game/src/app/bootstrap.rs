use isowalk_engine::{
    load_sprite_catalog, load_tile_map, resolve_app_paths, LoopConfig, MapLoadError,
    SpriteCatalog, SpriteCatalogError, StartupError,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{load_game_config, ConfigError};
use super::gameplay::GameSession;
use super::script::{load_input_script, InputScript, ScriptError};

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Map(#[from] MapLoadError),
    #[error(transparent)]
    Sprites(#[from] SpriteCatalogError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) session: GameSession,
    pub(crate) script: InputScript,
}

pub(crate) fn build_app() -> Result<AppWiring, AppError> {
    init_tracing();
    info!("=== isowalk startup ===");

    let paths = resolve_app_paths()?;
    info!(
        root = %paths.root.display(),
        assets = %paths.assets_dir.display(),
        "startup_paths"
    );
    let game_config = load_game_config(&paths)?;

    let map_path = game_config.resolve(&paths.root, &game_config.map_path);
    let map = load_tile_map(&map_path)?;

    let sprites = match &game_config.sprites_path {
        Some(path) => {
            let path = game_config.resolve(&paths.root, path);
            let catalog = load_sprite_catalog(&path)?;
            info!(path = %path.display(), "sprite_catalog_loaded");
            catalog
        }
        None => {
            info!("sprite_catalog_builtin");
            SpriteCatalog::builtin()
        }
    };

    let script = match &game_config.script_path {
        Some(path) => {
            let path = game_config.resolve(&paths.root, path);
            let script = load_input_script(&path)?;
            info!(
                path = %path.display(),
                entries = script.len(),
                last_step = script.last_step(),
                "input_script_loaded"
            );
            script
        }
        None => InputScript::empty(),
    };

    let session = GameSession::new(map, sprites, game_config.session_settings());
    Ok(AppWiring {
        config: game_config.loop_config(),
        session,
        script,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
