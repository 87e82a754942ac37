use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use isowalk_engine::{InputAction, InputSnapshot, InputSource, Vec2};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    #[error("failed to read input script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse input script at {json_path}: {source}")]
    Parse {
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("input script step {step} presses unknown action '{token}'")]
    UnknownAction { step: u64, token: String },
    #[error("input script step {step} has a non-finite click position")]
    NonFiniteClick { step: u64 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptEntry {
    step: u64,
    #[serde(default)]
    press: Vec<String>,
    #[serde(default)]
    click_px: Option<[f32; 2]>,
}

/// Pre-recorded input edges keyed by step. Steps without an entry get an
/// empty snapshot; entries for the same step merge.
#[derive(Debug, Clone, Default)]
pub(crate) struct InputScript {
    snapshots: BTreeMap<u64, InputSnapshot>,
}

impl InputScript {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_json_str(raw: &str) -> Result<Self, ScriptError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let entries: Vec<ScriptEntry> = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|error| {
                let json_path = error.path().to_string();
                ScriptError::Parse {
                    json_path,
                    source: error.into_inner(),
                }
            })?;

        let mut snapshots: BTreeMap<u64, InputSnapshot> = BTreeMap::new();
        for entry in entries {
            let mut snapshot = snapshots.get(&entry.step).copied().unwrap_or_default();
            for token in &entry.press {
                let action =
                    InputAction::from_token(token).ok_or_else(|| ScriptError::UnknownAction {
                        step: entry.step,
                        token: token.clone(),
                    })?;
                snapshot = snapshot.with_action_pressed(action, true);
            }
            if let Some([x, y]) = entry.click_px {
                let click = Vec2::new(x, y);
                if !click.is_finite() {
                    return Err(ScriptError::NonFiniteClick { step: entry.step });
                }
                snapshot = snapshot.with_click_released_px(Some(click));
            }
            snapshots.insert(entry.step, snapshot);
        }
        Ok(Self { snapshots })
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub(crate) fn last_step(&self) -> Option<u64> {
        self.snapshots.keys().next_back().copied()
    }
}

impl InputSource for InputScript {
    fn snapshot_for_step(&mut self, step: u64) -> InputSnapshot {
        self.snapshots.get(&step).copied().unwrap_or_default()
    }
}

pub(crate) fn load_input_script(path: &Path) -> Result<InputScript, ScriptError> {
    let raw = fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    InputScript::from_json_str(&raw)
}
