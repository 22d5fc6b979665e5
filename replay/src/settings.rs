use anyhow::Result;
use serde::{Deserialize, Serialize};

use model::{BoundsMode, DEFAULT_TICK_MS};

/// Defaults for a replay, optionally read from a JSON file. Command-line flags win over these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub speed: f64,
    pub tick_ms: i64,
    pub bounds: BoundsMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 20.0,
            speed: 1.0,
            tick_ms: DEFAULT_TICK_MS,
            bounds: BoundsMode::PerTrack,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let bytes = fs_err::read(path)?;
        let settings = serde_json::from_slice(&bytes)
            .map_err(|err| anyhow!("{path}: {err}"))?;
        Ok(settings)
    }
}
