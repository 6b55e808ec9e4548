use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use pairs_core::*;
use serde::Deserialize;

use crate::player::Strategy;

/// Session settings, read from a TOML file and then overridden by command line flags.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimSettings {
    pub difficulty: Difficulty,
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub total_time: Option<Seconds>,
    pub seed: Option<u64>,
    pub rounds: u32,
    pub strategy: Strategy,
    /// Virtual time the player spends on each pick.
    pub think_ms: u64,
    pub catalog: Option<Vec<String>>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            rows: None,
            cols: None,
            total_time: None,
            seed: None,
            rounds: 1,
            strategy: Strategy::default(),
            think_ms: 800,
            catalog: None,
        }
    }
}

impl SimSettings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    /// Difficulty preset with any explicit board size or time layered on top.
    pub fn round_config(&self) -> anyhow::Result<RoundConfig> {
        let preset = self.difficulty.config();
        let config = RoundConfig::new(
            self.rows.unwrap_or(preset.rows),
            self.cols.unwrap_or(preset.cols),
            self.total_time.unwrap_or(preset.total_time),
        )?;
        Ok(config)
    }

    pub fn catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog {
            Some(glyphs) => Ok(Catalog::from_glyphs(glyphs.iter().cloned())?),
            None => Ok(Catalog::fruits()),
        }
    }

    pub fn think_time(&self) -> Duration {
        Duration::from_millis(self.think_ms.max(1))
    }
}
