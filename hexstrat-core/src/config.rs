//! Session configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::DEFAULT_TALL_QUOTA;

/// Settings read once when a session starts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Outer hex radius in pixels
    pub tile_radius: f32,
    /// Upper bound on tall tiles
    pub tall_quota: usize,
    /// Not validated: zero or negative makes every placement fail
    pub max_units_per_side: i32,
    /// Terrain seed (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            tile_radius: 50.0,
            tall_quota: DEFAULT_TALL_QUOTA,
            max_units_per_side: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set max units per side
    pub fn with_max_units(mut self, max: i32) -> Self {
        self.max_units_per_side = max;
        self
    }

    /// Set terrain seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
