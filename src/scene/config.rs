//! Top-level scene configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::AnimationConfig;
use crate::atmosphere::{SkyConfig, SnowConfig};
use crate::core::Result;
use crate::foliage::FoliageConfig;
use crate::layout::{LayoutConfig, SparkleConfig};
use crate::lights::{BulbConfig, CableConfig};
use crate::ornament::{BellConfig, CandyConfig, PhotoConfig, TopperConfig};
use crate::render::ViewConfig;

/// Every tunable of a scene, supplied once at startup.
///
/// All sections default, so a JSON file only needs the values it changes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for every random draw in the build
    pub seed: u64,
    pub foliage: FoliageConfig,
    pub cable: CableConfig,
    pub bulbs: BulbConfig,
    pub photos: PhotoConfig,
    pub candies: CandyConfig,
    pub bells: BellConfig,
    pub topper: TopperConfig,
    pub sparkles: SparkleConfig,
    pub layout: LayoutConfig,
    pub sky: SkyConfig,
    pub snow: SnowConfig,
    pub animation: AnimationConfig,
    pub view: ViewConfig,
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}
