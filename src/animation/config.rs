//! Frame loop and light-wave parameters.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Upper bound on the per-frame delta (seconds)
    pub max_delta: f32,
    pub wave: WaveConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            max_delta: 0.05,
            wave: WaveConfig::default(),
        }
    }
}

/// Chasing brightness peak along the bulb string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Cable fractions per second the peak travels
    pub speed: f32,
    /// Gaussian sigma in cable fractions
    pub width: f32,
    pub base: f32,
    pub peak: f32,
    /// Amplitude of the shimmer riding on top of the wave
    pub shimmer: f32,
    pub shimmer_time_freq: f32,
    /// Shimmer phase per unit of cable fraction
    pub shimmer_spatial_freq: f32,
    /// Per-bulb multiplier spans `[1 - variation/2, 1 + variation/2]`
    pub variation: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            speed: 0.18,
            width: 0.10,
            base: 0.6,
            peak: 1.8,
            shimmer: 0.25,
            shimmer_time_freq: 2.0,
            shimmer_spatial_freq: 12.0,
            variation: 0.2,
        }
    }
}
