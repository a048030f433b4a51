//! Sky, star field and snow configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::Color;

/// A fixed scene light.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LightConfig {
    pub color: Color,
    pub intensity: f32,
    /// Directional lights shine from here toward the origin; ignored for ambient
    pub position: Vec3,
}

impl LightConfig {
    pub fn new(color: u32, intensity: f32, position: Vec3) -> Self {
        Self {
            color: Color::from_hex(color),
            intensity,
            position,
        }
    }
}

/// Exponential-squared distance fog.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    pub color: Color,
    pub density: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::from_hex(0x151a3b),
            density: 0.024,
        }
    }
}

/// Points scattered on a spherical shell around the scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    pub count: u32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub color: Color,
    pub size: f32,
    /// Opacity before the first frame
    pub opacity: f32,
    pub twinkle_base: f32,
    pub twinkle_amplitude: f32,
    pub twinkle_speed: f32,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 1400,
            radius_min: 35.0,
            radius_max: 90.0,
            color: Color::from_hex(0xf8f2ff),
            size: 0.35,
            opacity: 0.85,
            twinkle_base: 0.7,
            twinkle_amplitude: 0.25,
            twinkle_speed: 0.2,
        }
    }
}

/// Gradient dome, fog, scene lights and the star field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub dome_radius: f32,
    pub top: Color,
    pub bottom: Color,
    pub fog: FogConfig,
    pub ambient: LightConfig,
    pub key: LightConfig,
    pub rim: LightConfig,
    pub stars: StarFieldConfig,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            dome_radius: 100.0,
            top: Color::from_hex(0x1a0b3d),
            bottom: Color::from_hex(0x0b2a6f),
            fog: FogConfig::default(),
            ambient: LightConfig::new(0xffffff, 0.65, Vec3::ZERO),
            key: LightConfig::new(0xffffff, 1.0, Vec3::new(6.0, 10.0, 6.0)),
            rim: LightConfig::new(0xbfd9ff, 0.45, Vec3::new(-6.0, 6.0, -8.0)),
            stars: StarFieldConfig::default(),
        }
    }
}

/// One population of flakes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnowLayerConfig {
    pub count: u32,
    pub size: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub opacity: f32,
}

/// Snow volume: a vertical cylinder flakes fall through and wrap around.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowConfig {
    pub radius: f32,
    pub y_top: f32,
    pub y_bottom: f32,
    /// Horizontal drift per flake is uniform in `[-wind_spread/2, wind_spread/2)` on each axis
    pub wind_spread: f32,
    pub color: Color,
    pub layers: Vec<SnowLayerConfig>,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            radius: 22.0,
            y_top: 18.0,
            y_bottom: -2.0,
            wind_spread: 0.15,
            color: Color::WHITE,
            layers: vec![
                SnowLayerConfig { count: 1200, size: 0.12, speed_min: 0.2, speed_max: 0.45, opacity: 0.55 },
                SnowLayerConfig { count: 500, size: 0.28, speed_min: 0.5, speed_max: 1.0, opacity: 0.85 },
            ],
        }
    }
}
