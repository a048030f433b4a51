//! Light cable and bulb parameters.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Spiral cable path around the foliage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CableConfig {
    /// Full turns around the trunk from bottom to top
    pub turns: f32,
    /// Control points sampled along the spiral
    pub samples: u32,
    /// Nominal inset below the silhouette
    pub inset: f32,
    /// Closest the cable may come to the silhouette
    pub min_inset: f32,
    /// Deepest the cable may sink below `silhouette - min_inset`
    pub band_depth: f32,
    /// Lower bound of the nominal radius before noise
    pub min_radius: f32,
    /// Absolute floor on the final radius
    pub radius_floor: f32,
    /// Start this far above the bottom layer's lower face
    pub bottom_offset: f32,
    /// End this far below the top layer's upper face
    pub top_offset: f32,
    pub height_noise_amplitude: f32,
    pub height_noise_frequency: f32,
    pub radius_noise_amplitude: f32,
    pub radius_noise_frequency: f32,
    /// Seed offset between the height and radius noise
    pub radius_noise_seed_offset: f32,
    pub tube_radius: f32,
    pub tube_radial_segments: u32,
    pub color: Color,
}

impl Default for CableConfig {
    fn default() -> Self {
        Self {
            turns: 8.0,
            samples: 260,
            inset: 0.25,
            min_inset: 0.18,
            band_depth: 0.35,
            min_radius: 0.3,
            radius_floor: 0.05,
            bottom_offset: 0.15,
            top_offset: 0.1,
            height_noise_amplitude: 0.26,
            height_noise_frequency: 10.0,
            radius_noise_amplitude: 0.32,
            radius_noise_frequency: 8.0,
            radius_noise_seed_offset: 13.7,
            tube_radius: 0.02,
            tube_radial_segments: 8,
            color: Color::from_hex(0x141414),
        }
    }
}

/// Bulbs strung along the cable.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BulbConfig {
    /// Candidate positions at uniform arc-length steps
    pub count: u32,
    pub radius: f32,
    /// Candidates closer than this to a ring band are skipped
    pub ring_skip: f32,
    /// Sideways offset along `up x tangent`
    pub lateral_offset: f32,
    pub palette: Vec<Color>,
    pub warm_white: Color,
    /// Every n-th candidate index uses the warm white
    pub warm_every: u32,
    pub emissive_intensity: f32,
    /// Every n-th candidate index also carries a point light
    pub light_every: u32,
    pub light_intensity: f32,
    pub light_distance: f32,
    pub light_decay: f32,
}

impl Default for BulbConfig {
    fn default() -> Self {
        Self {
            count: 200,
            radius: 0.075,
            ring_skip: 0.25,
            lateral_offset: -0.12,
            palette: [0xff4d4d, 0x4dff88, 0x4da6ff, 0xffe04d, 0xff4dff]
                .into_iter()
                .map(Color::from_hex)
                .collect(),
            warm_white: Color::from_hex(0xfff2cc),
            warm_every: 9,
            emissive_intensity: 1.5,
            light_every: 14,
            light_intensity: 0.25,
            light_distance: 5.0,
            light_decay: 2.0,
        }
    }
}

impl BulbConfig {
    /// Color for the bulb at candidate index `i`.
    pub fn color_for(&self, i: u32) -> Color {
        if self.palette.is_empty() || (self.warm_every > 0 && i % self.warm_every == 0) {
            self.warm_white
        } else {
            self.palette[i as usize % self.palette.len()]
        }
    }

    pub fn has_light(&self, i: u32) -> bool {
        self.light_every > 0 && i % self.light_every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_cycle_with_warm_substitution() {
        let cfg = BulbConfig::default();
        assert_eq!(cfg.color_for(0), cfg.warm_white);
        assert_eq!(cfg.color_for(1), Color::from_hex(0x4dff88));
        assert_eq!(cfg.color_for(5), Color::from_hex(0xff4d4d));
        assert_eq!(cfg.color_for(9), cfg.warm_white);
        assert_eq!(cfg.color_for(10), Color::from_hex(0xff4d4d));
    }

    #[test]
    fn test_light_every() {
        let cfg = BulbConfig::default();
        assert!(cfg.has_light(0) && cfg.has_light(14) && cfg.has_light(28));
        assert!(!cfg.has_light(13));
        let none = BulbConfig { light_every: 0, ..Default::default() };
        assert!(!none.has_light(0));
    }
}
