//! Ornament parameters.

use std::f32::consts::PI;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Ranges the per-ornament sway parameters are drawn from.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SwayConfig {
    pub amplitude_x: [f32; 2],
    pub amplitude_z: [f32; 2],
    pub speed: [f32; 2],
    /// Fraction of the remaining distance to the target covered per frame
    pub smoothing: f32,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self::ornament()
    }
}

impl SwayConfig {
    /// Photo frames
    pub fn ornament() -> Self {
        Self {
            amplitude_x: [0.02, 0.06],
            amplitude_z: [0.02, 0.08],
            speed: [0.6, 1.2],
            smoothing: 0.08,
        }
    }

    /// Bells swing less and slower
    pub fn bell() -> Self {
        Self {
            amplitude_x: [0.01, 0.03],
            amplitude_z: [0.01, 0.04],
            speed: [0.5, 0.9],
            smoothing: 0.06,
        }
    }
}

/// Photo frames hung in three rings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Directory the photo file names are relative to
    pub directory: PathBuf,
    pub files: Vec<String>,
    /// Long edge of a card before the image is known and after aspect fitting
    pub card_long: f32,
    /// Placeholder short edge as a fraction of `card_long`
    pub placeholder_aspect: f32,
    pub max_long: f32,
    pub min_short: f32,
    /// Fractions of the layer list where the three rings hang
    pub band_fractions: [f32; 3],
    /// Lift above the band layer center, as a fraction of its half height
    pub height_lift: f32,
    /// Gap between silhouette and frame
    pub margin: f32,
    /// Extra clearance per unit of frame width
    pub width_factor: f32,
    /// Final push along the outward facing direction
    pub outward_nudge: f32,
    pub frame_thickness: f32,
    pub frame_depth: f32,
    pub frame_color: Color,
    pub frame_emissive: f32,
    pub glass_offset: f32,
    pub glass_opacity: f32,
    pub decor_color: Color,
    pub decor_opacity: f32,
    pub decor_points: u32,
    pub decor_band: f32,
    pub decor_min_radius: f32,
    /// Decor radius is `max(decor_min_radius, long / 2 - decor_inset)`
    pub decor_inset: f32,
    pub corner_radius_px: u32,
    pub sway: SwayConfig,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("photos"),
            files: Vec::new(),
            card_long: 1.6,
            placeholder_aspect: 0.7,
            max_long: 1.8,
            min_short: 0.75,
            band_fractions: [0.18, 0.48, 0.78],
            height_lift: 0.1,
            margin: 0.45,
            width_factor: 0.15,
            outward_nudge: 0.05,
            frame_thickness: 0.12,
            frame_depth: 0.08,
            frame_color: Color::from_hex(0xded6cc),
            frame_emissive: 0.35,
            glass_offset: 0.02,
            glass_opacity: 0.45,
            decor_color: Color::from_hex(0xf6f0ff),
            decor_opacity: 0.32,
            decor_points: 5,
            decor_band: 0.06,
            decor_min_radius: 0.3,
            decor_inset: 0.5,
            corner_radius_px: 28,
            sway: SwayConfig::ornament(),
        }
    }
}

impl PhotoConfig {
    /// Full paths of the configured photo files.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| self.directory.join(f)).collect()
    }
}

/// Candies and candy canes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CandyConfig {
    pub count_min: u32,
    pub count_max: u32,
    /// Keep this far from the bottom and top layers
    pub margin: f32,
    /// Sink below the silhouette by this much
    pub inset: f32,
    pub min_radius: f32,
    pub cane_probability: f32,
    pub tries: u32,
    pub palette: Vec<Color>,
    pub round_radius: f32,
    pub round_emissive: f32,
    pub stick_radius: f32,
    pub stick_length: f32,
    pub hook_radius: f32,
    pub hook_tube: f32,
    /// Swept angle of the hook torus (radians)
    pub hook_arc: f32,
    pub cane_color: Color,
    pub stripe_color: Color,
}

impl Default for CandyConfig {
    fn default() -> Self {
        Self {
            count_min: 20,
            count_max: 40,
            margin: 1.2,
            inset: 0.4,
            min_radius: 0.4,
            cane_probability: 0.45,
            tries: 16,
            palette: [0xff6b6b, 0xffd166, 0x6bd0ff, 0x9b5cff, 0x7cffc4]
                .into_iter()
                .map(Color::from_hex)
                .collect(),
            round_radius: 0.09,
            round_emissive: 0.25,
            stick_radius: 0.04,
            stick_length: 0.46,
            hook_radius: 0.11,
            hook_tube: 0.03,
            hook_arc: PI * 1.25,
            cane_color: Color::WHITE,
            stripe_color: Color::from_hex(0xd92323),
        }
    }
}

/// Golden bells.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BellConfig {
    pub count_min: u32,
    pub count_max: u32,
    /// Range starts this far above the bottom layer
    pub bottom_margin: f32,
    /// Range ends this far below the top layer
    pub top_margin: f32,
    /// Preferred heights as fractions of the range
    pub band_fractions: Vec<f32>,
    pub band_jitter: f32,
    pub inset: f32,
    pub min_radius: f32,
    pub tries: u32,
    pub color: Color,
    pub clapper_color: Color,
    pub sway: SwayConfig,
}

impl Default for BellConfig {
    fn default() -> Self {
        Self {
            count_min: 10,
            count_max: 18,
            bottom_margin: 0.6,
            top_margin: 1.8,
            band_fractions: vec![0.15, 0.38, 0.6, 0.78],
            band_jitter: 0.25,
            inset: 0.55,
            min_radius: 0.4,
            tries: 16,
            color: Color::from_hex(0xd8a349),
            clapper_color: Color::from_hex(0x5a3a12),
            sway: SwayConfig::bell(),
        }
    }
}

/// Star on top of the tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TopperConfig {
    pub enabled: bool,
    pub radius: f32,
    /// Height above the configured foliage top
    pub offset: f32,
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub light_color: Color,
    pub light_intensity: f32,
    pub light_distance: f32,
    pub light_decay: f32,
}

impl Default for TopperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 0.7,
            offset: 0.6,
            color: Color::from_hex(0xffd54a),
            emissive: Color::from_hex(0xffc107),
            emissive_intensity: 1.5,
            light_color: Color::from_hex(0xfff2b0),
            light_intensity: 1.8,
            light_distance: 25.0,
            light_decay: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_paths_join_directory() {
        let cfg = PhotoConfig {
            directory: PathBuf::from("/tmp/xmas"),
            files: vec!["a.jpg".into(), "b.png".into()],
            ..Default::default()
        };
        assert_eq!(cfg.paths(), vec![PathBuf::from("/tmp/xmas/a.jpg"), PathBuf::from("/tmp/xmas/b.png")]);
    }

    #[test]
    fn test_bell_sway_is_gentler() {
        let o = SwayConfig::ornament();
        let b = SwayConfig::bell();
        assert!(b.amplitude_z[1] < o.amplitude_z[1]);
        assert!(b.smoothing < o.smoothing);
    }
}
