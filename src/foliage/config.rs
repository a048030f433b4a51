//! Foliage generation parameters.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::math::lerp;

/// Parameters for the layered star-ring foliage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliageConfig {
    /// Layer count is drawn uniformly from `[layer_count_min, layer_count_max]`.
    pub layer_count_min: u32,
    pub layer_count_max: u32,
    /// Silhouette radius at the lowest layer.
    pub bottom_radius: f32,
    /// Silhouette radius at the highest layer.
    pub top_radius: f32,
    pub bottom_height: f32,
    pub top_height: f32,
    /// Power applied to the height fraction before radius interpolation.
    /// Values above 1 shrink the radius faster near the top.
    pub radius_ease_power: f32,
    /// Total twist (radians) accumulated from bottom to top layer.
    pub twist_total: f32,
    /// Random twist jitter range per layer (radians, centered).
    pub twist_jitter: f32,
    /// Random tilt about X and Z per layer (radians, +/-).
    pub tilt_jitter: f32,
    /// Relative amplitude of the shared low-frequency radius wave.
    pub wave_amplitude: f32,
    pub wave_frequency_min: u32,
    pub wave_frequency_max: u32,
    /// Independent radius jitter range, faded out toward the top.
    pub radius_jitter: f32,
    /// Floor for any layer radius.
    pub min_radius: f32,
    /// Height jitter as a fraction of the nominal layer step.
    pub height_jitter: f32,
    /// Minimum spacing to the previous layer as a fraction of the nominal step.
    pub min_step: f32,
    /// Fractions of the height span where the cable ring bands sit.
    pub ring_band_fractions: [f32; 3],
    /// Half-width of the radius inset around each ring band.
    pub ring_inset_width: f32,
    /// Maximum radius inset at the center of a ring band.
    pub ring_inset_depth: f32,
    /// Cross-section thickness at the bottom and top layer.
    pub thickness_bottom: f32,
    pub thickness_top: f32,
    /// Number of points of each star cross-section.
    pub star_points: u32,
    /// Inner rim radius as a fraction of the outer radius.
    pub inner_ratio: f32,
    /// Outward noise range applied to outer vertices, as a fraction of radius.
    pub outer_noise: f32,
    /// Jitter range for interior vertices, as a fraction of radius.
    pub inner_jitter: f32,
    /// Radial fraction beyond which a vertex counts as outer edge.
    pub edge_threshold: f32,
    /// Edge droop at the bottom layer, fading to zero at the top.
    pub droop: f32,
    pub base_color: Color,
    pub top_color: Color,
    pub needles: NeedleConfig,
    pub trunk: TrunkConfig,
    pub bud: BudConfig,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            layer_count_min: 18,
            layer_count_max: 28,
            bottom_radius: 3.9,
            top_radius: 0.65,
            bottom_height: 2.3,
            top_height: 10.2,
            radius_ease_power: 2.0,
            twist_total: PI * 1.1,
            twist_jitter: 0.25,
            tilt_jitter: 0.05,
            wave_amplitude: 0.04,
            wave_frequency_min: 5,
            wave_frequency_max: 9,
            radius_jitter: 0.06,
            min_radius: 0.4,
            height_jitter: 0.35,
            min_step: 0.55,
            ring_band_fractions: [0.18, 0.48, 0.78],
            ring_inset_width: 0.35,
            ring_inset_depth: 0.35,
            thickness_bottom: 0.25,
            thickness_top: 0.15,
            star_points: 12,
            inner_ratio: 0.55,
            outer_noise: 0.12,
            inner_jitter: 0.02,
            edge_threshold: 0.65,
            droop: 0.18,
            base_color: Color::from_hex(0x165c34),
            top_color: Color::from_hex(0x2aa163),
            needles: NeedleConfig::default(),
            trunk: TrunkConfig::default(),
            bud: BudConfig::default(),
        }
    }
}

impl FoliageConfig {
    /// Ring band heights over the configured height span.
    pub fn ring_bands(&self) -> RingBands {
        RingBands::over_span(self.bottom_height, self.top_height, self.ring_band_fractions)
    }
}

/// Needle instances scattered around each layer rim.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedleConfig {
    /// Count range, interpolated by `sqrt(radius / bottom_radius)`.
    pub count_min: u32,
    pub count_max: u32,
    /// Length range at the bottom layer.
    pub length_bottom: [f32; 2],
    /// Length range at the top layer.
    pub length_top: [f32; 2],
    /// Absolute cap on how far past the rim a needle root may sit.
    pub max_out: f32,
    /// Tilt range away from vertical (radians).
    pub tilt: [f32; 2],
    /// Blade width.
    pub width: f32,
    /// Lightness jitter of the needle material relative to its layer.
    pub lightness_jitter: f32,
}

impl Default for NeedleConfig {
    fn default() -> Self {
        Self {
            count_min: 80,
            count_max: 220,
            length_bottom: [0.28, 0.38],
            length_top: [0.12, 0.22],
            max_out: 0.35,
            tilt: [0.35, 0.85],
            width: 0.1,
            lightness_jitter: 0.06,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TrunkConfig {
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub height: f32,
    pub color: Color,
}

impl Default for TrunkConfig {
    fn default() -> Self {
        Self {
            top_radius: 0.6,
            bottom_radius: 0.8,
            height: 3.2,
            color: Color::from_hex(0x6b3e1e),
        }
    }
}

/// Cone capping the top layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BudConfig {
    pub radius: f32,
    pub height: f32,
    /// Offset of the cone center above `top_height`.
    pub offset: f32,
}

impl Default for BudConfig {
    fn default() -> Self {
        Self {
            radius: 0.45,
            height: 0.9,
            offset: 0.55,
        }
    }
}

/// The three designated ring-band heights reserved for cable rings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingBands(pub [f32; 3]);

impl RingBands {
    /// Place bands at `fractions` of the span `[bottom, top]`.
    pub fn over_span(bottom: f32, top: f32, fractions: [f32; 3]) -> Self {
        Self(fractions.map(|f| lerp(bottom, top, f)))
    }

    pub fn heights(&self) -> &[f32; 3] {
        &self.0
    }

    /// Whether `y` lies within `half_width` of any band.
    pub fn near(&self, y: f32, half_width: f32) -> bool {
        self.0.iter().any(|band| (y - band).abs() < half_width)
    }

    /// Tent-shaped inset: `depth` at a band center, fading to zero at `width`.
    pub fn inset_at(&self, y: f32, width: f32, depth: f32) -> f32 {
        if width <= 0.0 {
            return 0.0;
        }
        self.0.iter().fold(0.0f32, |inset, band| {
            let d = (y - band).abs();
            if d < width {
                inset.max(depth * (1.0 - d / width))
            } else {
                inset
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges_are_ordered() {
        let cfg = FoliageConfig::default();
        assert!(cfg.layer_count_min <= cfg.layer_count_max);
        assert!(cfg.bottom_radius > cfg.top_radius);
        assert!(cfg.bottom_height < cfg.top_height);
        assert!(cfg.needles.count_min < cfg.needles.count_max);
    }

    #[test]
    fn test_ring_bands_over_span() {
        let bands = RingBands::over_span(0.0, 10.0, [0.18, 0.48, 0.78]);
        assert!((bands.heights()[0] - 1.8).abs() < 1e-5);
        assert!((bands.heights()[1] - 4.8).abs() < 1e-5);
        assert!((bands.heights()[2] - 7.8).abs() < 1e-5);
        assert!(bands.near(4.9, 0.25));
        assert!(!bands.near(6.0, 0.25));
    }

    #[test]
    fn test_inset_tent_shape() {
        let bands = RingBands([1.0, 5.0, 9.0]);
        assert!((bands.inset_at(5.0, 0.35, 0.35) - 0.35).abs() < 1e-6);
        assert!((bands.inset_at(5.175, 0.35, 0.35) - 0.175).abs() < 1e-5);
        assert_eq!(bands.inset_at(3.0, 0.35, 0.35), 0.0);
        assert_eq!(bands.inset_at(5.0, 0.0, 0.35), 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: FoliageConfig = serde_json::from_str(r#"{ "star_points": 8 }"#).unwrap();
        assert_eq!(cfg.star_points, 8);
        assert_eq!(cfg.layer_count_min, 18);
        assert_eq!(cfg.base_color, Color::from_hex(0x165c34));
    }
}
