//! Gap rules and sparkle parameters.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Minimum clearance a candidate must keep from every existing slot.
///
/// Each gap is scaled by the *existing* slot's weight, so heavier categories
/// placed earlier keep a wider berth around themselves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GapRule {
    /// Shortest-arc angle gap (radians)
    pub min_angle_gap: f32,
    pub min_height_gap: f32,
    pub min_radius_gap: f32,
    /// Weight stamped on slots registered under this rule
    pub weight: f32,
}

impl GapRule {
    pub const fn new(min_angle_gap: f32, min_height_gap: f32, min_radius_gap: f32, weight: f32) -> Self {
        Self { min_angle_gap, min_height_gap, min_radius_gap, weight }
    }
}

/// Gap rules per ornament category.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub photo: GapRule,
    pub bulb: GapRule,
    pub bell: GapRule,
    pub candy: GapRule,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            photo: GapRule::new(0.22, 0.45, 0.5, 2.0),
            bulb: GapRule::new(0.12, 0.25, 0.35, 1.0),
            bell: GapRule::new(0.16, 0.35, 0.4, 1.2),
            candy: GapRule::new(0.14, 0.32, 0.35, 1.1),
        }
    }
}

/// Sparkle clusters emitted around candies and bells.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    /// Points per cluster, drawn uniformly from `[per_min, per_max]`
    pub per_min: u32,
    pub per_max: u32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Global point budget shared by all clusters
    pub max_total: u32,
    /// Vertical spread of points around the center
    pub height_spread: f32,
    pub opacity_base: f32,
    pub opacity_amplitude: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub color: Color,
    pub size: f32,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            per_min: 3,
            per_max: 6,
            radius_min: 0.15,
            radius_max: 0.35,
            max_total: 150,
            height_spread: 0.16,
            opacity_base: 0.22,
            opacity_amplitude: 0.18,
            speed_min: 1.0,
            speed_max: 1.8,
            color: Color::from_hex(0xfff6e6),
            size: 0.06,
        }
    }
}
