//! Ornament placers: photo frames, candies, bells and the tree-top star.
//!
//! Placers run in a fixed order after the cable and bulbs, each claiming
//! slots in the shared registry. Anything that does not fit within its
//! attempt budget is skipped.

pub mod bell;
pub mod candy;
pub mod config;
pub mod photo;
pub mod topper;

pub use bell::{place_bells, Bell};
pub use candy::{place_candies, Candy, CandyKind};
pub use config::{BellConfig, CandyConfig, PhotoConfig, SwayConfig, TopperConfig};
pub use photo::{fit_card_size, place_photos, round_robin, PhotoFrame, PhotoState};
pub use topper::add_topper;

use glam::Vec3;
use rand::Rng;

use crate::layout::PlacedSparkle;
use crate::math::{radial, yaw_toward, RngExt};

/// Per-ornament pendulum parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwayParams {
    pub phase: f32,
    pub speed: f32,
    pub amplitude_x: f32,
    pub amplitude_z: f32,
    pub smoothing: f32,
    /// Rest orientation (XYZ Euler) the swing oscillates around
    pub base_rotation: Vec3,
}

impl SwayParams {
    pub fn sample<R: Rng + ?Sized>(config: &SwayConfig, base_rotation: Vec3, rng: &mut R) -> Self {
        Self {
            phase: rng.angle(),
            speed: rng.between(config.speed[0], config.speed[1]),
            amplitude_x: rng.between(config.amplitude_x[0], config.amplitude_x[1]),
            amplitude_z: rng.between(config.amplitude_z[0], config.amplitude_z[1]),
            smoothing: config.smoothing,
            base_rotation,
        }
    }

    /// Orientation the ornament is pulled toward at `time`.
    pub fn target(&self, time: f32) -> Vec3 {
        Vec3::new(
            self.base_rotation.x
                + (time * self.speed * 0.7 + self.phase * 1.3).sin() * self.amplitude_x,
            self.base_rotation.y,
            self.base_rotation.z + (time * self.speed + self.phase).sin() * self.amplitude_z,
        )
    }
}

/// Output of a placer that also scatters sparkles.
#[derive(Clone, Debug)]
pub struct Placed<T> {
    pub items: Vec<T>,
    pub sparkles: Vec<PlacedSparkle>,
}

impl<T> Default for Placed<T> {
    fn default() -> Self {
        Self { items: Vec::new(), sparkles: Vec::new() }
    }
}

/// Euler rotation turning local +Z away from the trunk at `angle`.
pub fn outward_euler(angle: f32) -> Vec3 {
    Vec3::new(0.0, yaw_toward(radial(angle)), 0.0)
}
