//! Needle instances scattered around a layer rim.

use std::f32::consts::TAU;

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use super::config::NeedleConfig;
use super::star::StarOutline;
use crate::math::{lerp, yaw_toward, RngExt};

/// Instanced needle blades for one layer.
#[derive(Clone, Debug)]
pub struct NeedleSet {
    /// Blade width
    pub width: f32,
    /// Full blade length; each instance scales its Y down from this
    pub length: f32,
    /// Per-instance transforms relative to the layer center
    pub transforms: Vec<Mat4>,
}

impl NeedleSet {
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// Number of needles for a layer of `radius`, scaled by `sqrt(radius / bottom_radius)`.
pub fn needle_count(config: &NeedleConfig, radius: f32, bottom_radius: f32) -> u32 {
    let scale = if bottom_radius > 0.0 {
        (radius / bottom_radius).max(0.0).sqrt()
    } else {
        1.0
    };
    lerp(config.count_min as f32, config.count_max as f32, scale).floor().max(0.0) as u32
}

/// Needle length range for a layer at height fraction `t`.
pub fn length_range(config: &NeedleConfig, t: f32) -> [f32; 2] {
    [
        lerp(config.length_bottom[0], config.length_top[0], t),
        lerp(config.length_bottom[1], config.length_top[1], t),
    ]
}

/// Scatter needles evenly around `outline`, pointing radially outward.
///
/// Roots sit just inside the rim (88-98% of the outline radius plus a small
/// outward nudge), capped at `min(r + max_out, 1.08 r)`.
pub fn scatter<R: Rng + ?Sized>(
    config: &NeedleConfig,
    outline: &StarOutline,
    count: u32,
    t: f32,
    rng: &mut R,
) -> NeedleSet {
    let r = outline.outer_radius;
    let lengths = length_range(config, t);
    let max_root = (r + config.max_out).min(r * 1.08);

    let transforms = (0..count)
        .map(|n| {
            let a = n as f32 / count as f32 * TAU;
            let rim = outline.radius_at_angle(a) * rng.between(0.88, 0.98);
            let root = max_root.min(rim + rng.unit() * 0.04);
            let position = Vec3::new(a.cos() * root, rng.spread(0.03), a.sin() * root);

            let len = rng.between(lengths[0], lengths[1]);
            let scale = Vec3::new(1.0, len / lengths[1], 1.0);

            let yaw = yaw_toward(Vec3::new(position.x, 0.0, position.z));
            let tilt = rng.between(config.tilt[0], config.tilt[1]);
            let roll = rng.spread(0.4);
            let rotation = Quat::from_euler(EulerRot::XYZ, -tilt, yaw + rng.spread(0.2), roll);

            Mat4::from_scale_rotation_translation(scale, rotation, position)
        })
        .collect();

    NeedleSet {
        width: config.width,
        length: lengths[1],
        transforms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_needle_count_scales_with_sqrt_radius() {
        let cfg = NeedleConfig::default();
        assert_eq!(needle_count(&cfg, 3.9, 3.9), 220);
        assert_eq!(needle_count(&cfg, 0.0, 3.9), 80);
        // sqrt(0.25) = 0.5 -> halfway
        assert_eq!(needle_count(&cfg, 1.0, 4.0), 150);
    }

    #[test]
    fn test_length_range_interpolates() {
        let cfg = NeedleConfig::default();
        assert_eq!(length_range(&cfg, 0.0), [0.28, 0.38]);
        let top = length_range(&cfg, 1.0);
        assert!((top[0] - 0.12).abs() < 1e-6 && (top[1] - 0.22).abs() < 1e-6);
    }

    #[test]
    fn test_scatter_stays_near_rim() {
        let cfg = NeedleConfig::default();
        let outline = StarOutline::new(12, 2.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        let set = scatter(&cfg, &outline, 120, 0.3, &mut rng);
        assert_eq!(set.len(), 120);

        for m in &set.transforms {
            let (scale, _, pos) = m.to_scale_rotation_translation();
            let radial = Vec3::new(pos.x, 0.0, pos.z).length();
            assert!(radial <= 2.0 * 1.08 + 1e-4, "root {radial}");
            assert!(radial >= 1.0 * 0.88 - 1e-4, "root {radial}");
            assert!(pos.y.abs() <= 0.015 + 1e-6);
            assert!(scale.y > 0.0 && scale.y <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_scatter_is_deterministic_per_seed() {
        let cfg = NeedleConfig::default();
        let outline = StarOutline::new(12, 2.0, 1.0);
        let a = scatter(&cfg, &outline, 40, 0.5, &mut StdRng::seed_from_u64(11));
        let b = scatter(&cfg, &outline, 40, 0.5, &mut StdRng::seed_from_u64(11));
        assert_eq!(a.transforms, b.transforms);
    }
}
