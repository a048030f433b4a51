//! Mathematical utilities shared by the generators

pub mod curve;

pub use curve::CatmullRomCurve;

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Shortest arc between two angles in radians, in `[0, PI]`.
pub fn angle_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

/// Distance between two positions on a wrapped `[0, 1)` cycle, in `[0, 0.5]`.
pub fn ring_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs().rem_euclid(1.0);
    d.min(1.0 - d)
}

/// Two summed sines at related frequencies.
///
/// Low-frequency wobble without the jaggedness of sampled noise: the second
/// term runs at 0.7x frequency, half amplitude, and a scaled phase.
pub fn smooth_noise(t: f32, freq: f32, amp: f32, seed: f32) -> f32 {
    (t * freq + seed).sin() * amp
        + (t * freq * 0.7 + seed * 2.1).sin() * amp * 0.5
}

/// Yaw (rotation about +Y) that turns local +Z toward `dir` projected on XZ.
#[inline]
pub fn yaw_toward(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}

/// Unit vector pointing away from the tree axis at `angle`.
#[inline]
pub fn radial(angle: f32) -> Vec3 {
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

/// Sampling helpers on top of any [`Rng`].
pub trait RngExt: Rng {
    /// Uniform in `[0, 1)`
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }

    /// Uniform in `[-range/2, range/2)`
    fn spread(&mut self, range: f32) -> f32 {
        range * (self.random::<f32>() - 0.5)
    }

    /// Uniform between `min` and `max` (either order)
    fn between(&mut self, min: f32, max: f32) -> f32 {
        lerp(min, max, self.random::<f32>())
    }

    /// Uniform angle in `[0, 2PI)`
    fn angle(&mut self) -> f32 {
        self.random::<f32>() * TAU
    }

    /// Inclusive integer range; collapses to `min` when `max < min`
    fn count_in(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            min
        } else {
            self.random_range(min..=max)
        }
    }
}

impl<R: Rng + ?Sized> RngExt for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f32::consts::PI;

    #[test]
    fn test_angle_distance_wraps() {
        assert!((angle_distance(0.1, TAU - 0.1) - 0.2).abs() < 1e-5);
        assert!((angle_distance(0.0, PI) - PI).abs() < 1e-5);
        assert!(angle_distance(1.0, 1.0 + TAU).abs() < 1e-5);
        assert!((angle_distance(-0.3, 0.3) - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_ring_distance() {
        assert_eq!(ring_distance(0.5, 0.5), 0.0);
        assert_eq!(ring_distance(0.0, 0.5), 0.5);
        assert!((ring_distance(0.95, 0.05) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_noise_bounded() {
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            assert!(smooth_noise(t, 10.0, 0.26, 1.3).abs() <= 0.26 * 1.5 + 1e-6);
        }
    }

    #[test]
    fn test_yaw_toward_radial() {
        for i in 0..16 {
            let angle = i as f32 * TAU / 16.0;
            let dir = radial(angle);
            let facing = glam::Quat::from_rotation_y(yaw_toward(dir)) * Vec3::Z;
            assert!((facing - dir).length() < 1e-5);
        }
    }

    #[test]
    fn test_rng_ext_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let s = rng.spread(0.4);
            assert!((-0.2..0.2).contains(&s));
            let b = rng.between(2.0, 3.0);
            assert!((2.0..=3.0).contains(&b));
            let n = rng.count_in(18, 28);
            assert!((18..=28).contains(&n));
        }
        assert_eq!(rng.count_in(5, 5), 5);
        assert_eq!(rng.count_in(6, 2), 6);
    }
}
