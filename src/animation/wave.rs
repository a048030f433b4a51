//! Traveling brightness wave over the bulb string.

use crate::math::ring_distance;

use super::config::WaveConfig;

/// Gaussian falloff of the ring distance between `u` and the peak `p`.
pub fn wave_weight(u: f32, p: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return if ring_distance(u, p) == 0.0 { 1.0 } else { 0.0 };
    }
    let d = ring_distance(u, p);
    (-(d * d) / (2.0 * width * width)).exp()
}

/// Deterministic per-bulb value in `(-1, 1)`.
///
/// Remainder keeps the sign of the dividend, so callers take `abs`.
pub fn bulb_hash(u: f32) -> f32 {
    ((u * 1234.5).sin() * 43758.545) % 1.0
}

#[derive(Clone, Debug)]
pub struct LightWave {
    config: WaveConfig,
}

impl LightWave {
    pub fn new(config: WaveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Peak position along the string at `time`, in `[0, 1)`.
    pub fn phase_at(&self, time: f32) -> f32 {
        (time * self.config.speed).rem_euclid(1.0)
    }

    /// Emissive intensity of the bulb at cable fraction `u`.
    pub fn intensity(&self, u: f32, time: f32) -> f32 {
        let c = &self.config;
        let w = wave_weight(u, self.phase_at(time), c.width);
        let shimmer = c.shimmer * (c.shimmer_time_freq * time + c.shimmer_spatial_freq * u).sin();
        let variety = 1.0 - c.variation * 0.5 + c.variation * bulb_hash(u).abs();
        (c.base + c.peak * w + shimmer) * variety
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_peaks_at_phase() {
        assert_eq!(wave_weight(0.5, 0.5, 0.1), 1.0);
    }

    #[test]
    fn test_weight_minimal_half_ring_away() {
        let far = wave_weight(0.0, 0.5, 0.1);
        for i in 0..=100 {
            let u = i as f32 / 100.0;
            assert!(wave_weight(u, 0.5, 0.1) >= far);
        }
        assert!(far < 1e-5);
    }

    #[test]
    fn test_weight_wraps_around_ends() {
        let a = wave_weight(0.02, 0.98, 0.1);
        let b = wave_weight(0.5, 0.54, 0.1);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn test_phase_wraps() {
        let wave = LightWave::new(WaveConfig::default());
        assert!((wave.phase_at(10.0) - 0.8).abs() < 1e-4);
        let p = wave.phase_at(1000.0);
        assert!((0.0..1.0).contains(&p));
    }

    #[test]
    fn test_hash_bounded() {
        for i in 0..500 {
            let h = bulb_hash(i as f32 / 499.0);
            assert!(h.abs() < 1.0);
        }
    }

    #[test]
    fn test_intensity_brightest_under_peak() {
        let wave = LightWave::new(WaveConfig { shimmer: 0.0, variation: 0.0, ..Default::default() });
        // Peak sits at u = 0.5 when time * speed = 0.5
        let t = 0.5 / 0.18;
        let under = wave.intensity(0.5, t);
        let opposite = wave.intensity(0.0, t);
        assert!((under - 2.4).abs() < 1e-4);
        assert!((opposite - 0.6).abs() < 1e-4);
    }
}
