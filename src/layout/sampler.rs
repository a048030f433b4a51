//! Rejection sampling of free ornament positions.

use rand::Rng;

use crate::math::RngExt;

use super::config::GapRule;
use super::slots::{Placement, SlotRegistry};

/// Where and how hard to look for a free position.
#[derive(Clone, Debug)]
pub struct PlacementRequest<'a> {
    /// Candidate heights are kept within this range (either order)
    pub height_range: (f32, f32),
    /// Preferred heights; attempt `i` targets `bands[i % len]`. Empty means uniform.
    pub bands: &'a [f32],
    /// Full width of the random offset around a band
    pub band_jitter: f32,
    pub rule: GapRule,
    pub tries: u32,
}

impl PlacementRequest<'_> {
    /// Uniform heights over `height_range`.
    pub fn uniform(height_range: (f32, f32), rule: GapRule, tries: u32) -> Self {
        PlacementRequest {
            height_range,
            bands: &[],
            band_jitter: 0.0,
            rule,
            tries,
        }
    }
}

impl<'a> PlacementRequest<'a> {
    pub fn with_bands(mut self, bands: &'a [f32], jitter: f32) -> Self {
        self.bands = bands;
        self.band_jitter = jitter;
        self
    }
}

/// Try up to `request.tries` random candidates; register and return the first
/// one the registry accepts.
///
/// `radius_at` maps a candidate height to its distance from the axis. `None`
/// means the attempt budget ran out; callers skip the ornament.
pub fn sample_placement<R, F>(
    registry: &mut SlotRegistry,
    rng: &mut R,
    request: &PlacementRequest<'_>,
    radius_at: F,
) -> Option<Placement>
where
    R: Rng + ?Sized,
    F: Fn(f32) -> f32,
{
    let (a, b) = request.height_range;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    for attempt in 0..request.tries {
        let angle = rng.angle();
        let height = if request.bands.is_empty() {
            rng.between(lo, hi)
        } else {
            let band = request.bands[attempt as usize % request.bands.len()];
            (band + rng.spread(request.band_jitter)).clamp(lo, hi)
        };
        let candidate = Placement {
            angle,
            height,
            radius: radius_at(height),
        };
        if registry.is_free(&candidate, &request.rule) {
            registry.register_placement(&candidate, request.rule.weight);
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const RULE: GapRule = GapRule::new(0.14, 0.32, 0.35, 1.1);

    #[test]
    fn test_zero_tries_never_places() {
        let mut reg = SlotRegistry::new();
        let mut rng = StdRng::seed_from_u64(0);
        let req = PlacementRequest::uniform((1.0, 5.0), RULE, 0);
        for _ in 0..20 {
            assert!(sample_placement(&mut reg, &mut rng, &req, |_| 2.0).is_none());
        }
        assert!(reg.is_empty());
    }

    #[test]
    fn test_accepted_placement_is_registered() {
        let mut reg = SlotRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        let req = PlacementRequest::uniform((1.0, 5.0), RULE, 16);
        let p = sample_placement(&mut reg, &mut rng, &req, |y| 4.0 - y * 0.5).unwrap();
        assert_eq!(reg.len(), 1);
        let slot = reg.slots()[0];
        assert_eq!((slot.angle, slot.height, slot.radius), (p.angle, p.height, p.radius));
        assert_eq!(slot.weight, RULE.weight);
        assert!((p.radius - (4.0 - p.height * 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_no_accepted_pair_violates_rule() {
        let mut reg = SlotRegistry::new();
        let mut rng = StdRng::seed_from_u64(2);
        let req = PlacementRequest::uniform((2.0, 4.0), RULE, 16);
        for _ in 0..200 {
            let _ = sample_placement(&mut reg, &mut rng, &req, |_| 1.5);
        }

        let slots = reg.slots();
        assert!(slots.len() > 5);
        for (i, earlier) in slots.iter().enumerate() {
            for later in &slots[i + 1..] {
                let p = Placement { angle: later.angle, height: later.height, radius: later.radius };
                assert!(!earlier.blocks(&p, &RULE));
            }
        }
    }

    #[test]
    fn test_band_bias_clamps_to_range() {
        let mut reg = SlotRegistry::new();
        let mut rng = StdRng::seed_from_u64(3);
        let bands = [0.0, 10.0];
        // Inverted range is normalized
        let req = PlacementRequest::uniform((6.0, 3.0), GapRule::new(0.0, 0.0, 0.0, 1.0), 1)
            .with_bands(&bands, 0.25);
        for _ in 0..50 {
            let p = sample_placement(&mut reg, &mut rng, &req, |_| 1.0).unwrap();
            assert!((3.0..=6.0).contains(&p.height));
        }
    }

    #[test]
    fn test_band_targets_cycle_by_attempt() {
        let mut reg = SlotRegistry::new();
        let mut rng = StdRng::seed_from_u64(4);
        let bands = [2.0, 4.0];
        let req = PlacementRequest::uniform((0.0, 10.0), GapRule::new(0.0, 0.0, 0.0, 1.0), 4)
            .with_bands(&bands, 0.25);
        // A zero rule accepts the first attempt, which always targets bands[0]
        for _ in 0..20 {
            let p = sample_placement(&mut reg, &mut rng, &req, |_| 1.0).unwrap();
            assert!((p.height - 2.0).abs() <= 0.125);
        }
    }
}
