//! Foliage layers and the height-to-radius silhouette derived from them.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::math::lerp;

/// One horizontal cross-section ring of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoliageLayer {
    /// Height of the layer center.
    pub height: f32,
    /// Outer (star tip) radius.
    pub outer_radius: f32,
    /// Half of the extruded cross-section thickness.
    pub half_height: f32,
}

/// Piecewise-linear silhouette over an ordered layer sequence.
///
/// Heights outside the layer range clamp to the boundary layer's radius.
#[derive(Clone, Debug)]
pub struct RadiusProfile {
    layers: Vec<FoliageLayer>,
}

impl RadiusProfile {
    /// Build from layers in strictly ascending height order.
    pub fn new(layers: Vec<FoliageLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(Error::Geometry("radius profile needs at least one layer".into()));
        }
        if let Some(w) = layers.windows(2).find(|w| w[1].height <= w[0].height) {
            return Err(Error::Geometry(format!(
                "layer heights must increase ({} then {})",
                w[0].height, w[1].height
            )));
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[FoliageLayer] {
        &self.layers
    }

    pub fn bottom(&self) -> &FoliageLayer {
        &self.layers[0]
    }

    pub fn top(&self) -> &FoliageLayer {
        &self.layers[self.layers.len() - 1]
    }

    /// Silhouette radius at `height`.
    pub fn radius_at(&self, height: f32) -> f32 {
        let bottom = self.bottom();
        let top = self.top();
        if height >= top.height {
            return top.outer_radius;
        }
        if height <= bottom.height {
            return bottom.outer_radius;
        }

        // First layer strictly above `height`; its predecessor brackets from below
        let upper = self.layers.partition_point(|l| l.height <= height);
        let a = &self.layers[upper - 1];
        let b = &self.layers[upper];
        let t = (height - a.height) / (b.height - a.height);
        lerp(a.outer_radius, b.outer_radius, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(height: f32, outer_radius: f32) -> FoliageLayer {
        FoliageLayer { height, outer_radius, half_height: 0.1 }
    }

    fn profile() -> RadiusProfile {
        RadiusProfile::new(vec![
            layer(2.0, 4.0),
            layer(4.0, 3.0),
            layer(7.0, 1.5),
            layer(10.0, 0.6),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_layers_rejected() {
        assert!(matches!(RadiusProfile::new(Vec::new()), Err(Error::Geometry(_))));
    }

    #[test]
    fn test_non_increasing_heights_rejected() {
        let result = RadiusProfile::new(vec![layer(2.0, 4.0), layer(2.0, 3.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_clamps_outside_range() {
        let p = profile();
        assert_eq!(p.radius_at(-5.0), 4.0);
        assert_eq!(p.radius_at(2.0), 4.0);
        assert_eq!(p.radius_at(10.0), 0.6);
        assert_eq!(p.radius_at(50.0), 0.6);
    }

    #[test]
    fn test_interpolates_between_brackets() {
        let p = profile();
        assert!((p.radius_at(3.0) - 3.5).abs() < 1e-6);
        assert!((p.radius_at(4.0) - 3.0).abs() < 1e-6);
        assert!((p.radius_at(5.5) - 2.25).abs() < 1e-6);
        assert!((p.radius_at(8.5) - 1.05).abs() < 1e-5);
    }

    #[test]
    fn test_matches_bracketing_lerp_everywhere() {
        let p = profile();
        let layers = p.layers().to_vec();
        for i in 0..=400 {
            let h = 2.0 + 8.0 * i as f32 / 400.0;
            let r = p.radius_at(h);
            let pair = layers.windows(2).find(|w| h >= w[0].height && h <= w[1].height).unwrap();
            let lo = pair[0].outer_radius.min(pair[1].outer_radius);
            let hi = pair[0].outer_radius.max(pair[1].outer_radius);
            assert!(r >= lo - 1e-5 && r <= hi + 1e-5, "h={h} r={r}");
        }
    }

    #[test]
    fn test_single_layer_profile() {
        let p = RadiusProfile::new(vec![layer(3.0, 1.25)]).unwrap();
        assert_eq!(p.radius_at(0.0), 1.25);
        assert_eq!(p.radius_at(3.0), 1.25);
        assert_eq!(p.radius_at(9.0), 1.25);
    }
}
