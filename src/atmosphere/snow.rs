//! Falling snow: flakes drift down through a cylinder and wrap to the top.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::atmosphere::config::{SnowConfig, SnowLayerConfig};
use crate::math::RngExt;
use crate::scene::{Blend, LocalTransform, Material, NodeContent, NodeLayer, PointCloud, SceneGraph, SceneNodeId};

/// Vertical cylinder the flakes live in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowBounds {
    pub radius: f32,
    pub y_top: f32,
    pub y_bottom: f32,
}

impl SnowBounds {
    /// Random horizontal position, uniform over the disc.
    fn sample_xz<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let r = self.radius * rng.unit().sqrt();
        let a = rng.angle();
        Vec2::new(a.cos() * r, a.sin() * r)
    }
}

/// One population of flakes with per-flake fall speed and wind drift.
#[derive(Clone, Debug)]
pub struct SnowLayer {
    pub node: SceneNodeId,
    pub positions: Vec<Vec3>,
    pub speeds: Vec<f32>,
    pub drift: Vec<Vec2>,
}

impl SnowLayer {
    fn generate<R: Rng + ?Sized>(
        bounds: &SnowBounds,
        config: &SnowLayerConfig,
        wind_spread: f32,
        rng: &mut R,
    ) -> (Vec<Vec3>, Vec<f32>, Vec<Vec2>) {
        let n = config.count as usize;
        let mut positions = Vec::with_capacity(n);
        let mut speeds = Vec::with_capacity(n);
        let mut drift = Vec::with_capacity(n);
        for _ in 0..n {
            let xz = bounds.sample_xz(rng);
            let y = rng.between(bounds.y_bottom, bounds.y_top);
            positions.push(Vec3::new(xz.x, y, xz.y));
            speeds.push(rng.between(config.speed_min, config.speed_max));
            drift.push(Vec2::new(rng.spread(wind_spread), rng.spread(wind_spread)));
        }
        (positions, speeds, drift)
    }

    /// Advance every flake by `dt`; flakes that fall below the floor restart at the top.
    pub fn step<R: Rng + ?Sized>(&mut self, bounds: &SnowBounds, dt: f32, rng: &mut R) {
        for ((p, speed), drift) in self.positions.iter_mut().zip(&self.speeds).zip(&self.drift) {
            p.y -= speed * dt;
            p.x += drift.x * dt;
            p.z += drift.y * dt;
            if p.y < bounds.y_bottom {
                let xz = bounds.sample_xz(rng);
                *p = Vec3::new(xz.x, bounds.y_top, xz.y);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// All snow layers sharing one volume.
#[derive(Clone, Debug)]
pub struct SnowField {
    pub bounds: SnowBounds,
    pub layers: Vec<SnowLayer>,
}

impl SnowField {
    pub fn spawn<R: Rng + ?Sized>(
        graph: &mut SceneGraph,
        parent: SceneNodeId,
        config: &SnowConfig,
        rng: &mut R,
    ) -> Self {
        let bounds = SnowBounds {
            radius: config.radius,
            y_top: config.y_top.max(config.y_bottom),
            y_bottom: config.y_bottom.min(config.y_top),
        };

        let layers = config
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let (positions, speeds, drift) = SnowLayer::generate(&bounds, layer, config.wind_spread, rng);
                let node = graph.spawn(
                    parent,
                    format!("snow_{i}"),
                    NodeLayer::Particles,
                    NodeContent::Points(PointCloud {
                        positions: positions.clone(),
                        size: layer.size,
                        size_attenuation: true,
                    }),
                    LocalTransform::identity(),
                    Some(Material::standard(config.color).with_opacity(layer.opacity, Blend::Transparent)),
                );
                SnowLayer { node, positions, speeds, drift }
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Snow: {} flakes in {} layers",
            layers.iter().map(SnowLayer::len).sum::<usize>(),
            layers.len()
        );
        Self { bounds, layers }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        for layer in &mut self.layers {
            layer.step(&self.bounds, dt, rng);
        }
    }

    /// Copy current flake positions into the graph's point clouds.
    pub fn sync(&self, graph: &mut SceneGraph) {
        for layer in &self.layers {
            if let Some(NodeContent::Points(cloud)) = graph.content_mut(layer.node) {
                cloud.positions.clone_from(&layer.positions);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(seed: u64) -> (SnowField, SceneGraph, StdRng) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mut rng = StdRng::seed_from_u64(seed);
        let snow = SnowField::spawn(&mut graph, root, &SnowConfig::default(), &mut rng);
        (snow, graph, rng)
    }

    #[test]
    fn test_layer_sizes() {
        let (snow, _, _) = field(1);
        assert_eq!(snow.layers.len(), 2);
        assert_eq!(snow.layers[0].len(), 1200);
        assert_eq!(snow.layers[1].len(), 500);
    }

    #[test]
    fn test_flakes_stay_within_height_bounds() {
        let (mut snow, _, mut rng) = field(2);
        // Long, uneven steps so every flake wraps several times
        for i in 0..2000 {
            let dt = if i % 7 == 0 { 0.05 } else { 0.016 };
            snow.update(dt, &mut rng);
            for layer in &snow.layers {
                for p in &layer.positions {
                    assert!(p.y >= -2.0 && p.y <= 18.0, "flake escaped: {p:?}");
                }
            }
        }
    }

    #[test]
    fn test_wrapped_flake_restarts_at_top() {
        let bounds = SnowBounds { radius: 5.0, y_top: 10.0, y_bottom: 0.0 };
        let mut layer = SnowLayer {
            node: SceneNodeId(0),
            positions: vec![Vec3::new(0.0, 0.01, 0.0)],
            speeds: vec![1.0],
            drift: vec![Vec2::ZERO],
        };
        let mut rng = StdRng::seed_from_u64(3);
        layer.step(&bounds, 0.05, &mut rng);
        let p = layer.positions[0];
        assert_eq!(p.y, 10.0);
        assert!(Vec2::new(p.x, p.z).length() <= 5.0 + 1e-4);
    }

    #[test]
    fn test_sync_writes_positions() {
        let (mut snow, mut graph, mut rng) = field(4);
        snow.update(0.5, &mut rng);
        snow.sync(&mut graph);
        let node = graph.get(snow.layers[1].node).unwrap();
        match &node.content {
            NodeContent::Points(cloud) => assert_eq!(cloud.positions, snow.layers[1].positions),
            other => panic!("unexpected content {other:?}"),
        }
    }
}
