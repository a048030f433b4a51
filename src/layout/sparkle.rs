//! Small twinkling point clusters and the global budget they draw from.

use glam::Vec3;
use rand::Rng;

use crate::math::{radial, RngExt};
use crate::scene::{Blend, LocalTransform, Material, NodeContent, NodeLayer, PointCloud, SceneGraph, SceneNodeId};

use super::config::SparkleConfig;

/// Counter of sparkle points handed out so far.
///
/// Grants never push `used` past `max_total`, however many clusters ask.
#[derive(Clone, Copy, Debug)]
pub struct SparkleBudget {
    max_total: u32,
    used: u32,
}

impl SparkleBudget {
    pub fn new(max_total: u32) -> Self {
        Self { max_total, used: 0 }
    }

    /// Grant up to `requested` points; returns how many were granted.
    pub fn allocate(&mut self, requested: u32) -> u32 {
        let granted = requested.min(self.remaining());
        self.used += granted;
        granted
    }

    pub fn remaining(&self) -> u32 {
        self.max_total - self.used
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn max_total(&self) -> u32 {
        self.max_total
    }
}

/// A cluster of points sharing one oscillating opacity.
#[derive(Clone, Debug)]
pub struct SparkleCluster {
    pub center: Vec3,
    /// Point offsets relative to `center`
    pub offsets: Vec<Vec3>,
    pub phase: f32,
    pub speed: f32,
    pub base: f32,
    pub amplitude: f32,
}

impl SparkleCluster {
    /// Scatter a cluster around `center`, drawing its size from `budget`.
    ///
    /// Returns `None` once the budget is exhausted.
    pub fn scatter<R: Rng + ?Sized>(
        config: &SparkleConfig,
        budget: &mut SparkleBudget,
        center: Vec3,
        rng: &mut R,
    ) -> Option<Self> {
        if budget.remaining() == 0 {
            return None;
        }
        let count = budget.allocate(rng.count_in(config.per_min, config.per_max));
        if count == 0 {
            return None;
        }

        let offsets = (0..count)
            .map(|_| {
                let r = rng.between(config.radius_min, config.radius_max);
                let a = rng.angle();
                radial(a) * r + Vec3::Y * rng.spread(config.height_spread)
            })
            .collect();

        Some(Self {
            center,
            offsets,
            phase: rng.angle(),
            speed: rng.between(config.speed_min, config.speed_max),
            base: config.opacity_base,
            amplitude: config.opacity_amplitude,
        })
    }

    /// Opacity at `time` seconds.
    pub fn opacity_at(&self, time: f32) -> f32 {
        self.base + self.amplitude * (time * self.speed + self.phase).sin()
    }

    /// Add the cluster as a point cloud node under `parent`.
    pub fn spawn(&self, graph: &mut SceneGraph, parent: SceneNodeId, config: &SparkleConfig) -> SceneNodeId {
        graph.spawn(
            parent,
            "sparkles",
            NodeLayer::Particles,
            NodeContent::Points(PointCloud {
                positions: self.offsets.clone(),
                size: config.size,
                size_attenuation: true,
            }),
            LocalTransform::from_position(self.center),
            Some(Material::standard(config.color).with_opacity(
                self.base + self.amplitude,
                Blend::Transparent,
            )),
        )
    }
}
