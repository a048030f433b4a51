//! Opacity oscillation for sparkle clusters and the star field.

use crate::atmosphere::StarField;
use crate::layout::PlacedSparkle;
use crate::scene::{SceneGraph, SceneNodeId};

/// Something whose whole node fades in and out over time.
pub trait Twinkle {
    fn node(&self) -> SceneNodeId;
    fn opacity_at(&self, time: f32) -> f32;

    /// Write the opacity for `time` into the node's material.
    fn apply(&self, graph: &mut SceneGraph, time: f32) {
        let opacity = self.opacity_at(time).clamp(0.0, 1.0);
        if let Some(material) = graph.material_mut(self.node()) {
            material.opacity = opacity;
        }
    }
}

/// The per-frame part of a placed sparkle cluster. The point offsets stay
/// with the build output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkleTwinkle {
    pub node: SceneNodeId,
    pub phase: f32,
    pub speed: f32,
    pub base: f32,
    pub amplitude: f32,
}

impl From<&PlacedSparkle> for SparkleTwinkle {
    fn from(sparkle: &PlacedSparkle) -> Self {
        let cluster = &sparkle.cluster;
        Self {
            node: sparkle.node,
            phase: cluster.phase,
            speed: cluster.speed,
            base: cluster.base,
            amplitude: cluster.amplitude,
        }
    }
}

impl Twinkle for SparkleTwinkle {
    fn node(&self) -> SceneNodeId {
        self.node
    }

    fn opacity_at(&self, time: f32) -> f32 {
        self.base + self.amplitude * (time * self.speed + self.phase).sin()
    }
}

impl Twinkle for StarField {
    fn node(&self) -> SceneNodeId {
        self.node
    }

    fn opacity_at(&self, time: f32) -> f32 {
        StarField::opacity_at(self, time)
    }
}
