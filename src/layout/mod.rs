//! Collision-free ornament layout on the tree surface.
//!
//! Every placer claims space through one [`SlotRegistry`]; candidates are
//! proposed by [`sample_placement`] or tested directly with
//! [`SlotRegistry::is_free`]. Sparkle clusters draw points from a shared
//! [`SparkleBudget`]. All of this state lives in a [`PlacementContext`]
//! scoped to a single scene build.

pub mod config;
pub mod sampler;
pub mod slots;
pub mod sparkle;

pub use config::{GapRule, LayoutConfig, SparkleConfig};
pub use sampler::{sample_placement, PlacementRequest};
pub use slots::{Placement, Slot, SlotId, SlotRegistry};
pub use sparkle::{SparkleBudget, SparkleCluster};

use glam::Vec3;
use rand::rngs::StdRng;

use crate::foliage::RadiusProfile;
use crate::scene::{SceneGraph, SceneNodeId};

/// Mutable state threaded through the placers during one build.
pub struct PlacementContext<'a> {
    pub graph: &'a mut SceneGraph,
    /// Node every placed ornament is attached under
    pub parent: SceneNodeId,
    pub profile: &'a RadiusProfile,
    pub slots: &'a mut SlotRegistry,
    pub sparkles: &'a mut SparkleBudget,
    pub rng: &'a mut StdRng,
}

/// A sparkle cluster that made it into the scene.
#[derive(Clone, Debug)]
pub struct PlacedSparkle {
    pub node: SceneNodeId,
    pub cluster: SparkleCluster,
}

impl PlacementContext<'_> {
    /// Emit a sparkle cluster at `center` if the budget allows.
    pub fn emit_sparkles(&mut self, config: &SparkleConfig, center: Vec3) -> Option<PlacedSparkle> {
        let cluster = SparkleCluster::scatter(config, &mut *self.sparkles, center, &mut *self.rng)?;
        let node = cluster.spawn(&mut *self.graph, self.parent, config);
        Some(PlacedSparkle { node, cluster })
    }
}
