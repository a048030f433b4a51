//! Assembles the decorated tree from a [`SceneConfig`].
//!
//! Build order is part of the contract: foliage, cable and bulbs, photos,
//! candies, bells, then the topper. Every placer claims space in the slot
//! registry left behind by the ones before it, so reordering changes the
//! result for a given seed.

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::animation::{AnimationDriver, SparkleTwinkle};
use crate::atmosphere::{Sky, SnowField};
use crate::core::Result;
use crate::foliage::{Foliage, FoliageGenerator, FoliageLayer};
use crate::layout::{PlacementContext, PlacedSparkle, Slot, SlotRegistry, SparkleBudget};
use crate::lights::{place_bulbs, Bulb, SpiralPath, SpiralPathBuilder};
use crate::ornament::{add_topper, place_bells, place_candies, place_photos, Bell, Candy, PhotoFrame};

use super::config::SceneConfig;
use super::graph::SceneGraph;
use super::node::{NodeContent, NodeLayer, SceneNodeId};

/// Snow recycling draws from its own stream so frame count never changes layout
const ANIMATION_SEED_SALT: u64 = 0x5eed_f1a4e;

/// Everything a build produced.
pub struct BuiltScene {
    pub graph: SceneGraph,
    /// Group holding the tree and everything hung on it
    pub tree: SceneNodeId,
    pub foliage: Foliage,
    pub slots: SlotRegistry,
    pub sparkle_budget: SparkleBudget,
    pub cable: Option<SpiralPath>,
    pub bulbs: Vec<Bulb>,
    pub photos: Vec<PhotoFrame>,
    pub candies: Vec<Candy>,
    pub bells: Vec<Bell>,
    pub sparkles: Vec<PlacedSparkle>,
    pub topper: Option<SceneNodeId>,
    pub sky: Sky,
    pub animation: AnimationDriver,
}

/// Counts and layout of a build, for logs and `--dump`.
#[derive(Clone, Debug, Serialize)]
pub struct SceneReport {
    pub seed: u64,
    pub layers: Vec<FoliageLayer>,
    pub slots: Vec<Slot>,
    pub bulbs: usize,
    pub photos: usize,
    pub photos_finalized: usize,
    pub candies: usize,
    pub bells: usize,
    pub sparkle_points: u32,
    pub topper: bool,
    pub scene_nodes: usize,
}

impl BuiltScene {
    pub fn report(&self, seed: u64) -> SceneReport {
        SceneReport {
            seed,
            layers: self.foliage.profile.layers().to_vec(),
            slots: self.slots.slots().to_vec(),
            bulbs: self.bulbs.len(),
            photos: self.photos.len(),
            photos_finalized: self.photos.iter().filter(|p| p.is_finalized()).count(),
            candies: self.candies.len(),
            bells: self.bells.len(),
            sparkle_points: self.sparkle_budget.used(),
            topper: self.topper.is_some(),
            scene_nodes: self.graph.node_count(),
        }
    }
}

pub struct SceneBuilder {
    config: SceneConfig,
    photos: Option<Vec<PathBuf>>,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self { config, photos: None }
    }

    /// Use these photo paths instead of the configured file list.
    pub fn with_photos(mut self, photos: Vec<PathBuf>) -> Self {
        self.photos = Some(photos);
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn build(&self) -> Result<BuiltScene> {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let foliage = FoliageGenerator::new(cfg.foliage.clone()).generate(&mut rng)?;
        let tree = graph.add_child(root, "tree", NodeLayer::Tree, NodeContent::Group);
        foliage.add_to_scene(&mut graph, tree, &cfg.foliage);

        let mut slots = SlotRegistry::new();
        let mut sparkle_budget = SparkleBudget::new(cfg.sparkles.max_total);
        let photo_paths = self.photos.clone().unwrap_or_else(|| cfg.photos.paths());

        let (cable, bulbs, photos, candies, bells) = {
            let mut ctx = PlacementContext {
                graph: &mut graph,
                parent: tree,
                profile: &foliage.profile,
                slots: &mut slots,
                sparkles: &mut sparkle_budget,
                rng: &mut rng,
            };

            let (cable, bulbs) = match SpiralPathBuilder::new(cfg.cable.clone()).build(&foliage.profile, &mut *ctx.rng) {
                Ok(path) => {
                    path.spawn(&mut *ctx.graph, tree, &cfg.cable);
                    let bands = foliage.layer_ring_bands(cfg.foliage.ring_band_fractions);
                    let bulbs = place_bulbs(&mut ctx, &path, &cfg.bulbs, &cfg.layout.bulb, &bands);
                    (Some(path), bulbs)
                }
                Err(e) => {
                    log::warn!("Skipping light cable: {}", e);
                    (None, Vec::new())
                }
            };

            let photos = place_photos(&mut ctx, &photo_paths, &cfg.photos, &cfg.layout.photo);
            let candies = place_candies(&mut ctx, &cfg.candies, &cfg.sparkles, &cfg.layout.candy);
            let bells = place_bells(&mut ctx, &cfg.bells, &cfg.sparkles, &cfg.layout.bell);
            (cable, bulbs, photos, candies, bells)
        };

        let topper = add_topper(&mut graph, tree, &cfg.topper, cfg.foliage.top_height);

        let sky = Sky::spawn(&mut graph, root, &cfg.sky, &mut rng);
        let snow = SnowField::spawn(&mut graph, root, &cfg.snow, &mut rng);

        let mut animation = AnimationDriver::new(cfg.animation.wave.clone(), cfg.seed ^ ANIMATION_SEED_SALT);
        for frame in &photos {
            animation.add_sway(frame.node, frame.sway);
        }
        for bell in &bells.items {
            animation.add_sway(bell.node, bell.sway);
        }
        animation.add_bulbs(&bulbs);
        let sparkles: Vec<PlacedSparkle> = candies.sparkles.into_iter().chain(bells.sparkles).collect();
        for sparkle in &sparkles {
            animation.add_twinkle(SparkleTwinkle::from(sparkle));
        }
        animation.add_twinkle(sky.stars);
        animation.set_snow(snow);

        log::info!(
            "Built tree: {} layers, {} bulbs, {} photos, {}/{} candies, {}/{} bells, {} sparkle points, {} slots",
            foliage.layers.len(),
            bulbs.len(),
            photos.len(),
            candies.items.len(),
            cfg.candies.count_max,
            bells.items.len(),
            cfg.bells.count_max,
            sparkle_budget.used(),
            slots.len(),
        );

        Ok(BuiltScene {
            graph,
            tree,
            foliage,
            slots,
            sparkle_budget,
            cable,
            bulbs,
            photos,
            candies: candies.items,
            bells: bells.items,
            sparkles,
            topper,
            sky,
            animation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_photos(seed: u64, n: usize) -> SceneConfig {
        let mut cfg = SceneConfig::default();
        cfg.seed = seed;
        cfg.photos.files = (0..n).map(|i| format!("photo_{i}.jpg")).collect();
        cfg
    }

    #[test]
    fn test_full_build() {
        let scene = SceneBuilder::new(config_with_photos(2024, 10)).build().unwrap();

        let n = scene.foliage.layers.len();
        assert!((18..=28).contains(&n));
        assert!(scene.cable.is_some());
        assert!(!scene.bulbs.is_empty());
        assert_eq!(scene.photos.len(), 10);
        assert!(!scene.candies.is_empty());
        assert!(!scene.bells.is_empty());
        assert!(scene.topper.is_some());
        assert!(scene.sparkle_budget.used() <= 150);

        let expected_slots = scene.bulbs.len() + scene.photos.len() + scene.candies.len() + scene.bells.len();
        assert_eq!(scene.slots.len(), expected_slots);

        // Sway: every photo and bell; twinkle: every sparkle plus the star field
        assert_eq!(scene.animation.sway_count(), scene.photos.len() + scene.bells.len());
        assert_eq!(scene.animation.twinkle_count(), scene.sparkles.len() + 1);
        assert_eq!(scene.animation.bulb_count(), scene.bulbs.len());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = SceneBuilder::new(config_with_photos(7, 6)).build().unwrap();
        let b = SceneBuilder::new(config_with_photos(7, 6)).build().unwrap();
        assert_eq!(a.foliage.profile.layers(), b.foliage.profile.layers());
        assert_eq!(a.slots.slots(), b.slots.slots());

        let c = SceneBuilder::new(config_with_photos(8, 6)).build().unwrap();
        assert_ne!(a.slots.slots(), c.slots.slots());
    }

    #[test]
    fn test_no_photos_still_decorates() {
        let scene = SceneBuilder::new(config_with_photos(3, 0)).build().unwrap();
        assert!(scene.photos.is_empty());
        assert!(!scene.bulbs.is_empty());
        assert!(!scene.candies.is_empty());
        assert!(!scene.bells.is_empty());
    }

    #[test]
    fn test_with_photos_overrides_config() {
        let scene = SceneBuilder::new(config_with_photos(3, 2))
            .with_photos(vec![PathBuf::from("x.jpg"); 5])
            .build()
            .unwrap();
        assert_eq!(scene.photos.len(), 5);
    }

    #[test]
    fn test_report_serializes() {
        let scene = SceneBuilder::new(config_with_photos(11, 3)).build().unwrap();
        let report = scene.report(11);
        assert_eq!(report.photos, 3);
        assert_eq!(report.photos_finalized, 0);
        assert_eq!(report.slots.len(), scene.slots.len());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"layers\""));
    }
}
