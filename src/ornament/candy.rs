//! Round candies and candy canes tucked into the foliage.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};

use crate::core::Color;
use crate::layout::{sample_placement, GapRule, Placement, PlacementContext, PlacementRequest, SparkleConfig};
use crate::math::{radial, RngExt};
use crate::scene::{LocalTransform, Material, NodeContent, NodeLayer, SceneNodeId, Shape};

use super::config::CandyConfig;
use super::{outward_euler, Placed};

/// Visual variant; placement does not depend on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CandyKind {
    Cane,
    Round { color: Color },
}

#[derive(Clone, Copy, Debug)]
pub struct Candy {
    pub node: SceneNodeId,
    pub kind: CandyKind,
    pub placement: Placement,
}

/// Scatter a random number of candies between the end layers, each followed
/// by a sparkle cluster while the sparkle budget lasts.
pub fn place_candies(
    ctx: &mut PlacementContext<'_>,
    config: &CandyConfig,
    sparkle: &SparkleConfig,
    rule: &GapRule,
) -> Placed<Candy> {
    let profile = ctx.profile;
    let requested = ctx.rng.count_in(config.count_min, config.count_max);
    let range = (
        profile.bottom().height + config.margin,
        profile.top().height - config.margin,
    );
    let request = PlacementRequest::uniform(range, *rule, config.tries);
    let radius_at = |y: f32| (profile.radius_at(y) - config.inset).max(config.min_radius);

    let mut placed = Placed::default();
    for i in 0..requested {
        let Some(placement) = sample_placement(&mut *ctx.slots, &mut *ctx.rng, &request, radius_at) else {
            continue;
        };
        let position = radial(placement.angle) * placement.radius + Vec3::Y * placement.height;

        let kind = if ctx.rng.unit() < config.cane_probability || config.palette.is_empty() {
            CandyKind::Cane
        } else {
            CandyKind::Round {
                color: config.palette[i as usize % config.palette.len()],
            }
        };

        // Outward yaw, then a random roll about local X and Z
        let yaw = outward_euler(placement.angle).y;
        let rotation = Quat::from_rotation_y(yaw)
            * Quat::from_rotation_x(ctx.rng.angle())
            * Quat::from_rotation_z(ctx.rng.angle());
        let transform = LocalTransform { rotation, ..LocalTransform::from_position(position) };

        let node = match kind {
            CandyKind::Cane => spawn_cane(ctx, config, transform, i),
            CandyKind::Round { color } => ctx.graph.spawn(
                ctx.parent,
                format!("candy_{i}"),
                NodeLayer::Decor,
                NodeContent::Shape(Shape::Sphere { radius: config.round_radius }),
                transform,
                Some(Material::emissive(color, config.round_emissive).with_roughness(0.35)),
            ),
        };

        placed.items.push(Candy { node, kind, placement });
        if let Some(s) = ctx.emit_sparkles(sparkle, position) {
            placed.sparkles.push(s);
        }
    }

    log::debug!("Placed {}/{} candies", placed.items.len(), requested);
    placed
}

fn spawn_cane(
    ctx: &mut PlacementContext<'_>,
    config: &CandyConfig,
    transform: LocalTransform,
    index: u32,
) -> SceneNodeId {
    let material = Material::standard(config.cane_color)
        .with_roughness(0.5)
        .with_stripe(config.stripe_color);

    let cane = ctx.graph.spawn(
        ctx.parent,
        format!("cane_{index}"),
        NodeLayer::Decor,
        NodeContent::Group,
        transform,
        None,
    );
    ctx.graph.spawn(
        cane,
        "stick",
        NodeLayer::Decor,
        NodeContent::Shape(Shape::Cylinder {
            top_radius: config.stick_radius,
            bottom_radius: config.stick_radius,
            height: config.stick_length,
        }),
        LocalTransform::from_position(Vec3::Y * config.stick_length * 0.5),
        Some(material.clone()),
    );
    ctx.graph.spawn(
        cane,
        "hook",
        NodeLayer::Decor,
        NodeContent::Shape(Shape::Torus {
            radius: config.hook_radius,
            tube: config.hook_tube,
            arc: config.hook_arc,
        }),
        LocalTransform::from_position_euler(
            Vec3::new(-config.hook_radius, config.stick_length + 0.02, 0.0),
            Vec3::new(0.0, 0.0, -FRAC_PI_2 + PI / 2.5),
        ),
        Some(material),
    );
    cane
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foliage::{FoliageLayer, RadiusProfile};
    use crate::layout::{LayoutConfig, SlotRegistry, SparkleBudget};
    use crate::scene::SceneGraph;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn profile() -> RadiusProfile {
        let layers = (0..20)
            .map(|i| FoliageLayer {
                height: 2.3 + i as f32 * 0.4,
                outer_radius: 3.9 - i as f32 * 0.17,
                half_height: 0.1,
            })
            .collect();
        RadiusProfile::new(layers).unwrap()
    }

    #[test]
    fn test_candies_inside_range_and_inset() {
        let p = profile();
        let cfg = CandyConfig::default();
        let mut graph = SceneGraph::new();
        let mut slots = SlotRegistry::new();
        let mut sparkles = SparkleBudget::new(150);
        let mut rng = StdRng::seed_from_u64(31);
        let mut ctx = PlacementContext {
            parent: graph.root(),
            graph: &mut graph,
            profile: &p,
            slots: &mut slots,
            sparkles: &mut sparkles,
            rng: &mut rng,
        };
        let placed = place_candies(&mut ctx, &cfg, &SparkleConfig::default(), &LayoutConfig::default().candy);

        assert!(!placed.items.is_empty() && placed.items.len() <= 40);
        assert_eq!(slots.len(), placed.items.len());
        for c in &placed.items {
            let pl = c.placement;
            assert!(pl.height >= p.bottom().height + 1.2 && pl.height <= p.top().height - 1.2);
            let expected = (p.radius_at(pl.height) - 0.4).max(0.4);
            assert!((pl.radius - expected).abs() < 1e-5);
        }
        // Sparkles follow candies until the budget is spent
        assert!(!placed.sparkles.is_empty());
        assert!(sparkles.used() <= 150);
    }

    #[test]
    fn test_both_variants_appear() {
        let p = profile();
        let cfg = CandyConfig { count_min: 40, count_max: 40, ..Default::default() };
        let mut graph = SceneGraph::new();
        let mut slots = SlotRegistry::new();
        let mut sparkles = SparkleBudget::new(0);
        let mut rng = StdRng::seed_from_u64(32);
        let mut ctx = PlacementContext {
            parent: graph.root(),
            graph: &mut graph,
            profile: &p,
            slots: &mut slots,
            sparkles: &mut sparkles,
            rng: &mut rng,
        };
        let placed = place_candies(&mut ctx, &cfg, &SparkleConfig::default(), &LayoutConfig::default().candy);

        assert!(placed.items.iter().any(|c| c.kind == CandyKind::Cane));
        assert!(placed.items.iter().any(|c| matches!(c.kind, CandyKind::Round { .. })));
        assert!(placed.sparkles.is_empty());
        for c in placed.items.iter().filter(|c| c.kind == CandyKind::Cane) {
            assert_eq!(graph.children(c.node).count(), 2);
        }
    }
}
