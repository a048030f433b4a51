//! Golden bells hanging in loose height bands.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::layout::{sample_placement, GapRule, Placement, PlacementContext, PlacementRequest, SparkleConfig};
use crate::math::{radial, RngExt};
use crate::scene::{LocalTransform, Material, NodeContent, NodeLayer, SceneNodeId, Shape};

use super::config::BellConfig;
use super::{outward_euler, Placed, SwayParams};

#[derive(Clone, Copy, Debug)]
pub struct Bell {
    pub node: SceneNodeId,
    pub placement: Placement,
    pub sway: SwayParams,
}

pub fn place_bells(
    ctx: &mut PlacementContext<'_>,
    config: &BellConfig,
    sparkle: &SparkleConfig,
    rule: &GapRule,
) -> Placed<Bell> {
    let profile = ctx.profile;
    let requested = ctx.rng.count_in(config.count_min, config.count_max);
    let lo = profile.bottom().height + config.bottom_margin;
    let hi = profile.top().height - config.top_margin;
    let bands: Vec<f32> = config.band_fractions.iter().map(|f| lo + (hi - lo) * f).collect();
    let request = PlacementRequest::uniform((lo, hi), *rule, config.tries)
        .with_bands(&bands, config.band_jitter);
    let radius_at = |y: f32| (profile.radius_at(y) - config.inset).max(config.min_radius);

    let mut placed = Placed::default();
    for i in 0..requested {
        let Some(placement) = sample_placement(&mut *ctx.slots, &mut *ctx.rng, &request, radius_at) else {
            continue;
        };
        let position = radial(placement.angle) * placement.radius + Vec3::Y * placement.height;
        let base = outward_euler(placement.angle);
        let sway = SwayParams::sample(&config.sway, base, &mut *ctx.rng);

        let node = ctx.graph.spawn(
            ctx.parent,
            format!("bell_{i}"),
            NodeLayer::Decor,
            NodeContent::Group,
            LocalTransform::from_position_euler(position, base),
            None,
        );
        assemble(ctx, node, config);

        placed.items.push(Bell { node, placement, sway });
        if let Some(s) = ctx.emit_sparkles(sparkle, position) {
            placed.sparkles.push(s);
        }
    }

    log::debug!("Placed {}/{} bells", placed.items.len(), requested);
    placed
}

/// Body, skirt, clapper and hanging loop under `bell`.
fn assemble(ctx: &mut PlacementContext<'_>, bell: SceneNodeId, config: &BellConfig) {
    let gold = Material {
        metalness: 0.85,
        ..Material::metal(config.color, 0.25)
    };
    let clapper = Material {
        metalness: 0.1,
        ..Material::standard(config.clapper_color).with_roughness(0.6)
    };

    let parts = [
        (
            "body",
            Shape::Sphere { radius: 0.18 },
            LocalTransform::from_position(Vec3::Y * 0.06).with_scale(Vec3::new(1.0, 1.15, 1.0)),
            gold.clone(),
        ),
        (
            "skirt",
            Shape::Cylinder { top_radius: 0.22, bottom_radius: 0.16, height: 0.18 },
            LocalTransform::from_position(Vec3::Y * -0.06),
            gold.clone(),
        ),
        (
            "clapper",
            Shape::Sphere { radius: 0.05 },
            LocalTransform::from_position(Vec3::Y * -0.16),
            clapper,
        ),
        (
            "hook",
            Shape::Torus { radius: 0.08, tube: 0.015, arc: std::f32::consts::TAU },
            LocalTransform::from_position_euler(Vec3::Y * 0.22, Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            gold,
        ),
    ];
    for (name, shape, transform, material) in parts {
        ctx.graph.spawn(bell, name, NodeLayer::Decor, NodeContent::Shape(shape), transform, Some(material));
    }
}
