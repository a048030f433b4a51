//! Bulbs strung along the spiral cable.

use glam::Vec3;

use crate::core::Color;
use crate::foliage::RingBands;
use crate::layout::{GapRule, Placement, PlacementContext};
use crate::scene::{Light, LightKind, LocalTransform, Material, NodeContent, NodeLayer, Shape, SceneNodeId};

use super::config::BulbConfig;
use super::spiral::SpiralPath;

/// A bulb that made it onto the cable.
#[derive(Clone, Copy, Debug)]
pub struct Bulb {
    pub node: SceneNodeId,
    /// Arc-length fraction along the cable
    pub u: f32,
    pub color: Color,
    pub position: Vec3,
}

/// Walk `config.count` uniform stops along `path` and hang a bulb at every
/// stop that is clear of the ring bands and of previously claimed slots.
pub fn place_bulbs(
    ctx: &mut PlacementContext<'_>,
    path: &SpiralPath,
    config: &BulbConfig,
    rule: &GapRule,
    bands: &RingBands,
) -> Vec<Bulb> {
    if config.count == 0 {
        log::warn!("Bulb count is zero, cable stays dark");
        return Vec::new();
    }

    let mut bulbs = Vec::new();
    let mut skipped_ring = 0;
    let mut skipped_slot = 0;

    for i in 0..config.count {
        let u = if config.count > 1 {
            i as f32 / (config.count - 1) as f32
        } else {
            0.0
        };
        let on_cable = path.point_at(u);

        if bands.near(on_cable.y, config.ring_skip) {
            skipped_ring += 1;
            continue;
        }

        let candidate = Placement {
            angle: on_cable.z.atan2(on_cable.x),
            height: on_cable.y,
            radius: Vec3::new(on_cable.x, 0.0, on_cable.z).length(),
        };
        if !ctx.slots.is_free(&candidate, rule) {
            skipped_slot += 1;
            continue;
        }

        let tangent = path.tangent_at(u);
        let side = Vec3::Y.cross(tangent).normalize_or(Vec3::X);
        let position = on_cable + side * config.lateral_offset;

        let color = config.color_for(i);
        let node = ctx.graph.spawn(
            ctx.parent,
            format!("bulb_{i}"),
            NodeLayer::Lights,
            NodeContent::Shape(Shape::Sphere { radius: config.radius }),
            LocalTransform::from_position(position),
            Some(Material::emissive(color, config.emissive_intensity).with_roughness(0.35)),
        );
        if config.has_light(i) {
            ctx.graph.add_child(
                node,
                "bulb_light",
                NodeLayer::Lights,
                NodeContent::Light(Light {
                    kind: LightKind::Point {
                        distance: config.light_distance,
                        decay: config.light_decay,
                    },
                    color,
                    intensity: config.light_intensity,
                }),
            );
        }

        // Slots are cylindrical: radius is distance from the trunk axis, not |position|
        ctx.slots.register(
            candidate.angle,
            position.y,
            Vec3::new(position.x, 0.0, position.z).length(),
            rule.weight,
        );
        bulbs.push(Bulb { node, u, color, position });
    }

    log::debug!(
        "Placed {}/{} bulbs ({} near ring bands, {} blocked)",
        bulbs.len(),
        config.count,
        skipped_ring,
        skipped_slot
    );
    bulbs
}
