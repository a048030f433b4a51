//! Glowing star on top of the tree.

use glam::Vec3;

use crate::scene::{Light, LightKind, LocalTransform, Material, NodeContent, NodeLayer, SceneGraph, SceneNodeId, Shape};

use super::config::TopperConfig;

/// Add the star `config.offset` above `top_height`, with a warm point light
/// at its center. Returns `None` when the topper is disabled.
pub fn add_topper(
    graph: &mut SceneGraph,
    parent: SceneNodeId,
    config: &TopperConfig,
    top_height: f32,
) -> Option<SceneNodeId> {
    if !config.enabled {
        return None;
    }

    let material = Material {
        metalness: 0.7,
        ..Material::standard(config.color)
            .with_roughness(0.18)
            .with_emissive(config.emissive, config.emissive_intensity)
    };
    let star = graph.spawn(
        parent,
        "topper",
        NodeLayer::Decor,
        NodeContent::Shape(Shape::Icosahedron { radius: config.radius }),
        LocalTransform::from_position(Vec3::Y * (top_height + config.offset)),
        Some(material),
    );
    graph.add_child(
        star,
        "topper_light",
        NodeLayer::Lights,
        NodeContent::Light(Light {
            kind: LightKind::Point {
                distance: config.light_distance,
                decay: config.light_decay,
            },
            color: config.light_color,
            intensity: config.light_intensity,
        }),
    );
    Some(star)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topper_sits_above_top() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let star = add_topper(&mut graph, root, &TopperConfig::default(), 9.0).unwrap();
        let node = graph.get(star).unwrap();
        assert!((node.local_transform.position.y - 9.6).abs() < 1e-6);
        assert_eq!(graph.children(star).count(), 1);
    }

    #[test]
    fn test_disabled_topper() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let cfg = TopperConfig { enabled: false, ..Default::default() };
        assert!(add_topper(&mut graph, root, &cfg, 9.0).is_none());
        assert_eq!(graph.node_count(), 1);
    }
}
