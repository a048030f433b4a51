//! Night sky: gradient dome, scene lights and the star field.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::atmosphere::config::{LightConfig, SkyConfig, StarFieldConfig};
use crate::math::RngExt;
use crate::scene::{
    Blend, Light, LightKind, LocalTransform, Material, NodeContent, NodeLayer, PointCloud, SceneGraph,
    SceneNodeId,
};

/// Twinkling point shell around the scene.
#[derive(Clone, Copy, Debug)]
pub struct StarField {
    pub node: SceneNodeId,
    pub base: f32,
    pub amplitude: f32,
    pub speed: f32,
}

impl StarField {
    /// Uniform points on a shell: `theta` uniform, `cos(phi)` uniform.
    pub fn scatter<R: Rng + ?Sized>(config: &StarFieldConfig, rng: &mut R) -> Vec<Vec3> {
        (0..config.count)
            .map(|_| {
                let r = rng.between(config.radius_min, config.radius_max);
                let theta = TAU * rng.unit();
                let phi = (2.0 * rng.unit() - 1.0).clamp(-1.0, 1.0).acos();
                Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.cos(),
                    r * phi.sin() * theta.sin(),
                )
            })
            .collect()
    }

    /// Shared opacity at `time` seconds.
    pub fn opacity_at(&self, time: f32) -> f32 {
        self.base + self.amplitude * (time * self.speed).sin()
    }
}

/// Handles to everything the sky added to the graph.
#[derive(Clone, Debug)]
pub struct Sky {
    pub dome: SceneNodeId,
    pub lights: Vec<SceneNodeId>,
    pub stars: StarField,
}

impl Sky {
    pub fn spawn<R: Rng + ?Sized>(
        graph: &mut SceneGraph,
        parent: SceneNodeId,
        config: &SkyConfig,
        rng: &mut R,
    ) -> Self {
        let dome = graph.add_child(
            parent,
            "sky_dome",
            NodeLayer::Sky,
            NodeContent::SkyDome {
                radius: config.dome_radius,
                top: config.top,
                bottom: config.bottom,
            },
        );

        let lights = vec![
            spawn_light(graph, parent, "ambient_light", LightKind::Ambient, &config.ambient),
            spawn_light(graph, parent, "key_light", LightKind::Directional, &config.key),
            spawn_light(graph, parent, "rim_light", LightKind::Directional, &config.rim),
        ];

        let positions = StarField::scatter(&config.stars, rng);
        let node = graph.spawn(
            parent,
            "star_field",
            NodeLayer::Sky,
            NodeContent::Points(PointCloud {
                positions,
                size: config.stars.size,
                size_attenuation: true,
            }),
            LocalTransform::identity(),
            Some(Material::standard(config.stars.color).with_opacity(config.stars.opacity, Blend::Transparent)),
        );

        log::debug!("Sky: {} stars, dome radius {}", config.stars.count, config.dome_radius);

        Self {
            dome,
            lights,
            stars: StarField {
                node,
                base: config.stars.twinkle_base,
                amplitude: config.stars.twinkle_amplitude,
                speed: config.stars.twinkle_speed,
            },
        }
    }
}

fn spawn_light(
    graph: &mut SceneGraph,
    parent: SceneNodeId,
    name: &str,
    kind: LightKind,
    config: &LightConfig,
) -> SceneNodeId {
    graph.spawn(
        parent,
        name,
        NodeLayer::Lights,
        NodeContent::Light(Light {
            kind,
            color: config.color,
            intensity: config.intensity,
        }),
        LocalTransform::from_position(config.position),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_stars_on_shell() {
        let cfg = StarFieldConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let stars = StarField::scatter(&cfg, &mut rng);
        assert_eq!(stars.len(), 1400);
        for p in &stars {
            let r = p.length();
            assert!(r >= 35.0 - 1e-3 && r <= 90.0 + 1e-3);
        }
        // Roughly half above the horizon
        let above = stars.iter().filter(|p| p.y > 0.0).count();
        assert!(above > 550 && above < 850);
    }

    #[test]
    fn test_twinkle_range() {
        let field = StarField { node: SceneNodeId(0), base: 0.7, amplitude: 0.25, speed: 0.2 };
        for i in 0..100 {
            let o = field.opacity_at(i as f32);
            assert!(o >= 0.45 - 1e-5 && o <= 0.95 + 1e-5);
        }
        assert_eq!(field.opacity_at(0.0), 0.7);
    }

    #[test]
    fn test_spawn_adds_dome_lights_and_stars() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mut rng = StdRng::seed_from_u64(1);
        let sky = Sky::spawn(&mut graph, root, &SkyConfig::default(), &mut rng);
        assert_eq!(sky.lights.len(), 3);
        assert_eq!(graph.children(root).count(), 5);
        let stars = graph.get(sky.stars.node).unwrap();
        assert_eq!(stars.material.as_ref().unwrap().opacity, 0.85);
    }
}
