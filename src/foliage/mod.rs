//! Layered star-ring foliage and the radius profile derived from it.
//!
//! The tree body is a stack of thin extruded star polygons. Each layer gets
//! its own radius (eased falloff, shared low-frequency wave, jitter and a
//! tent-shaped inset at the cable ring bands), a small twist and tilt, and a
//! ring of needle instances around its rim. The layer list doubles as the
//! silhouette every placer queries through [`RadiusProfile`].

pub mod config;
pub mod needles;
pub mod profile;
pub mod star;

pub use config::{BudConfig, FoliageConfig, NeedleConfig, RingBands, TrunkConfig};
pub use needles::NeedleSet;
pub use profile::{FoliageLayer, RadiusProfile};
pub use star::{StarOutline, StarRing};

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};
use rand::Rng;

use crate::core::{Color, Result};
use crate::math::{lerp, RngExt};
use crate::scene::{
    LocalTransform, Material, MeshData, NodeContent, NodeLayer, SceneGraph, SceneNodeId, Shape,
};

/// Spatial frequency of the rim noise field
const RIM_NOISE_SCALE: f64 = 1.7;

/// Renderable data for one foliage layer, in layer-local space.
#[derive(Clone, Debug)]
pub struct LayerGeometry {
    pub layer: FoliageLayer,
    /// Height fraction of this layer in the stack, 0 at the bottom
    pub t: f32,
    /// XYZ Euler rotation applied to the ring and its needles
    pub rotation: Vec3,
    pub color: Color,
    pub needle_color: Color,
    pub mesh: MeshData,
    pub needles: NeedleSet,
}

/// Generated foliage: the silhouette plus the per-layer geometry.
#[derive(Clone, Debug)]
pub struct Foliage {
    pub profile: RadiusProfile,
    pub layers: Vec<LayerGeometry>,
}

impl Foliage {
    /// Ring bands spanned over the generated bottom and top layer heights.
    pub fn layer_ring_bands(&self, fractions: [f32; 3]) -> RingBands {
        RingBands::over_span(self.profile.bottom().height, self.profile.top().height, fractions)
    }

    /// Add the trunk, every layer (ring mesh + needles) and the top bud under `parent`.
    pub fn add_to_scene(
        &self,
        graph: &mut SceneGraph,
        parent: SceneNodeId,
        config: &FoliageConfig,
    ) -> SceneNodeId {
        let root = graph.add_child(parent, "foliage", NodeLayer::Tree, NodeContent::Group);

        let trunk = &config.trunk;
        graph.spawn(
            root,
            "trunk",
            NodeLayer::Tree,
            NodeContent::Shape(Shape::Cylinder {
                top_radius: trunk.top_radius,
                bottom_radius: trunk.bottom_radius,
                height: trunk.height,
            }),
            LocalTransform::from_position(Vec3::new(0.0, trunk.height * 0.5, 0.0)),
            Some(Material::standard(trunk.color).with_roughness(0.9)),
        );

        for (i, geometry) in self.layers.iter().enumerate() {
            let layer = graph.spawn(
                root,
                format!("layer_{i}"),
                NodeLayer::Tree,
                NodeContent::Group,
                LocalTransform::from_position_euler(
                    Vec3::new(0.0, geometry.layer.height, 0.0),
                    geometry.rotation,
                ),
                None,
            );
            graph.spawn(
                layer,
                "ring",
                NodeLayer::Tree,
                NodeContent::Mesh(Arc::new(geometry.mesh.clone())),
                LocalTransform::identity(),
                Some(Material {
                    metalness: 0.02,
                    ..Material::standard(geometry.color).with_roughness(0.9)
                }),
            );
            graph.spawn(
                layer,
                "needles",
                NodeLayer::Tree,
                NodeContent::Instances {
                    shape: Shape::Plane {
                        width: geometry.needles.width,
                        height: geometry.needles.length,
                    },
                    transforms: geometry.needles.transforms.clone(),
                },
                LocalTransform::identity(),
                Some(Material::standard(geometry.needle_color).with_roughness(0.95).double_sided()),
            );
        }

        graph.spawn(
            root,
            "bud",
            NodeLayer::Tree,
            NodeContent::Shape(Shape::Cone {
                radius: config.bud.radius,
                height: config.bud.height,
            }),
            LocalTransform::from_position(Vec3::new(
                0.0,
                config.top_height + config.bud.offset,
                0.0,
            )),
            Some(Material {
                metalness: 0.05,
                ..Material::standard(config.top_color).with_roughness(0.85)
            }),
        );

        root
    }
}

/// Builds [`Foliage`] from a [`FoliageConfig`] and a random source.
pub struct FoliageGenerator {
    config: FoliageConfig,
}

impl FoliageGenerator {
    pub fn new(config: FoliageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FoliageConfig {
        &self.config
    }

    /// Generate a layer stack with strictly increasing heights.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Foliage> {
        let cfg = &self.config;
        let count = rng.count_in(cfg.layer_count_min, cfg.layer_count_max).max(2);
        let y_step = (cfg.top_height - cfg.bottom_height) / (count - 1) as f32;
        let wave_freq = rng.count_in(cfg.wave_frequency_min, cfg.wave_frequency_max) as f32;
        let wave_phase = rng.angle();
        let bands = cfg.ring_bands();
        let perlin = Perlin::new(rng.random::<u32>());

        let mut layers: Vec<FoliageLayer> = Vec::with_capacity(count as usize);
        let mut geometry = Vec::with_capacity(count as usize);

        for i in 0..count {
            let t = i as f32 / (count - 1) as f32;

            let mut y = cfg.bottom_height + y_step * i as f32;
            let jitter = rng.spread(y_step * cfg.height_jitter);
            if let Some(prev) = layers.last() {
                y = (y + jitter).max(cfg.bottom_height).min(cfg.top_height);
                y = y.max(prev.height + y_step * cfg.min_step);
            } else {
                y = cfg.bottom_height;
            }

            let eased = t.powf(cfg.radius_ease_power);
            let base_r = lerp(cfg.bottom_radius, cfg.top_radius, eased);
            let wave = 1.0 + cfg.wave_amplitude * (t * wave_freq * TAU + wave_phase).sin();
            let jitter_r = rng.spread(cfg.radius_jitter) * (1.0 - t);
            let inset = bands.inset_at(y, cfg.ring_inset_width, cfg.ring_inset_depth);
            let r = (base_r * wave + jitter_r - inset).max(cfg.min_radius);
            let thickness = lerp(cfg.thickness_bottom, cfg.thickness_top, t);

            let ring = StarRing {
                points: cfg.star_points,
                outer_radius: r,
                hole_radius: r * cfg.inner_ratio,
                thickness,
            };
            let mut mesh = ring.mesh();
            self.roughen(&mut mesh, r, t, i, &perlin, rng);

            let color = cfg.base_color.lerp(cfg.top_color, t * 0.9 + 0.1);
            let rotation = Vec3::new(
                rng.spread(cfg.tilt_jitter * 2.0),
                t * cfg.twist_total + rng.spread(cfg.twist_jitter),
                rng.spread(cfg.tilt_jitter * 2.0),
            );
            let needle_color =
                color.offset_lightness(rng.spread(cfg.needles.lightness_jitter * 2.0));
            let needle_count = needles::needle_count(&cfg.needles, r, cfg.bottom_radius);
            let needles =
                needles::scatter(&cfg.needles, &ring.outer_outline(), needle_count, t, rng);

            let layer = FoliageLayer {
                height: y,
                outer_radius: r,
                half_height: thickness * 0.5,
            };
            layers.push(layer);
            geometry.push(LayerGeometry {
                layer,
                t,
                rotation,
                color,
                needle_color,
                mesh,
                needles,
            });
        }

        log::debug!(
            "Generated {} foliage layers ({:.2}..{:.2}), wave freq {}",
            count,
            layers[0].height,
            layers[layers.len() - 1].height,
            wave_freq
        );

        Ok(Foliage {
            profile: RadiusProfile::new(layers)?,
            layers: geometry,
        })
    }

    /// Push rim vertices outward by a coherent noise field and droop them;
    /// interior vertices only get a small independent jitter.
    fn roughen<R: Rng + ?Sized>(
        &self,
        mesh: &mut MeshData,
        r: f32,
        t: f32,
        layer_index: u32,
        perlin: &Perlin,
        rng: &mut R,
    ) {
        let cfg = &self.config;
        let droop = (1.0 - t) * cfg.droop;

        for p in &mut mesh.positions {
            let xz = Vec2::new(p.x, p.z);
            let radial = xz.length();
            if radial <= f32::EPSILON {
                continue;
            }
            let edge = radial / r;

            if edge > cfg.edge_threshold {
                let n = perlin.get([
                    p.x as f64 * RIM_NOISE_SCALE,
                    layer_index as f64 * 3.1,
                    p.z as f64 * RIM_NOISE_SCALE,
                ]) as f32;
                let push = xz / radial * n.clamp(-1.0, 1.0) * cfg.outer_noise * 0.5 * r;
                p.x += push.x;
                p.z += push.y;
                p.y -= droop * edge * edge;
            } else {
                p.x += rng.spread(cfg.inner_jitter) * r;
                p.z += rng.spread(cfg.inner_jitter) * r;
            }
        }

        mesh.compute_vertex_normals();
    }
}
