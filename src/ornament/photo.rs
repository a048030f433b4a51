//! Photo frames hung in rings around the tree.
//!
//! A frame starts as a placeholder-sized card. Once its image dimensions are
//! known it is finalized exactly once: the card is refit to the image aspect,
//! the frame parts are resized, and the frame moves to the radius matching
//! its new width (the registered slot follows).

use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};

use crate::core::Color;
use crate::foliage::RadiusProfile;
use crate::layout::{GapRule, PlacementContext, SlotId, SlotRegistry};
use crate::math::radial;
use crate::scene::{
    Blend, LocalTransform, Material, NodeContent, NodeLayer, SceneGraph, SceneNodeId, Shape,
    TextureRef,
};

use super::config::PhotoConfig;
use super::{outward_euler, SwayParams};

/// Lifecycle of a photo frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhotoState {
    /// Showing the placeholder card; image not loaded (or failed to load)
    Placeholder,
    /// Sized to the loaded image
    Finalized { pixel_width: u32, pixel_height: u32 },
}

/// Child nodes of a frame, in the order produced by [`part_layout`].
const PART_COUNT: usize = 7;

/// A placed photo frame.
#[derive(Clone, Debug)]
pub struct PhotoFrame {
    pub node: SceneNodeId,
    pub path: PathBuf,
    /// Which of the three rings the frame hangs in
    pub band: usize,
    pub angle: f32,
    /// Height of the frame center
    pub height: f32,
    pub slot: SlotId,
    /// Card width and height
    pub size: Vec2,
    pub sway: SwayParams,
    state: PhotoState,
    parts: [SceneNodeId; PART_COUNT],
}

impl PhotoFrame {
    pub fn state(&self) -> PhotoState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, PhotoState::Finalized { .. })
    }

    /// Distance from the axis for a card of `width` at `height`.
    fn ring_radius(profile: &RadiusProfile, config: &PhotoConfig, height: f32, width: f32) -> f32 {
        profile.radius_at(height) + config.margin + width * config.width_factor
    }

    fn transform(&self, ring_radius: f32, config: &PhotoConfig) -> LocalTransform {
        LocalTransform::from_position_euler(
            radial(self.angle) * (ring_radius + config.outward_nudge) + Vec3::Y * self.height,
            outward_euler(self.angle),
        )
    }

    /// Apply the loaded image dimensions.
    ///
    /// Returns `false` without touching anything if the frame was already
    /// finalized. Zero dimensions keep the placeholder size but still bind
    /// the texture.
    pub fn finalize(
        &mut self,
        graph: &mut SceneGraph,
        slots: &mut SlotRegistry,
        profile: &RadiusProfile,
        config: &PhotoConfig,
        pixel_width: u32,
        pixel_height: u32,
    ) -> bool {
        if self.is_finalized() {
            log::debug!("Ignoring repeated load for {}", self.path.display());
            return false;
        }

        if pixel_width > 0 && pixel_height > 0 {
            self.size = fit_card_size(config, pixel_width, pixel_height);
            for (id, (shape, position)) in self.parts.iter().zip(part_layout(config, self.size)) {
                if let Some(node) = graph.get_mut(*id) {
                    node.content = NodeContent::Shape(shape);
                    node.local_transform.position = position;
                }
            }

            let ring_radius = Self::ring_radius(profile, config, self.height, self.size.x);
            let mut transform = self.transform(ring_radius, config);
            if let Some(node) = graph.get(self.node) {
                // Keep whatever sway rotation is in flight
                transform.rotation = node.local_transform.rotation;
            }
            graph.set_transform(self.node, transform);
            slots.set_radius(self.slot, ring_radius);
        }

        if let Some(material) = graph.material_mut(self.parts[0]) {
            material.texture = Some(TextureRef {
                path: self.path.clone(),
                corner_radius_px: config.corner_radius_px,
            });
        }

        self.state = PhotoState::Finalized { pixel_width, pixel_height };
        log::debug!(
            "Finalized {} at {:.2}x{:.2}",
            self.path.display(),
            self.size.x,
            self.size.y
        );
        true
    }
}

/// Fit a card to an image aspect ratio.
///
/// The long edge starts at `card_long`, is capped at `max_long`, and the
/// short edge is raised to `min_short` unless that would break the cap, in
/// which case the cap wins.
pub fn fit_card_size(config: &PhotoConfig, pixel_width: u32, pixel_height: u32) -> Vec2 {
    let aspect = pixel_width as f32 / pixel_height as f32;
    let mut size = if aspect >= 1.0 {
        Vec2::new(config.card_long, config.card_long / aspect)
    } else {
        Vec2::new(config.card_long * aspect, config.card_long)
    };

    let long = size.max_element();
    if long > config.max_long {
        size *= config.max_long / long;
    }

    let long = size.max_element();
    let short = size.min_element();
    if short < config.min_short {
        let mut s = config.min_short / short;
        if long * s > config.max_long {
            s = config.max_long / long;
        }
        size *= s;
    }
    size
}

/// Deal `items` into `bands` groups in round-robin order.
pub fn round_robin<T: Clone>(items: &[T], bands: usize) -> Vec<Vec<T>> {
    let mut groups = vec![Vec::new(); bands.max(1)];
    let n = groups.len();
    for (i, item) in items.iter().enumerate() {
        groups[i % n].push(item.clone());
    }
    groups
}

/// Shapes and local positions of the frame parts for a card of `size`:
/// photo, glass, star decor, then the top, bottom, left and right bars.
fn part_layout(config: &PhotoConfig, size: Vec2) -> [(Shape, Vec3); PART_COUNT] {
    let (w, h) = (size.x, size.y);
    let ft = config.frame_thickness;
    let depth = config.frame_depth;
    let bar_z = config.glass_offset + 0.01;
    let decor_radius = (size.max_element() * 0.5 - config.decor_inset).max(config.decor_min_radius);
    let horizontal = Shape::Cuboid { size: Vec3::new(w + ft * 2.0, ft, depth) };
    let vertical = Shape::Cuboid { size: Vec3::new(ft, h + ft * 2.0, depth) };

    [
        (Shape::Plane { width: w, height: h }, Vec3::ZERO),
        (Shape::Plane { width: w, height: h }, Vec3::Z * config.glass_offset),
        (
            Shape::StarBand {
                points: config.decor_points,
                outer_radius: decor_radius,
                inner_radius: decor_radius * 0.5,
                band: config.decor_band,
            },
            Vec3::Z * (config.glass_offset + 0.03),
        ),
        (horizontal.clone(), Vec3::new(0.0, h * 0.5 + ft * 0.5, bar_z)),
        (horizontal, Vec3::new(0.0, -h * 0.5 - ft * 0.5, bar_z)),
        (vertical.clone(), Vec3::new(-w * 0.5 - ft * 0.5, 0.0, bar_z)),
        (vertical, Vec3::new(w * 0.5 + ft * 0.5, 0.0, bar_z)),
    ]
}

fn part_materials(config: &PhotoConfig) -> [Material; PART_COUNT] {
    let photo = Material::standard(Color::WHITE).with_roughness(0.6).double_sided();
    let glass = Material::standard(Color::WHITE)
        .with_roughness(0.06)
        .with_opacity(config.glass_opacity, Blend::Transparent)
        .double_sided();
    let decor = Material::standard(config.decor_color)
        .with_roughness(0.9)
        .with_opacity(config.decor_opacity, Blend::Transparent);
    let bar = Material {
        metalness: 0.3,
        ..Material::standard(config.frame_color)
            .with_roughness(0.4)
            .with_emissive(Color::WHITE, config.frame_emissive)
    };
    [photo, glass, decor, bar.clone(), bar.clone(), bar.clone(), bar]
}

const PART_NAMES: [&str; PART_COUNT] = [
    "photo",
    "glass",
    "decor",
    "frame_top",
    "frame_bottom",
    "frame_left",
    "frame_right",
];

/// Hang one placeholder frame per photo, dealt round-robin into three rings
/// and spaced evenly around each ring.
///
/// Slots are registered unconditionally: the rings are placed first among
/// the free-form ornaments and their positions are fixed by design.
pub fn place_photos(
    ctx: &mut PlacementContext<'_>,
    photos: &[PathBuf],
    config: &PhotoConfig,
    rule: &GapRule,
) -> Vec<PhotoFrame> {
    if photos.is_empty() {
        log::warn!("No photos configured, skipping photo frames");
        return Vec::new();
    }

    let profile = ctx.profile;
    let layers = profile.layers();
    let placeholder = Vec2::new(config.card_long, config.card_long * config.placeholder_aspect);
    let mut frames = Vec::with_capacity(photos.len());

    for (band, files) in round_robin(photos, config.band_fractions.len()).into_iter().enumerate() {
        if files.is_empty() {
            continue;
        }
        let index = ((layers.len() as f32 * config.band_fractions[band]).floor() as usize)
            .min(layers.len() - 1);
        let layer = layers[index];
        let height = layer.height + layer.half_height * config.height_lift;
        let count = files.len();

        for (i, path) in files.into_iter().enumerate() {
            let angle = i as f32 / count as f32 * TAU;
            let ring_radius = PhotoFrame::ring_radius(profile, config, height, placeholder.x);
            let slot = ctx.slots.register(angle, height, ring_radius, rule.weight);

            let node = ctx.graph.add_child(ctx.parent, frame_name(&path), NodeLayer::Decor, NodeContent::Group);
            let mut parts = [node; PART_COUNT];
            let materials = part_materials(config);
            for (k, ((shape, position), material)) in
                part_layout(config, placeholder).into_iter().zip(materials).enumerate()
            {
                parts[k] = ctx.graph.spawn(
                    node,
                    PART_NAMES[k],
                    NodeLayer::Decor,
                    NodeContent::Shape(shape),
                    LocalTransform::from_position(position),
                    Some(material),
                );
            }

            let sway = SwayParams::sample(&config.sway, outward_euler(angle), &mut *ctx.rng);
            let frame = PhotoFrame {
                node,
                path,
                band,
                angle,
                height,
                slot,
                size: placeholder,
                sway,
                state: PhotoState::Placeholder,
                parts,
            };
            ctx.graph.set_transform(node, frame.transform(ring_radius, config));
            frames.push(frame);
        }
    }

    log::debug!("Hung {} photo frames", frames.len());
    frames
}

fn frame_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => format!("photo_frame:{}", name.to_string_lossy()),
        None => "photo_frame".to_string(),
    }
}
