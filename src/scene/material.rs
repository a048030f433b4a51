//! Surface description attached to renderable nodes.

use std::path::PathBuf;

use crate::core::Color;

/// Reference to an image texture the render backend should bind.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureRef {
    pub path: PathBuf,
    /// Rounded-corner radius applied when the backend bakes the texture, in pixels
    pub corner_radius_px: u32,
}

/// How a surface blends with what is behind it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    #[default]
    Opaque,
    Transparent,
}

/// PBR-ish material parameters.
///
/// Only scalars the animation writes every frame (`emissive_intensity`,
/// `opacity`) are expected to change after build.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub blend: Blend,
    /// Secondary color painted as diagonal stripes (candy canes)
    pub stripe: Option<Color>,
    pub texture: Option<TextureRef>,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            opacity: 1.0,
            roughness: 0.8,
            metalness: 0.0,
            blend: Blend::Opaque,
            stripe: None,
            texture: None,
            double_sided: false,
        }
    }
}

impl Material {
    /// Opaque diffuse surface.
    pub fn standard(color: Color) -> Self {
        Self { color, ..Default::default() }
    }

    /// Surface that glows in `color`.
    pub fn emissive(color: Color, intensity: f32) -> Self {
        Self {
            color,
            emissive: color,
            emissive_intensity: intensity,
            roughness: 0.4,
            ..Default::default()
        }
    }

    /// Polished metal.
    pub fn metal(color: Color, roughness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness: 1.0,
            ..Default::default()
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32, blend: Blend) -> Self {
        self.opacity = opacity;
        self.blend = blend;
        self
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_stripe(mut self, stripe: Color) -> Self {
        self.stripe = Some(stripe);
        self
    }

    pub fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Emissive color premultiplied by intensity, as uploaded to the GPU
    pub fn emitted(&self) -> [f32; 3] {
        let e = self.emissive.to_array();
        [
            e[0] * self.emissive_intensity,
            e[1] * self.emissive_intensity,
            e[2] * self.emissive_intensity,
        ]
    }
}
