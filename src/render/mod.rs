//! Render boundary.
//!
//! The scene never talks to a graphics API. Each frame it hands a
//! [`RenderBackend`] the flattened draw list plus a [`FrameUniform`]; window
//! size changes are forwarded through [`RenderBackend::resize`].

pub mod camera;
pub mod headless;

pub use camera::Camera;
pub use headless::{FrameStats, HeadlessBackend};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::atmosphere::FogConfig;
use crate::core::Result;
use crate::scene::DrawItem;

/// Post-processing glow applied to bright pixels.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            strength: 1.1,
            radius: 0.4,
            threshold: 0.4,
        }
    }
}

/// Camera placement and output settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
    /// Tone-mapping exposure
    pub exposure: f32,
    pub bloom: BloomConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(0.0, 6.0, 16.0),
            camera_target: Vec3::new(0.0, 5.0, 0.0),
            fov_degrees: 55.0,
            near: 0.1,
            far: 200.0,
            width: 1280,
            height: 720,
            exposure: 1.0,
            bloom: BloomConfig::default(),
        }
    }
}

impl ViewConfig {
    pub fn camera(&self) -> Camera {
        let aspect = if self.height > 0 { self.width as f32 / self.height as f32 } else { 1.0 };
        Camera {
            near: self.near,
            far: self.far,
            ..Camera::look_at(self.camera_position, self.camera_target, self.fov_degrees, aspect)
        }
    }
}

/// Per-frame constants (112 bytes, 16-byte aligned rows).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Camera position + elapsed seconds
    pub camera_time: [f32; 4],
    /// Fog RGB + density (0 when fog is off)
    pub fog: [f32; 4],
    /// Exposure, bloom strength, bloom radius, bloom threshold
    pub post: [f32; 4],
}

impl FrameUniform {
    pub fn new(camera: &Camera, view: &ViewConfig, fog: &FogConfig, time: f32) -> Self {
        let p = camera.position;
        let c = fog.color.to_array();
        let density = if fog.enabled { fog.density } else { 0.0 };
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_time: [p.x, p.y, p.z, time],
            fog: [c[0], c[1], c[2], density],
            post: [view.exposure, view.bloom.strength, view.bloom.radius, view.bloom.threshold],
        }
    }
}

/// Consumer of the per-frame draw list.
pub trait RenderBackend {
    /// Called once before the first frame.
    fn configure(&mut self, view: &ViewConfig);

    /// Viewport size changed.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn submit(&mut self, frame: &FrameUniform, items: &[DrawItem<'_>]) -> Result<()>;
}
