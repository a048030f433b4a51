//! Backend that packs draw data without a GPU.
//!
//! Used by the command-line runner, tests and benches. It performs the same
//! CPU-side packing a real backend would and records what it saw.

use crate::core::{Error, Result};
use crate::scene::{DrawItem, InstanceRaw, NodeContent};

use super::{FrameUniform, RenderBackend, ViewConfig};

/// What the last submitted frame contained.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub draw_items: usize,
    /// Needle-style instanced copies, counted per transform
    pub instances: usize,
    pub points: usize,
    pub lights: usize,
    pub triangles: usize,
    /// Bytes of instance and uniform data that would be uploaded
    pub upload_bytes: usize,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    view: Option<ViewConfig>,
    size: (u32, u32),
    frames: u64,
    last: FrameStats,
    staging: Vec<InstanceRaw>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl RenderBackend for HeadlessBackend {
    fn configure(&mut self, view: &ViewConfig) {
        self.size = (view.width, view.height);
        self.view = Some(view.clone());
        log::debug!("Headless backend configured at {}x{}", view.width, view.height);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn submit(&mut self, frame: &FrameUniform, items: &[DrawItem<'_>]) -> Result<()> {
        if self.view.is_none() {
            return Err(Error::Runtime("backend used before configure".to_string()));
        }

        self.staging.clear();
        self.staging.extend(items.iter().map(DrawItem::instance_raw));

        let mut stats = FrameStats {
            draw_items: items.len(),
            ..Default::default()
        };
        for item in items {
            match item.content {
                NodeContent::Instances { transforms, .. } => stats.instances += transforms.len(),
                NodeContent::Points(cloud) => stats.points += cloud.positions.len(),
                NodeContent::Light(_) => stats.lights += 1,
                NodeContent::Mesh(mesh) => stats.triangles += mesh.triangle_count(),
                _ => {}
            }
        }
        stats.upload_bytes =
            bytemuck::cast_slice::<InstanceRaw, u8>(&self.staging).len() + bytemuck::bytes_of(frame).len();

        self.last = stats;
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!("Frame {}: {:?}", self.frames, stats);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::FogConfig;
    use crate::core::Color;
    use crate::scene::{LocalTransform, Material, NodeLayer, PointCloud, SceneGraph, Shape};
    use glam::Vec3;

    #[test]
    fn test_submit_requires_configure() {
        let mut backend = HeadlessBackend::new();
        let view = ViewConfig::default();
        let frame = FrameUniform::new(&view.camera(), &view, &FogConfig::default(), 0.0);
        assert!(backend.submit(&frame, &[]).is_err());
    }

    #[test]
    fn test_stats_count_content() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.spawn(
            root,
            "bulb",
            NodeLayer::Lights,
            NodeContent::Shape(Shape::Sphere { radius: 0.1 }),
            LocalTransform::identity(),
            Some(Material::emissive(Color::WHITE, 1.0)),
        );
        graph.add_child(
            root,
            "snow",
            NodeLayer::Particles,
            NodeContent::Points(PointCloud { positions: vec![Vec3::ZERO; 12], size: 0.1, size_attenuation: true }),
        );

        let view = ViewConfig::default();
        let mut backend = HeadlessBackend::new();
        backend.configure(&view);
        backend.resize(640, 480);
        let frame = FrameUniform::new(&view.camera(), &view, &FogConfig::default(), 0.0);
        let items = graph.flatten();
        backend.submit(&frame, &items).unwrap();

        let stats = backend.last_frame();
        assert_eq!(stats.draw_items, 2);
        assert_eq!(stats.points, 12);
        assert_eq!(stats.upload_bytes, 2 * 96 + 112);
        assert_eq!(backend.frames_submitted(), 1);
        assert_eq!(backend.size(), (640, 480));
    }
}
