//! Flattened scene graph output for GPU upload.
//!
//! `DrawItem` is the result of walking the scene graph: one entry per drawable
//! non-group node, borrowing its content and material from the graph.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::material::Material;
use super::node::{NodeContent, NodeLayer, SceneNodeId};

/// One entry in the flattened draw list.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem<'a> {
    pub id: SceneNodeId,
    pub name: &'a str,
    pub layer: NodeLayer,
    /// World transform after propagation.
    pub world: Mat4,
    pub content: &'a NodeContent,
    pub material: Option<&'a Material>,
}

impl DrawItem<'_> {
    /// Pack the per-draw data into the GPU instance layout.
    pub fn instance_raw(&self) -> InstanceRaw {
        let (color, emissive) = match self.material {
            Some(m) => {
                let c = m.color.to_array();
                let e = m.emitted();
                ([c[0], c[1], c[2], m.opacity], [e[0], e[1], e[2], m.roughness])
            }
            None => ([1.0; 4], [0.0, 0.0, 0.0, 1.0]),
        };
        InstanceRaw {
            model: self.world.to_cols_array_2d(),
            color,
            emissive,
        }
    }
}

/// Per-draw instance data (96 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    /// RGB + opacity
    pub color: [f32; 4],
    /// Premultiplied emissive RGB + roughness
    pub emissive: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;
    use crate::scene::node::Shape;

    #[test]
    fn test_instance_raw_size() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 96);
    }

    #[test]
    fn test_instance_raw_packs_material() {
        let content = NodeContent::Shape(Shape::Sphere { radius: 0.1 });
        let material = Material::emissive(Color::from_hex(0x00ff00), 2.0).with_roughness(0.5);
        let item = DrawItem {
            id: SceneNodeId(3),
            name: "bulb",
            layer: NodeLayer::Lights,
            world: Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0)),
            content: &content,
            material: Some(&material),
        };
        let raw = item.instance_raw();
        assert_eq!(raw.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(raw.color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(raw.emissive, [0.0, 2.0, 0.0, 0.5]);

        let bytes: &[u8] = bytemuck::bytes_of(&raw);
        assert_eq!(bytes.len(), 96);
    }
}
