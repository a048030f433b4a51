//! Scene graph node types
//!
//! Core types for the CPU-side scene graph: node IDs, transforms, content variants, and nodes.

use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::core::Color;

use super::material::Material;
use super::mesh::MeshData;

/// Unique identifier for a scene graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneNodeId(pub u64);

/// Coarse grouping used to toggle whole categories of content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeLayer {
    Tree,
    Decor,
    Lights,
    Sky,
    Particles,
}

/// Local transform relative to the parent node.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Identity transform (no translation, rotation, or scaling).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a translation-only transform.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Translation plus XYZ Euler rotation (radians).
    pub fn from_position_euler(position: Vec3, euler: Vec3) -> Self {
        Self {
            position,
            rotation: euler_to_quat(euler),
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a 4x4 matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// XYZ-ordered Euler angles to a quaternion.
pub fn euler_to_quat(euler: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)
}

/// Analytic primitive shapes the backend tessellates itself.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// XY-plane quad facing +Z.
    Plane { width: f32, height: f32 },
    Cuboid { size: Vec3 },
    Sphere { radius: f32 },
    Cylinder { top_radius: f32, bottom_radius: f32, height: f32 },
    Cone { radius: f32, height: f32 },
    /// Swept `arc` radians from +X toward +Y.
    Torus { radius: f32, tube: f32, arc: f32 },
    Icosahedron { radius: f32 },
    /// Flat star outline band in the XY plane.
    StarBand { points: u32, outer_radius: f32, inner_radius: f32, band: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Shines from the node position toward the origin.
    Directional,
    Point { distance: f32, decay: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

/// Screen-space sized point sprites.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub size: f32,
    /// Keep sprite size constant in world units rather than pixels
    pub size_attenuation: bool,
}

/// What a scene node contains.
#[derive(Clone, Debug)]
pub enum NodeContent {
    /// A grouping node with no geometry of its own.
    Group,
    /// Explicit triangle mesh (foliage rings, light cable tube).
    Mesh(Arc<MeshData>),
    Shape(Shape),
    /// One shape drawn once per transform (needles).
    Instances { shape: Shape, transforms: Vec<Mat4> },
    Points(PointCloud),
    Light(Light),
    /// Back-facing gradient sphere around the scene.
    SkyDome { radius: f32, top: Color, bottom: Color },
}

/// A single node in the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: SceneNodeId,
    pub name: String,
    pub parent: Option<SceneNodeId>,
    pub children: Vec<SceneNodeId>,
    pub local_transform: LocalTransform,
    /// Cached world transform (recomputed during propagation).
    pub world_transform: Mat4,
    pub layer: NodeLayer,
    pub material: Option<Material>,
    pub content: NodeContent,
}

impl SceneNode {
    /// Create a new scene node.
    pub fn new(
        id: SceneNodeId,
        name: impl Into<String>,
        layer: NodeLayer,
        content: NodeContent,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            local_transform: LocalTransform::identity(),
            world_transform: Mat4::IDENTITY,
            layer,
            material: None,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_scene_node_id_equality() {
        assert_eq!(SceneNodeId(1), SceneNodeId(1));
        assert_ne!(SceneNodeId(1), SceneNodeId(2));
    }

    #[test]
    fn test_local_transform_identity() {
        let t = LocalTransform::identity();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_local_transform_from_position_euler() {
        let pos = Vec3::new(10.0, 5.0, -3.0);
        let t = LocalTransform::from_position_euler(pos, Vec3::new(0.0, FRAC_PI_2, 0.0));
        let m = t.to_mat4();
        let (_, _, translation) = m.to_scale_rotation_translation();
        assert!((translation - pos).length() < 1e-5);
        // Yaw of +90 degrees turns local +Z toward +X
        let facing = m.transform_vector3(Vec3::Z);
        assert!((facing - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_local_transform_non_uniform_scale() {
        let t = LocalTransform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::new(1.0, 0.5, 2.0));
        let (scale, _, translation) = t.to_mat4().to_scale_rotation_translation();
        assert!((scale - Vec3::new(1.0, 0.5, 2.0)).length() < 1e-5);
        assert!((translation - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_scene_node_new() {
        let node = SceneNode::new(SceneNodeId(0), "root", NodeLayer::Tree, NodeContent::Group);
        assert_eq!(node.id, SceneNodeId(0));
        assert_eq!(node.name, "root");
        assert!(node.parent.is_none());
        assert!(node.children.is_empty());
        assert!(node.material.is_none());
        assert_eq!(node.layer, NodeLayer::Tree);
    }
}
