//! Scene graph: CPU-side hierarchy of nodes.
//!
//! Nodes carry a local transform, optional material and content, organized
//! with parent/child relationships. Each frame, `flatten()` walks the tree
//! and produces a flat `Vec<DrawItem>` that the render backend consumes.

use std::collections::HashMap;

use glam::{Mat4, Quat};

use super::flatten::DrawItem;
use super::material::Material;
use super::node::{LocalTransform, NodeContent, NodeLayer, SceneNode, SceneNodeId};

/// CPU-side scene graph for the decorated tree and its surroundings.
pub struct SceneGraph {
    nodes: HashMap<SceneNodeId, SceneNode>,
    root: SceneNodeId,
    next_id: u64,
}

impl SceneGraph {
    /// Create a new scene graph with a root Group node.
    pub fn new() -> Self {
        let root_id = SceneNodeId(0);
        let root_node = SceneNode::new(root_id, "root", NodeLayer::Tree, NodeContent::Group);

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root_node);

        Self {
            nodes,
            root: root_id,
            next_id: 1,
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> SceneNodeId {
        self.root
    }

    /// Allocate a fresh node ID.
    fn alloc_id(&mut self) -> SceneNodeId {
        let id = SceneNodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a child node under `parent`. Returns the new node's ID.
    pub fn add_child(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        layer: NodeLayer,
        content: NodeContent,
    ) -> SceneNodeId {
        let id = self.alloc_id();
        let mut node = SceneNode::new(id, name, layer, content);
        node.parent = Some(parent);

        self.nodes.insert(id, node);

        // Register as child of parent
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }

        id
    }

    /// Add a child with its transform and material in one call.
    pub fn spawn(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        layer: NodeLayer,
        content: NodeContent,
        transform: LocalTransform,
        material: Option<Material>,
    ) -> SceneNodeId {
        let id = self.add_child(parent, name, layer, content);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform = transform;
            node.material = material;
        }
        id
    }

    /// Set the local transform of a node.
    pub fn set_transform(&mut self, id: SceneNodeId, transform: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform = transform;
        }
    }

    /// Replace only the rotation of a node's local transform.
    pub fn set_rotation(&mut self, id: SceneNodeId, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform.rotation = rotation;
        }
    }

    /// Mutable access to a node's material, if it has one.
    pub fn material_mut(&mut self, id: SceneNodeId) -> Option<&mut Material> {
        self.nodes.get_mut(&id)?.material.as_mut()
    }

    /// Mutable access to a node's content.
    pub fn content_mut(&mut self, id: SceneNodeId) -> Option<&mut NodeContent> {
        self.nodes.get_mut(&id).map(|n| &mut n.content)
    }

    /// Get an immutable reference to a node.
    pub fn get(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable reference to a node.
    pub fn get_mut(&mut self, id: SceneNodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Iterate over the children of a node.
    pub fn children(&self, id: SceneNodeId) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// Total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walk the tree, propagate transforms, and collect all drawables.
    pub fn flatten(&mut self) -> Vec<DrawItem<'_>> {
        // Propagate world transforms from root downward
        self.propagate_transforms(self.root, Mat4::IDENTITY);

        let mut out = Vec::new();
        self.collect_draw_items(self.root, &mut out);
        out
    }

    /// Recursively propagate world transforms.
    fn propagate_transforms(&mut self, node_id: SceneNodeId, parent_world: Mat4) {
        let (local_mat, children) = {
            let node = match self.nodes.get(&node_id) {
                Some(n) => n,
                None => return,
            };
            (node.local_transform.to_mat4(), node.children.clone())
        };

        let world = parent_world * local_mat;

        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.world_transform = world;
        }

        for child_id in children {
            self.propagate_transforms(child_id, world);
        }
    }

    /// Recursively collect draw items in depth-first order.
    fn collect_draw_items<'a>(&'a self, node_id: SceneNodeId, out: &mut Vec<DrawItem<'a>>) {
        let node = match self.nodes.get(&node_id) {
            Some(n) => n,
            None => return,
        };

        if !matches!(node.content, NodeContent::Group) {
            out.push(DrawItem {
                id: node.id,
                name: &node.name,
                layer: node.layer,
                world: node.world_transform,
                content: &node.content,
                material: node.material.as_ref(),
            });
        }

        for &child_id in &node.children {
            self.collect_draw_items(child_id, out);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;
    use crate::scene::node::Shape;
    use glam::Vec3;

    fn sphere() -> NodeContent {
        NodeContent::Shape(Shape::Sphere { radius: 1.0 })
    }

    #[test]
    fn test_new_scene_graph() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.get(graph.root()).unwrap().name, "root");
    }

    #[test]
    fn test_add_multiple_children() {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let a = graph.add_child(root, "a", NodeLayer::Tree, NodeContent::Group);
        let b = graph.add_child(root, "b", NodeLayer::Decor, NodeContent::Group);
        let c = graph.add_child(a, "c", NodeLayer::Tree, NodeContent::Group);

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.children(root).count(), 2);
        assert!(graph.children(a).any(|x| x == c));
        assert_eq!(graph.children(b).count(), 0);
        assert_eq!(graph.get(c).unwrap().parent, Some(a));
    }

    #[test]
    fn test_flatten_skips_groups_in_depth_first_order() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let group = graph.add_child(root, "group", NodeLayer::Decor, NodeContent::Group);
        graph.add_child(group, "first", NodeLayer::Decor, sphere());
        graph.add_child(group, "second", NodeLayer::Decor, sphere());
        graph.add_child(root, "third", NodeLayer::Decor, sphere());

        let names: Vec<_> = graph.flatten().iter().map(|item| item.name).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_flatten_propagates_transforms() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let parent = graph.spawn(
            root,
            "parent",
            NodeLayer::Decor,
            NodeContent::Group,
            LocalTransform::from_position(Vec3::new(10.0, 0.0, 0.0)),
            None,
        );
        graph.spawn(
            parent,
            "child",
            NodeLayer::Decor,
            sphere(),
            LocalTransform::from_position(Vec3::new(0.0, 5.0, 0.0)),
            None,
        );

        let items = graph.flatten();
        let pos = items[0].world.transform_point3(Vec3::ZERO);
        assert!((pos - Vec3::new(10.0, 5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_material_mut_writes_through() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let bulb = graph.spawn(
            root,
            "bulb",
            NodeLayer::Lights,
            sphere(),
            LocalTransform::identity(),
            Some(Material::emissive(Color::WHITE, 1.5)),
        );
        graph.material_mut(bulb).unwrap().emissive_intensity = 2.0;
        assert_eq!(graph.get(bulb).unwrap().material.as_ref().unwrap().emissive_intensity, 2.0);
    }
}
