//! Scene graph, configuration and assembly of the decorated tree

pub mod builder;
pub mod config;
pub mod flatten;
pub mod graph;
pub mod manager;
pub mod material;
pub mod mesh;
pub mod node;

pub use builder::{BuiltScene, SceneBuilder};
pub use config::SceneConfig;
pub use flatten::{DrawItem, InstanceRaw};
pub use graph::SceneGraph;
pub use manager::ChristmasScene;
pub use material::{Blend, Material, TextureRef};
pub use mesh::MeshData;
pub use node::{
    LocalTransform, Light, LightKind, NodeContent, NodeLayer, PointCloud, SceneNode, SceneNodeId,
    Shape,
};
