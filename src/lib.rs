//! Tinsel - procedural decorated tree scene
//!
//! Builds a layered star-shaped tree with a spiral light cable, photo frames,
//! candies, bells and a topper star, then animates it under a snowy night sky.
//! Rendering and image decoding sit behind the [`render::RenderBackend`] and
//! [`assets::ImageSource`] traits.

pub mod core;
pub mod math;
pub mod foliage;
pub mod layout;
pub mod lights;
pub mod ornament;
pub mod atmosphere;
pub mod animation;
pub mod assets;
pub mod scene;
pub mod render;
