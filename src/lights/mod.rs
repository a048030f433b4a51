//! String lights: the spiral cable and the bulbs hung along it

pub mod bulbs;
pub mod config;
pub mod spiral;

pub use bulbs::{place_bulbs, Bulb};
pub use config::{BulbConfig, CableConfig};
pub use spiral::{SpiralPath, SpiralPathBuilder};
