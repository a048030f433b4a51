//! Everything around the tree: sky dome, fog, scene lights, star field and snow.
//!
//! [`Sky`] and [`SnowField`] add their nodes to the scene graph once at build
//! time. The star field twinkles through [`StarField::opacity_at`]; snow is
//! advanced every frame with [`SnowField::update`] and written back with
//! [`SnowField::sync`].

pub mod config;
pub mod fog;
pub mod sky;
pub mod snow;

pub use config::{FogConfig, LightConfig, SkyConfig, SnowConfig, SnowLayerConfig, StarFieldConfig};
pub use fog::compute_fog_factor;
pub use sky::{Sky, StarField};
pub use snow::{SnowBounds, SnowField, SnowLayer};
