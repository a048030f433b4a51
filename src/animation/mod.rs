//! Procedural animation driven by one frame clock: ornament sway, the
//! chasing light wave, sparkle and star twinkle, and falling snow.

pub mod config;
pub mod driver;
pub mod sway;
pub mod twinkle;
pub mod wave;

pub use config::{AnimationConfig, WaveConfig};
pub use driver::AnimationDriver;
pub use sway::{smooth_toward, SwayState};
pub use twinkle::{SparkleTwinkle, Twinkle};
pub use wave::{bulb_hash, wave_weight, LightWave};
