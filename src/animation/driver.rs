//! Per-frame update of everything that moves after the scene is built.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::atmosphere::SnowField;
use crate::core::FrameClock;
use crate::lights::Bulb;
use crate::ornament::SwayParams;
use crate::scene::node::euler_to_quat;
use crate::scene::{SceneGraph, SceneNodeId};

use super::config::WaveConfig;
use super::sway::SwayState;
use super::twinkle::Twinkle;
use super::wave::LightWave;

/// A bulb driven by the light wave.
#[derive(Clone, Copy, Debug)]
struct WaveBulb {
    node: SceneNodeId,
    u: f32,
}

/// Owns the animation state of a built scene.
///
/// Reads only the handles it was given; never touches placement state.
pub struct AnimationDriver {
    sway: Vec<SwayState>,
    bulbs: Vec<WaveBulb>,
    wave: LightWave,
    twinkles: Vec<Box<dyn Twinkle + Send + Sync>>,
    snow: Option<SnowField>,
    rng: StdRng,
}

impl AnimationDriver {
    /// `seed` drives snow recycling only.
    pub fn new(wave: WaveConfig, seed: u64) -> Self {
        Self {
            sway: Vec::new(),
            bulbs: Vec::new(),
            wave: LightWave::new(wave),
            twinkles: Vec::new(),
            snow: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn add_sway(&mut self, node: SceneNodeId, params: SwayParams) {
        self.sway.push(SwayState::new(node, params));
    }

    pub fn add_bulbs(&mut self, bulbs: &[Bulb]) {
        self.bulbs.extend(bulbs.iter().map(|b| WaveBulb { node: b.node, u: b.u }));
    }

    pub fn add_twinkle(&mut self, twinkle: impl Twinkle + Send + Sync + 'static) {
        self.twinkles.push(Box::new(twinkle));
    }

    pub fn set_snow(&mut self, snow: SnowField) {
        self.snow = Some(snow);
    }

    pub fn snow(&self) -> Option<&SnowField> {
        self.snow.as_ref()
    }

    pub fn wave(&self) -> &LightWave {
        &self.wave
    }

    pub fn sway_count(&self) -> usize {
        self.sway.len()
    }

    pub fn bulb_count(&self) -> usize {
        self.bulbs.len()
    }

    pub fn twinkle_count(&self) -> usize {
        self.twinkles.len()
    }

    /// Advance one frame. Sway, wave, twinkle and snow are independent of
    /// each other, so the order here does not matter.
    pub fn update(&mut self, graph: &mut SceneGraph, clock: &FrameClock) {
        let time = clock.elapsed_secs();
        let dt = clock.delta_secs();

        for state in &mut self.sway {
            let rotation = state.step(time);
            graph.set_rotation(state.node, euler_to_quat(rotation));
        }

        for bulb in &self.bulbs {
            let intensity = self.wave.intensity(bulb.u, time);
            if let Some(material) = graph.material_mut(bulb.node) {
                material.emissive_intensity = intensity;
            }
        }

        for twinkle in &self.twinkles {
            twinkle.apply(graph, time);
        }

        if let Some(snow) = &mut self.snow {
            snow.update(dt, &mut self.rng);
            snow.sync(graph);
        }
    }
}
