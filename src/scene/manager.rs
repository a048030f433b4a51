//! Running scene: owns the built tree, feeds it photo sizes as they arrive,
//! animates it, and hands each frame to a render backend.

use std::time::Duration;

use crate::assets::{ImageSource, PhotoLoad, PhotoRequest};
use crate::core::{FrameClock, Result};
use crate::render::{Camera, FrameUniform, RenderBackend};

use super::builder::{BuiltScene, SceneBuilder, SceneReport};
use super::config::SceneConfig;

pub struct ChristmasScene<S: ImageSource, B: RenderBackend> {
    config: SceneConfig,
    scene: BuiltScene,
    images: S,
    backend: B,
    camera: Camera,
    clock: FrameClock,
}

impl<S: ImageSource, B: RenderBackend> ChristmasScene<S, B> {
    /// Build the tree, configure the backend and request every photo.
    pub fn new(config: SceneConfig, images: S, backend: B) -> Result<Self> {
        Self::from_builder(SceneBuilder::new(config), images, backend)
    }

    pub fn from_builder(builder: SceneBuilder, mut images: S, mut backend: B) -> Result<Self> {
        let scene = builder.build()?;
        let config = builder.config().clone();

        backend.configure(&config.view);
        let camera = config.view.camera();
        let clock = FrameClock::new(config.animation.max_delta);

        for (id, frame) in scene.photos.iter().enumerate() {
            if !images.request(PhotoRequest { id, path: frame.path.clone() }) {
                log::warn!("Photo request for {} was refused", frame.path.display());
            }
        }

        Ok(Self { config, scene, images, backend, camera, clock })
    }

    /// Advance by wall-clock time and draw.
    pub fn frame(&mut self) -> Result<()> {
        self.clock.tick();
        self.step()
    }

    /// Advance to an explicit elapsed time and draw.
    pub fn frame_at(&mut self, elapsed: Duration) -> Result<()> {
        self.clock.tick_at(elapsed);
        self.step()
    }

    fn step(&mut self) -> Result<()> {
        self.poll_assets();

        let Self { config, scene, backend, camera, clock, .. } = self;
        scene.animation.update(&mut scene.graph, clock);

        let uniform = FrameUniform::new(camera, &config.view, &config.sky.fog, clock.elapsed_secs());
        let items = scene.graph.flatten();
        backend.submit(&uniform, &items)
    }

    /// Apply whatever photo results have arrived. Failed photos keep their
    /// placeholder.
    pub fn poll_assets(&mut self) -> usize {
        let mut applied = 0;
        for result in self.images.poll() {
            match result {
                PhotoLoad::Loaded { id, width, height } => {
                    let Some(frame) = self.scene.photos.get_mut(id) else {
                        log::warn!("Photo result for unknown frame {}", id);
                        continue;
                    };
                    if frame.finalize(
                        &mut self.scene.graph,
                        &mut self.scene.slots,
                        &self.scene.foliage.profile,
                        &self.config.photos,
                        width,
                        height,
                    ) {
                        applied += 1;
                    }
                }
                PhotoLoad::Failed { path, message, .. } => {
                    log::error!("Failed to load photo {}: {}", path.display(), message);
                }
            }
        }
        applied
    }

    /// Viewport size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
        self.backend.resize(width, height);
    }

    pub fn report(&self) -> SceneReport {
        self.scene.report(self.config.seed)
    }

    pub fn scene(&self) -> &BuiltScene {
        &self.scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn images(&self) -> &S {
        &self.images
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
