//! The per-frame driver.
//!
//! [`Engine`] owns the simulation state and runs one frame at a time in a
//! fixed order that must not change:
//!
//! 1. drain async load completions (the only suspension point),
//! 2. apply key bindings and slider-driven configuration changes,
//! 3. scene-specific transform updates (the injected callback) and comet
//!    travel,
//! 4. draw,
//! 5. clock tick,
//! 6. camera update and craft sync,
//! 7. explosion mixer updates (skipped while paused),
//! 8. clear input transients.
//!
//! Mixer updates read the clock after it was advanced for this frame; the
//! camera update reads the pose produced by the previous frame. An error
//! from the scene-update callback or the renderer aborts the frame and halts
//! the loop — there is no automatic recovery.

use orrery_assets::{Completion, LoadTicket, ModelLoader};
use orrery_camera::{CameraRig, RigConfig};
use orrery_clock::SimulationClock;
use orrery_config::Config;
use orrery_input::{InputRouter, SliderBank};
use orrery_pool::{CometPool, PoolConfig};
use orrery_scene::{Entity, Scene, Transform};
use glam::Vec3;
use tracing::{error, info, trace};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A fault inside the per-frame callback chain. Halts scheduling.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The scene-update callback failed.
    #[error("scene update failed: {0}")]
    SceneUpdate(String),

    /// The draw call failed.
    #[error("draw failed: {0}")]
    Draw(String),
}

/// Issues one draw call per frame. Rendering internals live behind this seam.
pub trait Renderer {
    fn draw(&mut self, scene: &Scene, camera: &Transform) -> Result<(), FrameError>;
}

/// Renderer stub for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, scene: &Scene, camera: &Transform) -> Result<(), FrameError> {
        trace!(nodes = scene.len(), camera = ?camera.position, "draw");
        Ok(())
    }
}

/// Owns the clock, the camera rig, the input router, the scene, and the
/// comet pool, and drives them through the frame order.
pub struct Engine {
    clock: SimulationClock,
    rig: CameraRig,
    input: InputRouter,
    sliders: SliderBank,
    scene: Scene,
    pool: CometPool,
    loader: ModelLoader,
    craft_ticket: Option<LoadTicket>,
    ambient_brightness: f32,
    overlay_visible: bool,
    frame_count: u64,
}

impl Engine {
    /// Builds the engine from configuration and requests the craft model
    /// load. The comet pool starts converging toward its configured target
    /// immediately.
    pub fn new(config: &Config) -> Self {
        let clock = SimulationClock::new(config.clock.base_step);
        let rig = CameraRig::new(
            Transform {
                position: Vec3::from_array(config.camera.position),
                rotation: Vec3::from_array(config.camera.rotation),
                scale: Vec3::ONE,
            },
            RigConfig {
                offset_distance: config.camera.craft_offset,
                ..RigConfig::default()
            },
        );
        let pool_config = PoolConfig {
            spawn_half_width: config.comets.spawn_half_width,
            travel_bound: config.comets.travel_bound,
            collision_radius: config.comets.collision_radius,
            hazard_center: Vec3::from_array(config.comets.hazard_center),
            hazard_radius: config.comets.hazard_radius,
            model_path: config.comets.model.clone().into(),
            ..PoolConfig::default()
        };

        let mut loader = ModelLoader::new();
        let craft_ticket = Some(loader.load(&config.camera.craft_model));
        let mut scene = Scene::new();
        let mut pool = CometPool::new(pool_config);
        pool.set_target(config.comets.target_count, &mut scene, &mut loader);

        Self {
            clock,
            rig,
            input: InputRouter::new(),
            sliders: SliderBank::with_pool_offset(config.comets.pool_slider_offset),
            scene,
            pool,
            loader,
            craft_ticket,
            ambient_brightness: config.lighting.ambient_brightness,
            overlay_visible: config.debug.show_overlay,
            frame_count: 0,
        }
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn pool(&self) -> &CometPool {
        &self.pool
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn ambient_brightness(&self) -> f32 {
        self.ambient_brightness
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Host key-down event.
    pub fn key_down(&mut self, code: KeyCode) {
        self.input.on_key_down(PhysicalKey::Code(code));
    }

    /// Host key-up event.
    pub fn key_up(&mut self, code: KeyCode) {
        self.input.on_key_up(PhysicalKey::Code(code));
    }

    /// Host slider events land here.
    pub fn sliders_mut(&mut self) -> &mut SliderBank {
        &mut self.sliders
    }

    /// Runs one frame in the fixed order. The scene-update callback receives
    /// the scene and the driver value current for this frame.
    pub fn run_frame(
        &mut self,
        scene_update: &mut dyn FnMut(&mut Scene, f64) -> Result<(), FrameError>,
        renderer: &mut dyn Renderer,
    ) -> Result<(), FrameError> {
        let completions = self.loader.poll_completed();
        let unclaimed = self.pool.drain_loads(&mut self.scene, completions);
        self.finish_craft_load(unclaimed);

        self.apply_bindings();
        self.apply_sliders();

        scene_update(&mut self.scene, self.clock.driver_value())?;
        self.pool.update(&mut self.scene, self.clock.step_size());

        renderer.draw(&self.scene, &self.rig.pose)?;

        self.clock.tick();

        self.rig.update(&self.input);
        self.rig.sync_craft(&mut self.scene, &self.input);

        if !self.clock.is_paused() {
            self.pool.update_mixers(&mut self.scene, &mut self.loader);
        }

        self.input.clear_transients();
        self.frame_count += 1;
        Ok(())
    }

    /// Runs `frames` frames, halting on the first error.
    pub fn run(
        &mut self,
        frames: u64,
        scene_update: &mut dyn FnMut(&mut Scene, f64) -> Result<(), FrameError>,
        renderer: &mut dyn Renderer,
    ) -> Result<(), FrameError> {
        for _ in 0..frames {
            self.run_frame(scene_update, renderer)?;
        }
        Ok(())
    }

    fn finish_craft_load(&mut self, unclaimed: Vec<Completion>) {
        for completion in unclaimed {
            if Some(completion.ticket) != self.craft_ticket {
                trace!(ticket = ?completion.ticket, "dropping completion for forgotten slot");
                continue;
            }
            self.craft_ticket = None;
            match completion.result {
                Ok(model) => {
                    let scale = model.scale;
                    let entity = Entity::model("craft", model.name, model.clips)
                        .with_transform(Transform::default().with_uniform_scale(scale));
                    let node = self.scene.add(entity);
                    self.rig.register_craft(node);
                }
                Err(err) => {
                    // The craft slot stalls; piloting stays unavailable.
                    error!(error = %err, "craft model failed to load");
                }
            }
        }
    }

    /// Discrete key bindings: C toggles fly, Space toggles pause, B toggles
    /// craft-piloting, X toggles the settings overlay flag.
    fn apply_bindings(&mut self) {
        if self.input.just_pressed(PhysicalKey::Code(KeyCode::KeyC)) {
            self.rig.toggle_fly();
            info!(fly = self.rig.fly_enabled(), "fly toggled");
        }
        if self.input.just_pressed(PhysicalKey::Code(KeyCode::Space)) {
            self.clock.toggle_paused();
            info!(paused = self.clock.is_paused(), "pause toggled");
        }
        if self.input.just_pressed(PhysicalKey::Code(KeyCode::KeyB)) {
            self.rig.toggle_craft(&self.scene);
            info!(active = self.rig.craft_mode_active(), "craft piloting toggled");
        }
        if self.input.just_pressed(PhysicalKey::Code(KeyCode::KeyX)) {
            self.overlay_visible = !self.overlay_visible;
        }
    }

    fn apply_sliders(&mut self) {
        if let Some(factor) = self.sliders.take_speed_factor() {
            self.clock.set_step_scale(factor);
        }
        if let Some(target) = self.sliders.take_pool_target() {
            self.pool
                .set_target(target, &mut self.scene, &mut self.loader);
        }
        if let Some(brightness) = self.sliders.take_ambient_brightness() {
            self.ambient_brightness = brightness;
        }
    }
}
