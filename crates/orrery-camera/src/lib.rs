//! Flight-style camera rig with an acceleration ramp and a craft-piloting
//! mode that derives a piloted entity's pose from the camera every frame.
//!
//! The rig owns the camera pose and two orthogonal toggles: `fly_enabled`
//! (free navigation on WASD) and `craft_mode_active` (a secondary visual is
//! re-parented to the camera's forward vector). The paused flag lives on the
//! simulation clock, not here.

use std::f32::consts::PI;

use glam::Vec3;
use orrery_input::InputRouter;
use orrery_scene::{NodeId, Scene, Transform};
use tracing::{info, warn};
use winit::keyboard::{KeyCode, PhysicalKey};

const MOVEMENT_KEYS: [KeyCode; 4] = [KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyA, KeyCode::KeyD];

fn key(code: KeyCode) -> PhysicalKey {
    PhysicalKey::Code(code)
}

/// Tuning knobs for the rig.
#[derive(Debug, Clone)]
pub struct RigConfig {
    /// Acceleration factor floor, restored on movement-key release.
    pub base_acceleration: f32,
    /// Ramp constant for the held-key growth curve.
    pub ramp_constant: f32,
    /// Position step for arrow-key manual overrides while not flying.
    pub manual_nudge: f32,
    /// Distance the piloted craft sits ahead of the camera.
    pub offset_distance: f32,
    /// Flip the craft's yaw by half a turn so a forward-facing model points
    /// along the camera's view direction.
    pub craft_yaw_flip: bool,
    /// Pitch/yaw feedback added while a directional key is held, in radians.
    pub steer_offset: f32,
    /// Camera snap offset behind/above the craft on activation.
    pub activation_offset: Vec3,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            base_acceleration: 1.0,
            ramp_constant: 0.05,
            manual_nudge: 1.0,
            offset_distance: 10.0,
            craft_yaw_flip: true,
            steer_offset: 0.3,
            activation_offset: Vec3::new(0.0, 10.0, 30.0),
        }
    }
}

/// Camera pose, free-fly navigation, and craft-piloting state machine.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Camera pose. Mutated by navigation and by manual overrides.
    pub pose: Transform,
    fly_enabled: bool,
    craft_mode_active: bool,
    craft_node: Option<NodeId>,
    acceleration_factor: f32,
    config: RigConfig,
}

impl CameraRig {
    pub fn new(pose: Transform, config: RigConfig) -> Self {
        let acceleration_factor = config.base_acceleration;
        Self {
            pose,
            fly_enabled: false,
            craft_mode_active: false,
            craft_node: None,
            acceleration_factor,
            config,
        }
    }

    pub fn fly_enabled(&self) -> bool {
        self.fly_enabled
    }

    pub fn craft_mode_active(&self) -> bool {
        self.craft_mode_active
    }

    pub fn acceleration_factor(&self) -> f32 {
        self.acceleration_factor
    }

    /// Registers the piloted entity by its stable scene id. Called once the
    /// craft model has finished loading; idempotent.
    pub fn register_craft(&mut self, node: NodeId) {
        info!(?node, "craft registered with camera rig");
        self.craft_node = Some(node);
    }

    /// `true` once a piloted entity has been registered.
    pub fn craft_registered(&self) -> bool {
        self.craft_node.is_some()
    }

    /// Flips free-fly navigation. The toggle itself never moves the camera.
    pub fn toggle_fly(&mut self) {
        self.fly_enabled = !self.fly_enabled;
    }

    /// Toggles craft-piloting.
    ///
    /// Activation requires a registered, still-live craft node; otherwise it
    /// is a warned no-op (never an aliased fallback to another entity).
    /// Successful activation forces flying on and snaps the camera to a
    /// chase position behind the craft.
    pub fn toggle_craft(&mut self, scene: &Scene) {
        if self.craft_mode_active {
            self.craft_mode_active = false;
            return;
        }
        let Some(node) = self.craft_node else {
            warn!("craft activation ignored: no craft registered yet");
            return;
        };
        let Some(craft) = scene.get(node) else {
            warn!(?node, "craft activation ignored: registered node no longer in scene");
            return;
        };
        self.craft_mode_active = true;
        self.fly_enabled = true;
        self.pose.position = craft.transform.position + self.config.activation_offset;
    }

    /// Per-frame input processing: the acceleration ramp, free-fly
    /// navigation while flying, and arrow-key manual overrides while not.
    pub fn update(&mut self, input: &InputRouter) {
        self.update_acceleration(input);
        if self.fly_enabled {
            self.navigate(input);
        } else {
            self.manual_overrides(input);
        }
    }

    /// Held-key acceleration ramp. Every key-down re-trigger (the host's
    /// auto-repeat) applies `base * (10 / accel) * ramp`; the division makes
    /// growth sub-linear, so sustained thrust approaches a ceiling instead
    /// of running away. Releasing the last movement key resets to base.
    fn update_acceleration(&mut self, input: &InputRouter) {
        for code in MOVEMENT_KEYS {
            if input.down_this_frame(key(code)) {
                self.acceleration_factor += self.config.base_acceleration
                    * (10.0 / self.acceleration_factor)
                    * self.config.ramp_constant;
            }
        }
        let any_held = MOVEMENT_KEYS.iter().any(|&c| input.is_pressed(key(c)));
        let any_released = MOVEMENT_KEYS.iter().any(|&c| input.just_released(key(c)));
        if any_released && !any_held {
            self.acceleration_factor = self.config.base_acceleration;
        }
    }

    fn navigate(&mut self, input: &InputRouter) {
        let forward = self.pose.forward();
        let right = self.pose.orientation() * Vec3::X;

        let mut dir = Vec3::ZERO;
        if input.is_pressed(key(KeyCode::KeyW)) {
            dir += forward;
        }
        if input.is_pressed(key(KeyCode::KeyS)) {
            dir -= forward;
        }
        if input.is_pressed(key(KeyCode::KeyD)) {
            dir += right;
        }
        if input.is_pressed(key(KeyCode::KeyA)) {
            dir -= right;
        }
        if dir.length_squared() > 1e-6 {
            // The ramped factor is the movement-speed parameter.
            self.pose.position += dir.normalize() * self.acceleration_factor;
        }
    }

    /// Arrow-key position nudges that stay live while navigation is
    /// suspended.
    fn manual_overrides(&mut self, input: &InputRouter) {
        let nudge = self.config.manual_nudge;
        if input.is_pressed(key(KeyCode::ArrowUp)) {
            self.pose.position.y += nudge;
        }
        if input.is_pressed(key(KeyCode::ArrowDown)) {
            self.pose.position.y -= nudge;
        }
        if input.is_pressed(key(KeyCode::ArrowRight)) {
            self.pose.position.x += nudge;
        }
        if input.is_pressed(key(KeyCode::ArrowLeft)) {
            self.pose.position.x -= nudge;
        }
    }

    /// Re-derives the piloted entity's pose from the camera. Runs on every
    /// camera change while craft mode is active; the craft's pose is never
    /// set independently.
    ///
    /// Position: `camera + forward * offset_distance`. Rotation: a fresh
    /// copy of the camera rotation (optionally yaw-flipped), plus steering
    /// feedback of ±`steer_offset` radians while a directional key is held —
    /// snapping back the moment the key is released, because the copy is
    /// recomputed from scratch each time.
    pub fn sync_craft(&mut self, scene: &mut Scene, input: &InputRouter) {
        if !self.craft_mode_active {
            return;
        }
        let Some(node) = self.craft_node else {
            return;
        };
        let forward = self.pose.forward();
        let Some(craft) = scene.get_mut(node) else {
            // The piloted visual was severed from the scene (pool shrink,
            // teardown); piloting stops rather than touching a stale slot.
            warn!(?node, "piloted craft left the scene; deactivating craft mode");
            self.craft_mode_active = false;
            return;
        };

        craft.transform.position = self.pose.position + forward * self.config.offset_distance;

        let mut rotation = self.pose.rotation;
        if self.config.craft_yaw_flip {
            rotation.y += PI;
        }
        let steer = self.config.steer_offset;
        if input.is_pressed(key(KeyCode::KeyW)) {
            rotation.x -= steer;
        }
        if input.is_pressed(key(KeyCode::KeyS)) {
            rotation.x += steer;
        }
        if input.is_pressed(key(KeyCode::KeyA)) {
            rotation.y += steer;
        }
        if input.is_pressed(key(KeyCode::KeyD)) {
            rotation.y -= steer;
        }
        craft.transform.rotation = rotation;
    }
}
