//! Frame-coherent key state for the input router.
//!
//! [`InputRouter`] is an explicit object handed by reference to the camera
//! rig and pool consumers — no ambient window-level listeners. It accumulates
//! discrete key-down/key-up events during a frame and answers, for any
//! physical key: is it held, did it transition this frame, and did the host's
//! auto-repeat re-trigger it this frame.
//!
//! Physical key codes are used throughout so movement keys work identically
//! regardless of keyboard layout.

use std::collections::HashSet;
use winit::keyboard::PhysicalKey;

/// Routes discrete key events into per-frame state consumed by the camera
/// rig and the simulation clock bindings.
///
/// # Usage
///
/// 1. Forward every host key event to [`on_key_down`](Self::on_key_down) /
///    [`on_key_up`](Self::on_key_up).
/// 2. Query with [`is_pressed`](Self::is_pressed),
///    [`just_pressed`](Self::just_pressed),
///    [`just_released`](Self::just_released),
///    [`retriggered`](Self::retriggered).
/// 3. Call [`clear_transients`](Self::clear_transients) at the end of each frame.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    pressed: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
    just_released: HashSet<PhysicalKey>,
    retriggered: HashSet<PhysicalKey>,
}

impl InputRouter {
    /// Creates a router with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a key-down event. A down event for a key that is already held
    /// is recorded as an auto-repeat re-trigger; the acceleration ramp in the
    /// camera rig feeds on those.
    pub fn on_key_down(&mut self, key: PhysicalKey) {
        if self.pressed.insert(key) {
            self.just_pressed.insert(key);
        } else {
            self.retriggered.insert(key);
        }
    }

    /// Handles a key-up event.
    pub fn on_key_up(&mut self, key: PhysicalKey) {
        self.pressed.remove(&key);
        self.just_released.insert(key);
    }

    /// `true` while the key is held.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    /// `true` only during the frame the key transitioned to pressed.
    #[must_use]
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key)
    }

    /// `true` only during the frame the key transitioned to released.
    #[must_use]
    pub fn just_released(&self, key: PhysicalKey) -> bool {
        self.just_released.contains(&key)
    }

    /// `true` if the host's auto-repeat re-fired a held key this frame.
    #[must_use]
    pub fn retriggered(&self, key: PhysicalKey) -> bool {
        self.retriggered.contains(&key)
    }

    /// `true` if a down event (initial press or auto-repeat) arrived for the
    /// key this frame.
    #[must_use]
    pub fn down_this_frame(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key) || self.retriggered.contains(&key)
    }

    /// Clears the per-frame transient sets. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.retriggered.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn key(code: KeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn test_initial_state_no_keys() {
        let router = InputRouter::new();
        for code in [KeyCode::KeyW, KeyCode::Space, KeyCode::KeyB] {
            assert!(!router.is_pressed(key(code)));
            assert!(!router.just_pressed(key(code)));
            assert!(!router.just_released(key(code)));
            assert!(!router.retriggered(key(code)));
        }
    }

    #[test]
    fn test_down_sets_pressed_and_transient() {
        let mut router = InputRouter::new();
        router.on_key_down(key(KeyCode::KeyW));
        assert!(router.is_pressed(key(KeyCode::KeyW)));
        assert!(router.just_pressed(key(KeyCode::KeyW)));
        assert!(router.down_this_frame(key(KeyCode::KeyW)));
    }

    #[test]
    fn test_up_clears_pressed() {
        let mut router = InputRouter::new();
        router.on_key_down(key(KeyCode::KeyW));
        router.on_key_up(key(KeyCode::KeyW));
        assert!(!router.is_pressed(key(KeyCode::KeyW)));
        assert!(router.just_released(key(KeyCode::KeyW)));
    }

    #[test]
    fn test_transients_last_one_frame() {
        let mut router = InputRouter::new();
        router.on_key_down(key(KeyCode::Space));
        router.clear_transients();
        assert!(!router.just_pressed(key(KeyCode::Space)));
        assert!(router.is_pressed(key(KeyCode::Space)));
    }

    #[test]
    fn test_repeat_down_is_a_retrigger() {
        let mut router = InputRouter::new();
        router.on_key_down(key(KeyCode::KeyW));
        router.clear_transients();
        router.on_key_down(key(KeyCode::KeyW));
        assert!(!router.just_pressed(key(KeyCode::KeyW)));
        assert!(router.retriggered(key(KeyCode::KeyW)));
        assert!(router.down_this_frame(key(KeyCode::KeyW)));
    }

    #[test]
    fn test_keys_tracked_independently() {
        let mut router = InputRouter::new();
        router.on_key_down(key(KeyCode::KeyW));
        router.on_key_down(key(KeyCode::KeyD));
        router.on_key_up(key(KeyCode::KeyW));
        assert!(!router.is_pressed(key(KeyCode::KeyW)));
        assert!(router.is_pressed(key(KeyCode::KeyD)));
        assert!(router.just_released(key(KeyCode::KeyW)));
    }
}
