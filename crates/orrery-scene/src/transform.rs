//! Uniform pose for every scene object.

use glam::{EulerRot, Quat, Vec3};

/// Position, Euler rotation, and per-axis scale of a scene object.
///
/// Rotation is stored as intrinsic Y-X-Z Euler angles in radians, matching
/// how the camera rig and the orbit animations write it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Euler angles in radians (applied Y, then X, then Z).
    pub rotation: Vec3,
    /// Per-axis scale. `Vec3::ONE` is unscaled.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a transform at `position` with default rotation and scale.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets a uniform scale on all three axes.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// The rotation as a quaternion.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        )
    }

    /// The unit forward vector (-Z rotated by the current orientation).
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity_pose() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert!((t.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_yaw_half_turn_flips_forward() {
        let mut t = Transform::default();
        t.rotation.y = std::f32::consts::PI;
        assert!((t.forward() - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_uniform_scale_builder() {
        let t = Transform::at(Vec3::new(1.0, 2.0, 3.0)).with_uniform_scale(100.0);
        assert_eq!(t.scale, Vec3::splat(100.0));
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
