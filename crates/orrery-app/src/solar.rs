//! The demo solar scene: a hazard planet, two orbiting moons, and their
//! per-frame transform updates driven by the clock's driver value.

use std::f32::consts::PI;

use glam::Vec3;
use orrery_scene::{Entity, NodeId, Scene, SphereMesh, Transform};

use crate::engine::FrameError;

/// Stable ids of the demo bodies.
#[derive(Debug, Clone, Copy)]
pub struct SolarBodies {
    pub mars: NodeId,
    pub moon: NodeId,
    pub io: NodeId,
}

/// Builds the demo bodies. Mars doubles as the comet hazard sphere, so its
/// placement must match the pool's hazard configuration.
pub fn build(scene: &mut Scene) -> SolarBodies {
    let mars = scene.add(
        Entity::sphere("mars", SphereMesh::new(50.0, 64))
            .with_transform(Transform::at(Vec3::new(55.0, 0.0, -100.0))),
    );
    let moon = scene.add(
        Entity::sphere("moon", SphereMesh::new(5.0, 64))
            .with_transform(Transform::at(Vec3::new(35.0, 0.0, -50.0))),
    );
    let io = scene.add(
        Entity::sphere("io", SphereMesh::new(1.0, 64))
            .with_transform(Transform::at(Vec3::new(55.0, 0.0, -100.0))),
    );
    SolarBodies { mars, moon, io }
}

/// Per-frame orbit and self-rotation updates.
///
/// The moon circles Mars in the XZ plane with period `2π / (π/5)`; Io rides
/// a faster, slightly precessing epicycle. A missing body is a fault: these
/// nodes are owned by the demo and must outlive the loop.
pub fn update(bodies: &SolarBodies, scene: &mut Scene, driver: f64) -> Result<(), FrameError> {
    let t = driver as f32;

    let mars_position = {
        let mars = scene
            .get_mut(bodies.mars)
            .ok_or_else(|| FrameError::SceneUpdate("mars left the scene".to_string()))?;
        mars.transform.rotation.y = t / 5.0;
        mars.transform.position
    };

    let moon = scene
        .get_mut(bodies.moon)
        .ok_or_else(|| FrameError::SceneUpdate("moon left the scene".to_string()))?;
    moon.transform.rotation.x = t * 2.0;
    moon.transform.position = mars_position
        + Vec3::new(
            (PI * t / 5.0).sin() * 80.0,
            0.0,
            (PI * t / 5.0).cos() * 80.0,
        );

    let alpha = PI * t * 3.0;
    let beta = PI * t * 0.05;
    let io = scene
        .get_mut(bodies.io)
        .ok_or_else(|| FrameError::SceneUpdate("io left the scene".to_string()))?;
    io.transform.position = mars_position
        + Vec3::new(
            alpha.cos() * 58.0,
            beta.sin() * alpha.sin() * 58.0,
            beta.cos() * alpha.sin() * 58.0,
        );

    Ok(())
}
