//! Scene entities: uniformly posed wrappers around either a procedural mesh
//! or an asynchronously loaded model, owning their one-shot animations.

use crate::mixer::{Clip, Mixer, MixerEvent};
use crate::transform::Transform;

/// Parameters of a procedurally generated sphere mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereMesh {
    /// Sphere radius in world units.
    pub radius: f32,
    /// Triangle segments per axis.
    pub segments: u32,
}

impl SphereMesh {
    pub fn new(radius: f32, segments: u32) -> Self {
        Self { radius, segments }
    }
}

/// What an entity looks like: a generated mesh or a loaded model root.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Sphere(SphereMesh),
    /// Root of a loaded model, identified by the model's internal name.
    Model { model_name: String },
}

/// A uniformly positioned/scaled scene object.
///
/// The visual root is exclusively owned: removing the entity from the scene
/// detaches the visual with it. Animation clips, if any, are owned by the
/// entity once attached and played through a one-shot [`Mixer`].
#[derive(Debug, Clone)]
pub struct Entity {
    /// Debug label; identity in the scene is the registry id, never this.
    pub label: String,
    pub transform: Transform,
    pub visual: Visual,
    clips: Vec<Clip>,
    mixer: Option<Mixer>,
}

impl Entity {
    /// Creates an entity around a procedural sphere mesh.
    pub fn sphere(label: impl Into<String>, mesh: SphereMesh) -> Self {
        Self {
            label: label.into(),
            transform: Transform::default(),
            visual: Visual::Sphere(mesh),
            clips: Vec::new(),
            mixer: None,
        }
    }

    /// Creates an entity around a loaded model root with its clip list.
    pub fn model(label: impl Into<String>, model_name: impl Into<String>, clips: Vec<Clip>) -> Self {
        Self {
            label: label.into(),
            transform: Transform::default(),
            visual: Visual::Model {
                model_name: model_name.into(),
            },
            clips,
            mixer: None,
        }
    }

    /// Sets the initial transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// The clips this entity owns.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Begins one-shot playback of every owned clip at the given
    /// clip-seconds-per-tick speed. Restarting an already-playing or
    /// finished mixer starts over from zero.
    pub fn start_one_shot(&mut self, speed: f32) {
        self.mixer = Some(Mixer::one_shot(self.clips.clone(), speed));
    }

    /// Advances the mixer by one tick, if playback is active.
    ///
    /// Returns [`MixerEvent::Completed`] exactly once, when the last clip
    /// finishes. Returns [`MixerEvent::Idle`] when nothing is playing.
    pub fn update_mixer(&mut self) -> MixerEvent {
        match &mut self.mixer {
            Some(mixer) => mixer.update(),
            None => MixerEvent::Idle,
        }
    }

    /// `true` while a one-shot playback is running.
    pub fn mixer_running(&self) -> bool {
        self.mixer.as_ref().is_some_and(|m| !m.is_finished())
    }
}
