//! Scene graph collaborator: stable-id node registry, uniform transforms,
//! entities wrapping procedural meshes or loaded models, and one-shot
//! animation playback.

mod entity;
mod mixer;
mod scene;
mod transform;

pub use entity::{Entity, SphereMesh, Visual};
pub use mixer::{Clip, Mixer, MixerEvent};
pub use scene::{NodeId, Scene};
pub use transform::Transform;
