//! Frame driver and demo scene assembly for the orrery.

pub mod engine;
pub mod solar;

pub use engine::{Engine, FrameError, NullRenderer, Renderer};
