//! Configuration system for the orrery scene.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, ClockConfig, CometConfig, Config, DebugConfig, LightingConfig,
};
pub use error::ConfigError;
