//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Orrery scene engine")]
pub struct CliArgs {
    /// Comet pool target count.
    #[arg(long)]
    pub comets: Option<usize>,

    /// Ambient light brightness.
    #[arg(long)]
    pub ambient: Option<f32>,

    /// Clock base step per tick.
    #[arg(long)]
    pub base_step: Option<f64>,

    /// Spawn cube half-width.
    #[arg(long)]
    pub spawn_half_width: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(count) = args.comets {
            self.comets.target_count = count;
        }
        if let Some(ambient) = args.ambient {
            self.lighting.ambient_brightness = ambient;
        }
        if let Some(step) = args.base_step {
            self.clock.base_step = step;
        }
        if let Some(hw) = args.spawn_half_width {
            self.comets.spawn_half_width = hw;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            comets: Some(40),
            ambient: Some(2.0),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.comets.target_count, 40);
        assert_eq!(config.lighting.ambient_brightness, 2.0);
        assert_eq!(config.debug.log_level, "debug");
        // Untouched fields keep their defaults.
        assert_eq!(config.clock.base_step, 0.005);
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_args_parse_from_flags() {
        let args = CliArgs::parse_from(["orrery", "--comets", "25", "--base-step", "0.01"]);
        assert_eq!(args.comets, Some(25));
        assert_eq!(args.base_step, Some(0.01));
        assert!(args.log_level.is_none());
    }
}
