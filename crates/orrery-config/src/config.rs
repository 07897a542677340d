//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level scene configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Clock settings.
    pub clock: ClockConfig,
    /// Camera rig settings.
    pub camera: CameraConfig,
    /// Comet field settings.
    pub comets: CometConfig,
    /// Lighting settings.
    pub lighting: LightingConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Driver increment per tick before slider scaling.
    pub base_step: f64,
}

/// Camera rig configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial camera position.
    pub position: [f32; 3],
    /// Initial camera Euler rotation in radians.
    pub rotation: [f32; 3],
    /// Distance the piloted craft sits ahead of the camera.
    pub craft_offset: f32,
    /// Path to the craft model descriptor.
    pub craft_model: String,
}

/// Comet field configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CometConfig {
    /// Pool target count at startup.
    pub target_count: usize,
    /// Half-width of the spawn cube centered on the origin.
    pub spawn_half_width: f32,
    /// Recycle bound for ballistic travel.
    pub travel_bound: f32,
    /// Collision radius against the hazard sphere.
    pub collision_radius: f32,
    /// Center of the hazard sphere comets are aimed toward.
    pub hazard_center: [f32; 3],
    /// Radius of the hazard sphere.
    pub hazard_radius: f32,
    /// Additive offset applied to the pool-count slider after its power
    /// curve (the minimum member count the slider can request).
    pub pool_slider_offset: f64,
    /// Path to the comet model descriptor.
    pub model: String,
}

/// Lighting configuration for the external lighting collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient light intensity at startup.
    pub ambient_brightness: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Show the settings overlay at startup.
    pub show_overlay: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for ClockConfig {
    fn default() -> Self {
        Self { base_step: 0.005 }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [70.0, 10.0, 40.0],
            rotation: [0.0, 0.1, 0.0],
            craft_offset: 10.0,
            craft_model: "assets/craft.ron".to_string(),
        }
    }
}

impl Default for CometConfig {
    fn default() -> Self {
        Self {
            target_count: 20,
            spawn_half_width: 250.0,
            travel_bound: 300.0,
            collision_radius: 5.0,
            hazard_center: [55.0, 0.0, -100.0],
            hazard_radius: 50.0,
            pool_slider_offset: 0.0,
            model: "assets/comet.ron".to_string(),
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 1.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_overlay: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("target_count: 20"));
        assert!(ron_str.contains("base_step: 0.005"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(camera: (), comets: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.clock, ClockConfig::default());
        assert_eq!(config.lighting, LightingConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.comets.target_count = 50;
        config.camera.position = [0.0, 5.0, 80.0];

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.lighting.ambient_brightness = 16.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().lighting.ambient_brightness, 16.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
