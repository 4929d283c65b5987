//! Launcher configuration.
//!
//! Settings are read from a JSON file. Every field is optional; anything left
//! out takes its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};
use crate::render::Variant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub variant: Variant,
    /// Image used by the textured cube.
    pub texture: PathBuf,
    /// Render at this angle instead of animating.
    pub fixed_angle: Option<f32>,
    pub vsync: bool,
    /// A `log::LevelFilter` name such as `"info"` or `"debug"`.
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "cubescene".to_string(),
            width: 640,
            height: 480,
            variant: Variant::TexturedCube,
            texture: PathBuf::from("assets/cubetexture.png"),
            fixed_angle: None,
            vsync: true,
            log_level: "info".to_string(),
        }
    }
}

impl SceneConfig {
    /// Parses a config from JSON text.
    pub fn from_json(s: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Reads and parses the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SceneError::Config {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|cause| SceneError::Config {
            path: path.to_path_buf(),
            cause,
        })
    }

    /// `<config dir>/cubescene/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cubescene").join("config.json"))
    }

    /// Loads `explicit` if given, else the default path if it exists, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// The configured level, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SceneConfig::from_json("{}").unwrap(), SceneConfig::default());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = SceneConfig::from_json(
            r#"{ "variant": "colored_cube", "fixed_angle": 30.0, "width": 1280 }"#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::ColoredCube);
        assert_eq!(config.fixed_angle, Some(30.0));
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 480);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(SceneConfig::from_json(r#"{ "variant": "teapot" }"#).is_err());
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = SceneConfig::load(Path::new("no/such/config.json")).err().unwrap();
        assert!(matches!(err, SceneError::Config { .. }));
    }

    #[test]
    fn level_filter_parses_names() {
        let mut config = SceneConfig::default();
        config.log_level = "debug".to_string();
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
        config.log_level = "loud".to_string();
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }
}
