//! Engine settings, stored as JSON

use crate::color::{Pixel, BLACK};
use crate::display::EdgePolicy;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 900;

/// Window and frame buffer settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    /// Logical bitmap size, also the initial window size
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub start_fullscreen: bool,
    /// Color the logical buffer is cleared to before each frame
    pub clear_color: Pixel,
    pub edge_policy: EdgePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "rasterbox".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            start_fullscreen: false,
            clear_color: BLACK,
            edge_policy: EdgePolicy::Inclusive,
        }
    }
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "width": 960, "edge_policy": "skip_origin" }"#).unwrap();
        assert_eq!(config.width, 960);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.edge_policy, EdgePolicy::SkipOrigin);
        assert!(config.vsync);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("rasterbox-config-{}.json", std::process::id()));
        let config = EngineConfig {
            title: "maze".into(),
            clear_color: 0x333333,
            start_fullscreen: true,
            ..EngineConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_errors() {
        let missing = EngineConfig::load("/nonexistent/rasterbox.json").unwrap_err();
        assert!(matches!(missing, EngineError::Io(_)));

        let path = std::env::temp_dir().join(format!("rasterbox-bad-{}.json", std::process::id()));
        fs::write(&path, "{ width: ").unwrap();
        let bad = EngineConfig::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(bad, EngineError::Config(_)));
    }
}
