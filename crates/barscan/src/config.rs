//! JSON configuration for a scan run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Resolution requested from the camera when nothing else is configured.
pub const DEFAULT_RESOLUTION: [u32; 2] = [1920, 1080];

/// Run settings that are not part of the per-frame pipeline.
///
/// Every field has a default, so `{}` is a valid config file. Command-line
/// flags override whatever the file says.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Camera index opened in live mode.
    pub camera_index: u32,
    /// Requested capture resolution, `[width, height]`.
    pub resolution: [u32; 2],
    /// Window title; the program name is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
    /// Never open a window.
    pub headless: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            resolution: DEFAULT_RESOLUTION,
            window_title: None,
            headless: false,
        }
    }
}

impl ScanConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [w, h] = self.resolution;
        if w == 0 || h == 0 {
            return Err(ConfigError::Invalid(format!(
                "resolution must be non-zero, got {w}x{h}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.json");
        fs::write(&path, "{}").expect("write");

        let cfg = ScanConfig::load_json(&path).expect("load");
        assert_eq!(cfg, ScanConfig::default());
        assert_eq!(cfg.resolution, [1920, 1080]);
    }

    #[test]
    fn write_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.json");
        let cfg = ScanConfig {
            camera_index: 2,
            resolution: [640, 480],
            window_title: Some("dock scanner".into()),
            headless: true,
        };
        cfg.write_json(&path).expect("write");
        assert_eq!(ScanConfig::load_json(&path).expect("load"), cfg);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.json");
        fs::write(&path, r#"{"resolution": [0, 720]}"#).expect("write");
        assert!(matches!(
            ScanConfig::load_json(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan.json");
        fs::write(&path, "{ camera_index: ").expect("write");
        assert!(matches!(ScanConfig::load_json(&path), Err(ConfigError::Json(_))));
        assert!(matches!(
            ScanConfig::load_json(dir.path().join("nope.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
