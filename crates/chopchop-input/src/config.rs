//! Input configuration loaded from `~/.config/chopchop/input.ron`.
//!
//! Only tuning lives here. Bindings themselves are fixed by the client; this
//! file cannot remap actions.
//!
//! Example `input.ron`:
//! ```ron
//! (
//!     pointer_device_class: "Mouse",
//!     stick_deadzone: 0.2,
//!     mouse_sensitivity: 0.1,
//!     start_in_menu: true,
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Tunables for the router and the device bridge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Device name that marks camera-look input as coming from the pointer.
    pub pointer_device_class: String,
    /// Stick magnitude below which axis input reads as zero.
    pub stick_deadzone: f32,
    /// Scale applied to raw mouse deltas before they reach the router.
    pub mouse_sensitivity: f32,
    /// Open the pause menu on startup instead of dropping into gameplay.
    pub start_in_menu: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pointer_device_class: "Mouse".to_string(),
            stick_deadzone: 0.15,
            mouse_sensitivity: 1.0,
            start_in_menu: true,
        }
    }
}

/// Error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON encode error: {0}")]
    Encode(#[from] ron::Error),
}

impl InputConfig {
    /// Default config file path (`~/.config/chopchop/input.ron`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("chopchop").join("input.ron"))
    }

    /// Parse a config from RON text. Missing fields take defaults.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&text)?;
        tracing::debug!(path = %path.display(), "loaded input config");
        Ok(config)
    }

    /// Load from `path` (or the default location), falling back to defaults.
    ///
    /// A missing file is normal; a broken one is logged and ignored.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => {
                    tracing::info!("no config directory available, using default input config");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            tracing::info!(path = %path.display(), "input config not found, using defaults");
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load input config, using defaults");
                Self::default()
            }
        }
    }

    /// Serialize as pretty RON.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Zero out a stick value inside the deadzone.
    pub fn apply_deadzone(&self, value: glam::Vec2) -> glam::Vec2 {
        if value.length() < self.stick_deadzone {
            glam::Vec2::ZERO
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = InputConfig::from_ron("(stick_deadzone: 0.3)").unwrap();
        assert_eq!(config.stick_deadzone, 0.3);
        assert_eq!(config.pointer_device_class, "Mouse");
        assert!(config.start_in_menu);
    }

    #[test]
    fn test_invalid_ron_is_error() {
        let err = InputConfig::from_ron("(stick_deadzone: \"wide\")").unwrap_err();
        assert!(matches!(err, ConfigError::Ron(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.ron");
        let config = InputConfig {
            pointer_device_class: "Touchpad".into(),
            start_in_menu: false,
            ..Default::default()
        };
        std::fs::write(&path, config.to_ron().unwrap()).unwrap();

        assert_eq!(InputConfig::load(&path).unwrap(), config);
        assert_eq!(InputConfig::load_or_default(Some(&path)), config);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert_eq!(InputConfig::load_or_default(Some(&missing)), InputConfig::default());
        assert!(matches!(InputConfig::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.ron");
        std::fs::write(&broken, "(((").unwrap();
        assert_eq!(InputConfig::load_or_default(Some(&broken)), InputConfig::default());
    }

    #[test]
    fn test_deadzone() {
        let config = InputConfig::default();
        assert_eq!(config.apply_deadzone(glam::Vec2::new(0.1, 0.0)), glam::Vec2::ZERO);
        assert_eq!(config.apply_deadzone(glam::Vec2::new(0.5, 0.0)), glam::Vec2::new(0.5, 0.0));
    }
}
