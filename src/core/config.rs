//! Session configuration
//!
//! [`SessionConfig`] is read from `config.json` in the user's configuration
//! directory. Like the storage slot, a missing or broken file never stops the
//! board from starting: load failures are logged and defaults are used.

use crate::core::error::{CoreError, CoreResult};
use crate::game::types::{PieceColor, PieceType};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Config filename
const CONFIG_FILENAME: &str = "config.json";

/// Default name of the persisted session slot
pub const DEFAULT_STORAGE_KEY: &str = "chess-session";

/// Settings for a board session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the storage slot the session persists into
    pub storage_key: String,

    /// Piece used when a drag completes a move without asking
    pub default_promotion: PieceType,

    /// Whether to highlight the reachable squares of the selected piece
    pub show_hints: bool,

    /// Whether to highlight the from/to squares of the last move
    pub highlight_last_move: bool,

    /// Side drawn at the bottom of the board
    pub orientation: PieceColor,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_promotion: PieceType::Queen,
            show_hints: true,
            highlight_last_move: true,
            orientation: PieceColor::White,
        }
    }
}

impl SessionConfig {
    /// Path of `config.json` in the user's configuration directory
    ///
    /// Falls back to a local `config.json` if the system config dir cannot be found.
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("com", "trilltino", "xfboard") {
            Some(dirs) => dirs.config_dir().join(CONFIG_FILENAME),
            None => PathBuf::from(CONFIG_FILENAME),
        }
    }

    /// Load from [`SessionConfig::default_path`]
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`, using defaults if the file is missing, unreadable or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("[CONFIG] No config file at {:?}. Using defaults.", path);
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("[CONFIG] Failed to read {:?}: {}. Using defaults.", path, e);
                return Self::default();
            }
        };

        match Self::from_json(&contents) {
            Ok(config) => {
                info!("[CONFIG] Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("[CONFIG] Rejected {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    /// Parse and validate a JSON document; absent fields take their defaults
    pub fn from_json(contents: &str) -> CoreResult<Self> {
        let config: SessionConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(CoreError::Config {
                message: "storage_key must not be empty".to_string(),
            });
        }
        if !self.default_promotion.is_promotion_choice() {
            return Err(CoreError::Config {
                message: format!("cannot promote to {:?}", self.default_promotion),
            });
        }
        Ok(())
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    error!("[CONFIG] Failed to create config directory {:?}: {}", parent, e);
                    return Err(e.into());
                }
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("[CONFIG] Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.storage_key, "chess-session");
        assert_eq!(config.default_promotion, PieceType::Queen);
        assert!(config.show_hints);
        assert!(config.highlight_last_move);
        assert_eq!(config.orientation, PieceColor::White);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        //! Missing keys fall back to their defaults instead of failing the parse
        let config =
            SessionConfig::from_json(r#"{"default_promotion":"knight","orientation":"black"}"#)
                .unwrap();
        assert_eq!(config.default_promotion, PieceType::Knight);
        assert_eq!(config.orientation, PieceColor::Black);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_invalid_promotion_rejected() {
        let result = SessionConfig::from_json(r#"{"default_promotion":"king"}"#);
        assert!(matches!(result, Err(CoreError::Config { .. })));
    }

    #[test]
    fn test_load_from_missing_or_broken_file() {
        let dir = std::env::temp_dir().join(format!("xfboard-config-{}", std::process::id()));
        let path = dir.join("config.json");

        assert_eq!(SessionConfig::load_from(&path), SessionConfig::default());

        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(SessionConfig::load_from(&path), SessionConfig::default());

        let custom = SessionConfig {
            show_hints: false,
            ..SessionConfig::default()
        };
        custom.save_to(&path).unwrap();
        assert_eq!(SessionConfig::load_from(&path), custom);

        let _ = fs::remove_dir_all(&dir);
    }
}
