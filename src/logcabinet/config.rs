use crate::error::{CabinetError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// User configuration for the `lcab` front end, stored in `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CabinetConfig {
    /// Parent directory cabinets are created in when no `--root` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Whether sheets created from the command line sync on every entry
    #[serde(default)]
    pub auto_sync: bool,
}

impl CabinetConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CabinetError::Io)?;
        let config: CabinetConfig =
            serde_json::from_str(&content).map_err(CabinetError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir).map_err(CabinetError::Io)?;

        let content = serde_json::to_string_pretty(self).map_err(CabinetError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(CabinetError::Io)?;
        Ok(())
    }

    /// Set a value by its command-line key (`root` or `auto-sync`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "root" => {
                self.root = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "auto-sync" => {
                self.auto_sync = parse_bool(value)?;
            }
            other => {
                return Err(CabinetError::strategy(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    /// Render a value by its command-line key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "root" => Ok(self
                .root
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            "auto-sync" => Ok(self.auto_sync.to_string()),
            other => Err(CabinetError::strategy(format!(
                "Unknown config key: {}",
                other
            ))),
        }
    }
}

pub const CONFIG_KEYS: &[&str] = &["root", "auto-sync"];

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(CabinetError::strategy(format!(
            "Expected true or false, got '{}'",
            value
        ))),
    }
}
