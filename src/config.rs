use anyhow::Result;
use replanter_world::ReplantToggles;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/replanter.toml";

/// On-disk driver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplanterConfig {
    /// Which replant paths are active. Read once at startup.
    pub replanter: ReplantToggles,
}

impl ReplanterConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ReplanterConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ReplanterConfig::default()
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    warn!(
                        "Replanter config not found at {}. Using defaults",
                        path.display()
                    );
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                ReplanterConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn toggles(&self) -> ReplantToggles {
        self.replanter
    }
}
