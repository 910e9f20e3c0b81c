use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// When enabled the plugin initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write logs to this file instead of stderr. Relative paths are resolved
    /// against the directory of the settings file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut settings: Self = serde_json::from_str(&content)?;
        if let (Some(file), Some(base)) = (&settings.log_file, path.parent()) {
            if file.is_relative() {
                settings.log_file = Some(base.join(file));
            }
        }
        Ok(settings)
    }
}
