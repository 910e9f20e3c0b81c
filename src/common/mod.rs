use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

/// Directory holding the plugin binary and the files shipped next to it
/// (`mailconfig.json`, `sendmail.ps1`, `settings.json`).
pub fn plugin_dir() -> &'static Path {
    static DIR: Lazy<PathBuf> = Lazy::new(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    DIR.as_path()
}
