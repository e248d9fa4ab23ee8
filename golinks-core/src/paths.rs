//! Default path resolution for the settings file
//!
//! Uses XDG Base Directory specification when available, with a sensible
//! fallback.

use std::path::PathBuf;

/// Returns the default path for the settings file.
///
/// Uses XDG config directory if available:
/// - Linux/macOS: `~/.config/golinks/settings.toml`
/// - Fallback: `/etc/golinks/settings.toml`
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("golinks")
        .join("settings.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_path_is_toml() {
        let path = default_settings_path();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("toml"));
        assert!(path.ends_with("golinks/settings.toml"));
    }
}
