use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::palette::ThemeTable;

/// Theme settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Active theme used when a caller does not name one
    #[serde(default)]
    pub name: Option<String>,
}

/// Preview (color strip) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSettings {
    #[serde(default = "default_true")]
    pub show_ribbon: bool,
    #[serde(default = "default_true")]
    pub show_hex: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            show_ribbon: default_true(),
            show_hex: default_true(),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
    /// Optional theme table replacing the bundled one.
    /// Same format as the bundled asset: [{"theme", "rule", "value"}, ...]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_path: Option<String>,
}

impl Settings {
    /// Returns the config directory path (~/.themepal)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".themepal"))
    }

    /// Returns the config file path (~/.themepal/settings.json)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Loads settings from the config file, returns default if not found or invalid
    pub fn load() -> Self {
        match Self::load_with_error() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!("using default settings: {}", e);
                Self::default()
            }
        }
    }

    /// Loads settings from the config file with error information
    /// Returns Ok(settings) on success, Err(error_message) on failure
    pub fn load_with_error() -> std::result::Result<Self, String> {
        let config_path = Self::config_path()
            .ok_or_else(|| "Could not determine config path".to_string())?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> std::result::Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in settings.json: {}", e))
    }

    /// Saves settings to the config file using atomic write pattern
    pub fn save(&self) -> io::Result<()> {
        let Some(config_dir) = Self::config_dir() else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            ));
        };

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
            // Set directory permissions to user-only on Unix
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = fs::Permissions::from_mode(0o700);
                let _ = fs::set_permissions(&config_dir, perms);
            }
        }

        self.save_to(&config_dir.join("settings.json"))
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let temp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(self)?;

        // Atomic write: write to temp file first, then rename
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Custom table from `table_path`, if one is configured.
    /// Relative paths are resolved against the config directory.
    pub fn custom_table(&self) -> Option<Result<ThemeTable>> {
        let raw = self.table_path.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        let mut path = PathBuf::from(raw);
        if path.is_relative() {
            if let Some(dir) = Self::config_dir() {
                path = dir.join(path);
            }
        }

        let result = ThemeTable::from_path(&path);
        if let Err(e) = &result {
            tracing::warn!(path = %path.display(), "custom theme table rejected: {}", e);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme.name, None);
        assert!(settings.preview.show_ribbon);
        assert!(settings.preview.show_hex);
        assert!(settings.table_path.is_none());
        assert!(settings.custom_table().is_none());
    }

    #[test]
    fn test_parse_partial_json() {
        let json = r#"{"theme":{"name":"Monokai"},"preview":{"show_hex":false}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.theme.name.as_deref(), Some("Monokai"));
        assert!(settings.preview.show_ribbon);
        assert!(!settings.preview.show_hex);
    }

    #[test]
    fn test_parse_empty_object() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.theme.name, None);
        assert!(settings.preview.show_ribbon);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.theme.name = Some("Tomorrow Night".to_string());
        settings.preview.show_ribbon = false;
        settings.save_to(&path).unwrap();

        assert!(!dir.path().join("settings.json.tmp").exists());
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.theme.name.as_deref(), Some("Tomorrow Night"));
        assert!(!loaded.preview.show_ribbon);
        assert!(loaded.preview.show_hex);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.contains("Invalid JSON"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.contains("Failed to read"));
    }

    #[test]
    fn test_custom_table_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        fs::write(
            &path,
            r##"[{"theme":"Mine","rule":"background","value":"#000000"},
                 {"theme":"Mine","rule":"base_text","value":"#FFFFFF"}]"##,
        )
        .unwrap();

        let settings = Settings {
            table_path: Some(path.display().to_string()),
            ..Settings::default()
        };
        let table = settings.custom_table().unwrap().unwrap();
        assert_eq!(table.list_themes(), vec!["Mine"]);
    }

    #[test]
    fn test_custom_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            table_path: Some(dir.path().join("nope.json").display().to_string()),
            ..Settings::default()
        };
        assert!(settings.custom_table().unwrap().is_err());
    }
}
