//! Sources for the active theme name, consulted only when a caller omits one.

use std::env;

use crate::config::Settings;

/// Environment variable naming the active theme
pub const THEME_ENV_VAR: &str = "THEMEPAL_THEME";

/// Something that can name the currently active theme
pub trait ActiveThemeSource {
    /// Name of the active theme, or `None` if it cannot be determined
    fn active_theme(&self) -> Option<String>;
}

impl<F> ActiveThemeSource for F
where
    F: Fn() -> Option<String>,
{
    fn active_theme(&self) -> Option<String> {
        self()
    }
}

/// Source that never resolves a theme
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActiveTheme;

impl ActiveThemeSource for NoActiveTheme {
    fn active_theme(&self) -> Option<String> {
        None
    }
}

/// Reads the active theme from an environment variable
#[derive(Debug, Clone)]
pub struct EnvThemeSource {
    var: String,
}

impl EnvThemeSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvThemeSource {
    fn default() -> Self {
        Self::new(THEME_ENV_VAR)
    }
}

impl ActiveThemeSource for EnvThemeSource {
    fn active_theme(&self) -> Option<String> {
        env::var(&self.var).ok()
    }
}

impl ActiveThemeSource for Settings {
    fn active_theme(&self) -> Option<String> {
        self.theme.name.clone()
    }
}

/// Tries each source in order; the first non-blank name wins
#[derive(Default)]
pub struct ThemeSourceChain {
    sources: Vec<Box<dyn ActiveThemeSource>>,
}

impl ThemeSourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl ActiveThemeSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// `THEMEPAL_THEME`, then `theme.name` from the settings file
    pub fn standard() -> Self {
        Self::new()
            .with(EnvThemeSource::default())
            .with(|| Settings::load().theme.name)
    }
}

impl ActiveThemeSource for ThemeSourceChain {
    fn active_theme(&self) -> Option<String> {
        self.sources.iter().find_map(|source| {
            source
                .active_theme()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
        })
    }
}
