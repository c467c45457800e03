use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Palette for theme '{theme}' has at most {max} colors")]
    PaletteTooSmall { theme: String, max: usize },

    #[error("No theme specified and no active theme could be resolved")]
    NoThemeSpecified,

    #[error("Fade must be within [0, 1], got {0}")]
    InvalidFade(f64),

    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("Corrupt theme table: {0}")]
    CorruptTable(String),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
