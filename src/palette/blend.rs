use std::borrow::Cow;

use super::builder::{resolve_theme, Palette};
use super::color::Rgb;
use super::table::ThemeTable;
use crate::active::ActiveThemeSource;
use crate::error::{PaletteError, Result};

/// What a blend is computed from
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteSource {
    /// An already built palette
    Built(Palette),
    /// A theme to build the palette from
    ThemeName(String),
    /// Ask the active-theme source
    Unspecified,
}

impl From<Palette> for PaletteSource {
    fn from(palette: Palette) -> Self {
        PaletteSource::Built(palette)
    }
}

impl From<&str> for PaletteSource {
    fn from(name: &str) -> Self {
        PaletteSource::ThemeName(name.to_string())
    }
}

impl From<String> for PaletteSource {
    fn from(name: String) -> Self {
        PaletteSource::ThemeName(name)
    }
}

impl From<Option<&str>> for PaletteSource {
    fn from(name: Option<&str>) -> Self {
        name.map_or(PaletteSource::Unspecified, PaletteSource::from)
    }
}

/// Reject fades outside [0, 1] (NaN included)
pub fn check_fade(fade: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&fade) {
        Ok(fade)
    } else {
        Err(PaletteError::InvalidFade(fade))
    }
}

/// `from * (1 - fade) + to * fade` for two hex colors
pub fn blend_hex(from: &str, to: &str, fade: f64) -> Result<String> {
    let fade = check_fade(fade)?;
    Ok(Rgb::parse(from)?.mix(Rgb::parse(to)?, fade).to_hex())
}

impl ThemeTable {
    /// Turn a source into a palette, building one if needed
    pub fn resolve_palette<'a>(
        &self,
        source: &'a PaletteSource,
        active: &dyn ActiveThemeSource,
    ) -> Result<Cow<'a, Palette>> {
        match source {
            PaletteSource::Built(palette) => Ok(Cow::Borrowed(palette)),
            PaletteSource::ThemeName(name) => Ok(Cow::Owned(self.get_palette(name, None)?)),
            PaletteSource::Unspecified => {
                let theme = resolve_theme(None, active)?;
                Ok(Cow::Owned(self.get_palette(&theme, None)?))
            }
        }
    }

    /// Background faded towards the base text color.
    ///
    /// `fade = 0` gives the background, `fade = 1` the base text.
    pub fn blend_background(
        &self,
        source: &PaletteSource,
        fade: f64,
        active: &dyn ActiveThemeSource,
    ) -> Result<String> {
        let fade = check_fade(fade)?;
        let palette = self.resolve_palette(source, active)?;
        let out = blend_hex(palette.background(), palette.base_text(), fade)?;
        tracing::debug!(theme = palette.theme(), fade, color = %out, "blended background");
        Ok(out)
    }

    /// Base text faded towards the background color.
    ///
    /// `fade = 0` gives the base text, `fade = 1` the background.
    pub fn blend_foreground(
        &self,
        source: &PaletteSource,
        fade: f64,
        active: &dyn ActiveThemeSource,
    ) -> Result<String> {
        let fade = check_fade(fade)?;
        let palette = self.resolve_palette(source, active)?;
        let out = blend_hex(palette.base_text(), palette.background(), fade)?;
        tracing::debug!(theme = palette.theme(), fade, color = %out, "blended foreground");
        Ok(out)
    }
}
