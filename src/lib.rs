//! Color palettes derived from editor syntax themes.
//!
//! The bundled table maps 31 editor themes to the colors of their syntax
//! rules. Palettes are projected from it in a fixed rule order, background
//! and foreground colors can be blended, and a palette can be previewed as a
//! color strip in the terminal.
//!
//! The functions at the crate root use the bundled table and resolve an
//! omitted theme through [`active::ThemeSourceChain::standard`].

pub mod active;
pub mod config;
pub mod error;
pub mod palette;
pub mod ui;

pub use active::{ActiveThemeSource, ThemeSourceChain};
pub use error::{PaletteError, Result};
pub use palette::{Palette, PaletteSource, Rgb, Rule, ThemeTable};
pub use ui::render;

/// Theme names of the bundled table, in table order
pub fn list_themes() -> Result<Vec<&'static str>> {
    Ok(ThemeTable::bundled()?.list_themes())
}

/// Palette of `theme` (or the active theme) with up to `count` colors
pub fn get_palette(theme: Option<&str>, count: Option<usize>) -> Result<Palette> {
    ThemeTable::bundled()?.palette_for(theme, count, &ThemeSourceChain::standard())
}

/// Background blended towards the base text by `fade`
pub fn blend_background(source: impl Into<PaletteSource>, fade: f64) -> Result<String> {
    ThemeTable::bundled()?.blend_background(&source.into(), fade, &ThemeSourceChain::standard())
}

/// Base text blended towards the background by `fade`
pub fn blend_foreground(source: impl Into<PaletteSource>, fade: f64) -> Result<String> {
    ThemeTable::bundled()?.blend_foreground(&source.into(), fade, &ThemeSourceChain::standard())
}
