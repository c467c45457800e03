use serde::Serialize;

use super::color::Rgb;
use super::table::{Rule, ThemeTable};
use crate::active::ActiveThemeSource;
use crate::error::{PaletteError, Result};

/// Ordered syntax colors of one theme plus its background and base text.
///
/// Colors follow `Rule::PALETTE_ORDER`, with `rules[i]` naming the rule of
/// `colors[i]`. A palette is never modified once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    theme: String,
    colors: Vec<String>,
    rules: Vec<Rule>,
    background: String,
    base_text: String,
}

impl Palette {
    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn base_text(&self) -> &str {
        &self.base_text
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `(rule, color)` pairs in palette order
    pub fn iter(&self) -> impl Iterator<Item = (Rule, &str)> {
        self.rules
            .iter()
            .copied()
            .zip(self.colors.iter().map(String::as_str))
    }

    pub fn background_rgb(&self) -> Result<Rgb> {
        Rgb::parse(&self.background)
    }

    pub fn base_text_rgb(&self) -> Result<Rgb> {
        Rgb::parse(&self.base_text)
    }

    /// Dark themes have a background darker than their base text
    pub fn is_dark(&self) -> Result<bool> {
        Ok(self.background_rgb()?.brightness() < self.base_text_rgb()?.brightness())
    }
}

/// Use `theme` if given, otherwise ask `source` for the active theme
pub fn resolve_theme(theme: Option<&str>, source: &dyn ActiveThemeSource) -> Result<String> {
    if let Some(name) = theme {
        return Ok(name.to_string());
    }
    source
        .active_theme()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(PaletteError::NoThemeSpecified)
}

impl ThemeTable {
    /// Number of syntax colors `theme` defines, i.e. the largest valid count
    pub fn max_colors(&self, theme: &str) -> Result<usize> {
        if !self.contains(theme) {
            return Err(PaletteError::UnknownTheme(theme.to_string()));
        }
        Ok(Rule::PALETTE_ORDER
            .iter()
            .filter(|rule| self.value(theme, **rule).is_some())
            .count())
    }

    /// Build the palette for `theme`.
    ///
    /// `count` defaults to every defined syntax color. Missing rules are
    /// skipped, so the result holds the first `count` defined colors in
    /// rule order.
    pub fn get_palette(&self, theme: &str, count: Option<usize>) -> Result<Palette> {
        if !self.contains(theme) {
            return Err(PaletteError::UnknownTheme(theme.to_string()));
        }

        let defined: Vec<(Rule, &str)> = Rule::PALETTE_ORDER
            .iter()
            .filter_map(|rule| self.value(theme, *rule).map(|value| (*rule, value)))
            .collect();

        let max = defined.len();
        let count = count.unwrap_or(max);
        if count > max {
            return Err(PaletteError::PaletteTooSmall {
                theme: theme.to_string(),
                max,
            });
        }

        let structural = |rule: Rule| {
            self.value(theme, rule).map(str::to_string).ok_or_else(|| {
                PaletteError::CorruptTable(format!("theme '{}' is missing rule '{}'", theme, rule))
            })
        };

        let palette = Palette {
            theme: theme.to_string(),
            colors: defined[..count].iter().map(|(_, v)| v.to_string()).collect(),
            rules: defined[..count].iter().map(|(r, _)| *r).collect(),
            background: structural(Rule::Background)?,
            base_text: structural(Rule::BaseText)?,
        };

        tracing::debug!(theme, count, "built palette");
        Ok(palette)
    }

    /// Like `get_palette`, resolving an omitted theme through `source`
    pub fn palette_for(
        &self,
        theme: Option<&str>,
        count: Option<usize>,
        source: &dyn ActiveThemeSource,
    ) -> Result<Palette> {
        let theme = resolve_theme(theme, source)?;
        self.get_palette(&theme, count)
    }
}
