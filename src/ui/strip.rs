//! Color strip widget: one swatch per palette color, an optional ribbon
//! carrying the theme name, and optional hex labels under each swatch.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::palette::{Palette, Rgb};

/// Opacity of the theme background laid over the swatches under the ribbon
const RIBBON_OPACITY: f64 = 0.8;

pub struct PaletteStrip<'a> {
    palette: &'a Palette,
    show_ribbon: bool,
    show_hex: bool,
    truecolor: bool,
}

impl<'a> PaletteStrip<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            show_ribbon: true,
            show_hex: true,
            truecolor: true,
        }
    }

    pub fn ribbon(mut self, show: bool) -> Self {
        self.show_ribbon = show;
        self
    }

    pub fn hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    /// Emit 24-bit colors; otherwise approximate with the 256-color palette
    pub fn truecolor(mut self, enabled: bool) -> Self {
        self.truecolor = enabled;
        self
    }

    fn color(&self, rgb: Option<Rgb>) -> Color {
        rgb.map_or(Color::Reset, |c| c.to_color(self.truecolor))
    }
}

impl Widget for PaletteStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let background = self.palette.background_rgb().ok();
        let base_text = self.palette.base_text_rgb().ok();
        let text_style = Style::default().fg(self.color(base_text));

        buf.set_style(area, text_style.bg(self.color(background)));

        // Bottom row holds the hex labels
        let hex_rows = u16::from(self.show_hex && area.height > 1);
        let strip = Rect::new(area.x, area.y, area.width, area.height - hex_rows);

        let swatches: Vec<Option<Rgb>> = self
            .palette
            .colors()
            .iter()
            .map(|c| Rgb::parse(c).ok())
            .collect();
        let columns = split_columns(strip, swatches.len());

        for (column, swatch) in columns.iter().zip(&swatches) {
            buf.set_style(*column, Style::default().bg(self.color(*swatch)));
        }

        if self.show_ribbon {
            let y = strip.y + strip.height / 2;
            for (column, swatch) in columns.iter().zip(&swatches) {
                let tinted = match (swatch, background) {
                    (Some(s), Some(b)) => Some(s.mix(b, RIBBON_OPACITY)),
                    _ => background,
                };
                buf.set_style(
                    Rect::new(column.x, y, column.width, 1),
                    Style::default().bg(self.color(tinted)),
                );
            }
            draw_centered(
                buf,
                Rect::new(strip.x, y, strip.width, 1),
                self.palette.theme(),
                text_style.add_modifier(Modifier::BOLD),
            );
        }

        if hex_rows == 1 {
            let y = area.y + area.height - 1;
            for (column, hex) in columns.iter().zip(self.palette.colors()) {
                draw_centered(
                    buf,
                    Rect::new(column.x, y, column.width, 1),
                    hex,
                    text_style,
                );
            }
        }
    }
}

/// Split `area` into `n` equal-width columns
fn split_columns(area: Rect, n: usize) -> Vec<Rect> {
    if n == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, n as u32); n])
        .split(area)
        .to_vec()
}

/// Write `text` centered in the first row of `area`, truncated to its width
fn draw_centered(buf: &mut Buffer, area: Rect, text: &str, style: Style) {
    let text_width = text.width().min(u16::MAX as usize) as u16;
    let offset = area.width.saturating_sub(text_width) / 2;
    buf.set_stringn(area.x + offset, area.y, text, area.width as usize, style);
}
