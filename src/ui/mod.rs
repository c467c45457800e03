pub mod preview;
pub mod strip;

use ratatui::{layout::Rect, Frame};
use supports_color::Stream;

use crate::palette::Palette;

pub use strip::PaletteStrip;

/// Check if terminal supports true color (24-bit RGB)
pub fn supports_true_color() -> bool {
    if let Some(support) = supports_color::on(Stream::Stdout) {
        support.has_16m
    } else {
        false
    }
}

/// Draw `palette` as a color strip filling `area`
pub fn render(frame: &mut Frame, area: Rect, palette: &Palette, show_ribbon: bool, show_hex: bool) {
    let strip = PaletteStrip::new(palette)
        .ribbon(show_ribbon)
        .hex(show_hex)
        .truecolor(supports_true_color());
    frame.render_widget(strip, area);
}
