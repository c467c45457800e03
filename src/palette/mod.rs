pub mod blend;
pub mod builder;
pub mod color;
pub mod table;

pub use blend::{blend_hex, check_fade, PaletteSource};
pub use builder::{resolve_theme, Palette};
pub use color::Rgb;
pub use table::{Rule, ThemeRow, ThemeTable};
