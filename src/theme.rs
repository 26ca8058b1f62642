//! Display accent themes.

use clap::ValueEnum;
use comfy_table::Color;

/// Accent palette for table output. Pure presentation state; the
/// computational pipeline never depends on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Blue,
    Green,
    Red,
    Purple,
    Dark,
}

impl Theme {
    pub fn color(self) -> Color {
        match self {
            Theme::Blue => Color::Blue,
            Theme::Green => Color::Green,
            Theme::Red => Color::Red,
            Theme::Purple => Color::Magenta,
            Theme::Dark => Color::DarkGrey,
        }
    }
}
