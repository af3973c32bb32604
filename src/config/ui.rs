use ratatui::style::Color;
use serde::{Deserialize, Serialize};

// Configuration for presentation options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub show_ghost: bool,
    pub show_controls: bool,

    // Color cycling for the menu title
    pub title_color_cycle_interval_ms: u64,
    pub title_colors: Vec<TitleColor>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_ghost: true,
            show_controls: true,
            title_color_cycle_interval_ms: 400,
            title_colors: vec![
                TitleColor::Cyan,
                TitleColor::Blue,
                TitleColor::Magenta,
                TitleColor::Yellow,
                TitleColor::Green,
                TitleColor::Red,
            ],
        }
    }
}

// Supported colors for serialization/deserialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TitleColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Black,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    Gray,
    Custom(u8, u8, u8),
}

impl TitleColor {
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            TitleColor::Red => Color::Red,
            TitleColor::Green => Color::Green,
            TitleColor::Yellow => Color::Yellow,
            TitleColor::Blue => Color::Blue,
            TitleColor::Magenta => Color::Magenta,
            TitleColor::Cyan => Color::Cyan,
            TitleColor::White => Color::White,
            TitleColor::Black => Color::Black,
            TitleColor::DarkGray => Color::DarkGray,
            TitleColor::LightRed => Color::LightRed,
            TitleColor::LightGreen => Color::LightGreen,
            TitleColor::LightYellow => Color::LightYellow,
            TitleColor::LightBlue => Color::LightBlue,
            TitleColor::LightMagenta => Color::LightMagenta,
            TitleColor::LightCyan => Color::LightCyan,
            TitleColor::Gray => Color::Gray,
            TitleColor::Custom(r, g, b) => Color::Rgb(*r, *g, *b),
        }
    }
}
