//! Color themes
//!
//! A theme maps the three roles the terminal paints with to concrete colors.
//! Themes are plain values handed to each screen at construction.

use crate::framebuffer::Color;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    /// Foreground used while highlighting is enabled
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x11, 0x11, 0x11),
            foreground: Color::rgb(0xcc, 0xcc, 0xcc),
            highlight: Color::rgb(0x57, 0xc7, 0xff),
        }
    }
}

impl Theme {
    /// Names accepted by [`Theme::by_name`]
    pub const NAMES: [&'static str; 5] = ["default", "dracula", "nord", "solarized", "matrix"];

    /// Look up a built-in theme, falling back to the default one
    pub fn by_name(name: &str) -> Self {
        Self::find(name).unwrap_or_else(|| {
            tracing::debug!("Unknown theme {name:?}, using default");
            Self::default()
        })
    }

    /// Look up a built-in theme
    pub fn find(name: &str) -> Option<Self> {
        let theme = match name.to_ascii_lowercase().as_str() {
            "default" => Self::default(),
            "dracula" => Self {
                background: Color::rgb(0x28, 0x2a, 0x36),
                foreground: Color::rgb(0xf8, 0xf8, 0xf2),
                highlight: Color::rgb(0xff, 0x79, 0xc6),
            },
            "nord" => Self {
                background: Color::rgb(0x2e, 0x34, 0x40),
                foreground: Color::rgb(0xd8, 0xde, 0xe9),
                highlight: Color::rgb(0x88, 0xc0, 0xd0),
            },
            "solarized" => Self {
                background: Color::rgb(0x00, 0x2b, 0x36),
                foreground: Color::rgb(0x83, 0x94, 0x96),
                highlight: Color::rgb(0xb5, 0x89, 0x00),
            },
            "matrix" => Self {
                background: Color::BLACK,
                foreground: Color::rgb(0x00, 0xc0, 0x00),
                highlight: Color::rgb(0xa0, 0xff, 0xa0),
            },
            _ => return None,
        };
        Some(theme)
    }
}
