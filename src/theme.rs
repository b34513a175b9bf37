//! Theme colors for the grid screen
//! Defaults can be overridden per color in the `[theme]` config table.

use ratatui::style::Color;
use std::str::FromStr;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Color,   // Tile borders
    pub icon: Color,     // Tile icon text
    pub text: Color,     // Primary text
    pub text_dim: Color, // Hints, idle info line
    pub accent: Color,   // Key names, popup borders
    pub status: Color,   // Status messages and gesture records
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Black,
            icon: Color::Black,
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            accent: Color::Rgb(250, 179, 135),
            status: Color::Rgb(250, 179, 135),
        }
    }
}

impl Theme {
    /// Resolve configured overrides against the defaults
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = Self::default();
        let pick = |name: &str, value: &Option<String>, fallback: Color| match value {
            Some(value) => parse_color(value).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown {} color: {}", name, value);
                fallback
            }),
            None => fallback,
        };

        Self {
            border: pick("border", &config.border, defaults.border),
            icon: pick("icon", &config.icon, defaults.icon),
            text: pick("text", &config.text, defaults.text),
            text_dim: pick("text_dim", &config.text_dim, defaults.text_dim),
            accent: pick("accent", &config.accent, defaults.accent),
            status: pick("status", &config.status, defaults.status),
        }
    }
}

/// Parse a color name (`gray`, `light-blue`) or hex string (`#RRGGBB`, `#RGB`)
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#').filter(|hex| hex.len() == 3 && hex.is_ascii()) {
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        return Some(Color::Rgb(channel(0)?, channel(1)?, channel(2)?));
    }
    Color::from_str(s).ok()
}
