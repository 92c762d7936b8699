use serde::Deserialize;
use sfml::graphics::Color;

use crate::config::ThemeConfig;
use crate::error::{Error, Result};

/// Used for any color a theme cannot provide.
pub const FALLBACK_COLOR: Color = Color::rgb(128, 128, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    Primary,
    Secondary,
    Accent,
    Foreground,
    Background,
}

impl ThemeColor {
    #[cfg(test)]
    pub const ALL: [ThemeColor; 5] = [
        ThemeColor::Primary,
        ThemeColor::Secondary,
        ThemeColor::Accent,
        ThemeColor::Foreground,
        ThemeColor::Background,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Source of the named colors, queried on every draw.
pub trait ThemeProvider {
    fn color(&self, name: ThemeColor) -> Option<Color>;

    fn color_or_fallback(&self, name: ThemeColor) -> Color {
        self.color(name).unwrap_or(FALLBACK_COLOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: [Option<Color>; 5],
}

impl Palette {
    pub fn light() -> Palette {
        Palette {
            colors: [
                Some(Color::rgb(0x4a, 0x90, 0xe2)),
                Some(Color::rgb(0xe7, 0x4c, 0x3c)),
                Some(Color::rgb(0x2e, 0xcc, 0x71)),
                Some(Color::rgb(0x33, 0x33, 0x33)),
                Some(Color::rgb(0xf5, 0xf7, 0xfa)),
            ],
        }
    }

    pub fn dark() -> Palette {
        Palette {
            colors: [
                Some(Color::rgb(0x64, 0xb5, 0xf6)),
                Some(Color::rgb(0xff, 0x70, 0x43)),
                Some(Color::rgb(0x81, 0xc7, 0x84)),
                Some(Color::rgb(0xe0, 0xe0, 0xe0)),
                Some(Color::rgb(0x1e, 0x1e, 0x2e)),
            ],
        }
    }

    /// A palette with no colors at all; every lookup falls back.
    #[cfg(test)]
    pub fn empty() -> Palette {
        Palette { colors: [None; 5] }
    }

    pub fn from_variant(variant: Variant) -> Palette {
        match variant {
            Variant::Light => Palette::light(),
            Variant::Dark => Palette::dark(),
        }
    }

    pub fn from_config(config: &ThemeConfig) -> Result<Palette> {
        let mut palette = Palette::from_variant(config.variant);

        let overrides = [
            (ThemeColor::Primary, &config.primary),
            (ThemeColor::Secondary, &config.secondary),
            (ThemeColor::Accent, &config.accent),
            (ThemeColor::Foreground, &config.foreground),
            (ThemeColor::Background, &config.background),
        ];
        for (name, value) in overrides {
            if let Some(hex) = value {
                palette.set(name, parse_hex_color(hex)?);
            }
        }

        Ok(palette)
    }

    pub fn set(&mut self, name: ThemeColor, color: Color) {
        self.colors[name.index()] = Some(color);
    }
}

impl ThemeProvider for Palette {
    fn color(&self, name: ThemeColor) -> Option<Color> {
        self.colors[name.index()]
    }
}

pub fn parse_hex_color(text: &str) -> Result<Color> {
    let invalid = || Error::InvalidColor(text.to_owned());

    let digits = text.trim().strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };

    Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#4a90e2").unwrap(), Color::rgb(0x4a, 0x90, 0xe2));
        assert_eq!(parse_hex_color(" #FFFFFF ").unwrap(), Color::WHITE);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["4a90e2", "#4a90e", "#4a90e2ff", "#zz90e2", "#ёё90"] {
            assert!(
                matches!(parse_hex_color(bad), Err(Error::InvalidColor(_))),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn builtin_palettes_are_complete() {
        for palette in [Palette::light(), Palette::dark()] {
            for name in ThemeColor::ALL {
                assert!(palette.color(name).is_some());
            }
        }
    }

    #[test]
    fn missing_color_falls_back() {
        let palette = Palette::empty();
        assert_eq!(palette.color(ThemeColor::Accent), None);
        assert_eq!(palette.color_or_fallback(ThemeColor::Accent), FALLBACK_COLOR);
    }

    #[test]
    fn config_overrides_single_color() {
        let config = ThemeConfig {
            variant: Variant::Dark,
            accent: Some("#010203".to_owned()),
            ..ThemeConfig::default()
        };
        let palette = Palette::from_config(&config).unwrap();

        assert_eq!(palette.color(ThemeColor::Accent), Some(Color::rgb(1, 2, 3)));
        assert_eq!(
            palette.color(ThemeColor::Primary),
            Palette::dark().color(ThemeColor::Primary)
        );
    }

    #[test]
    fn config_with_bad_override_fails() {
        let config = ThemeConfig {
            primary: Some("blue".to_owned()),
            ..ThemeConfig::default()
        };
        assert!(Palette::from_config(&config).is_err());
    }
}
