//! Color palettes for the TUI, one per theme.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

use crate::domain::Theme;

/// Dark and light palettes; the active theme picks one.
///
/// Keys missing from `[colors.dark]` / `[colors.light]` keep that theme's
/// default color.
#[derive(Debug, Clone)]
pub struct ThemePalettes {
    pub dark: ColorConfig,
    pub light: ColorConfig,
}

impl Default for ThemePalettes {
    fn default() -> Self {
        Self {
            dark: ColorConfig::default(),
            light: ColorConfig::light(),
        }
    }
}

impl ThemePalettes {
    pub fn for_theme(&self, theme: Theme) -> &ColorConfig {
        match theme {
            Theme::Dark => &self.dark,
            Theme::Light => &self.light,
        }
    }
}

impl<'de> Deserialize<'de> for ThemePalettes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct Raw {
            dark: ColorOverrides,
            light: ColorOverrides,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self {
            dark: raw.dark.apply(ColorConfig::default()),
            light: raw.light.apply(ColorConfig::light()),
        })
    }
}

macro_rules! palette {
    ($($field:ident),* $(,)?) => {
        /// Configuration for all TUI colors of one theme.
        #[derive(Debug, Clone, PartialEq)]
        pub struct ColorConfig {
            $(pub $field: Color,)*
        }

        #[derive(Debug, Default, Deserialize)]
        struct ColorOverrides {
            $(
                #[serde(default, deserialize_with = "deserialize_color")]
                $field: Option<Color>,
            )*
        }

        impl ColorOverrides {
            fn apply(self, mut base: ColorConfig) -> ColorConfig {
                $(
                    if let Some(color) = self.$field {
                        base.$field = color;
                    }
                )*
                base
            }
        }
    };
}

palette!(
    background,
    text,
    muted,
    border,
    accent,
    selection_bg,
    selection_fg,
    badge_trending,
    badge_new,
    badge_type,
    entity,
    link,
    error,
    status_fg,
    status_bg,
);

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            text: Color::White,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            accent: Color::Cyan,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            badge_trending: Color::LightRed,
            badge_new: Color::LightGreen,
            badge_type: Color::LightBlue,
            entity: Color::Yellow,
            link: Color::Blue,
            error: Color::Red,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

impl ColorConfig {
    pub fn light() -> Self {
        Self {
            background: Color::White,
            text: Color::Black,
            muted: Color::Gray,
            border: Color::Gray,
            accent: Color::Blue,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            badge_trending: Color::Red,
            badge_new: Color::Green,
            badge_type: Color::Blue,
            entity: Color::Magenta,
            link: Color::Blue,
            error: Color::Red,
            status_fg: Color::Black,
            status_bg: Color::Gray,
        }
    }
}

/// Custom deserializer for Color that supports named colors and hex codes.
fn deserialize_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_color_string(&s).map_err(de::Error::custom))
        .transpose()
}

/// Parse a color string into a ratatui Color.
///
/// Supports named colors ("Cyan", "darkgray", ...) and "#RRGGBB" / "#RGB".
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    if !hex.is_ascii() {
        return Err(format!("Invalid hex color: {}", s));
    }
    let channel = |digits: &str| {
        u8::from_str_radix(digits, 16).map_err(|_| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #RGB expands each digit: F -> FF
        3 => Ok(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}
