use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    /// Card and panel fill
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub green: Color,
    pub red: Color,
    pub yellow: Color,
    pub selection_bg: Color,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xF8, 0xFA, 0xFC),
            surface: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x33, 0x41, 0x55),
            text_bright: Color::Rgb(0x0F, 0x17, 0x2A),
            dim: Color::Rgb(0x94, 0xA3, 0xB8),
            accent: Color::Rgb(0x0D, 0x94, 0x88),
            border: Color::Rgb(0xCB, 0xD5, 0xE1),
            green: Color::Rgb(0x16, 0xA3, 0x4A),
            red: Color::Rgb(0xDC, 0x26, 0x26),
            yellow: Color::Rgb(0xCA, 0x8A, 0x04),
            selection_bg: Color::Rgb(0xCC, 0xFB, 0xF1),
        }
    }

    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x0F, 0x17, 0x2A),
            surface: Color::Rgb(0x1E, 0x29, 0x3B),
            text: Color::Rgb(0xCB, 0xD5, 0xE1),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x64, 0x74, 0x8B),
            accent: Color::Rgb(0x2D, 0xD4, 0xBF),
            border: Color::Rgb(0x33, 0x41, 0x55),
            green: Color::Rgb(0x4A, 0xDE, 0x80),
            red: Color::Rgb(0xF8, 0x71, 0x71),
            yellow: Color::Rgb(0xFA, 0xCC, 0x15),
            selection_bg: Color::Rgb(0x13, 0x4E, 0x4A),
        }
    }

    /// Palette chosen by the `[ui] theme` preference, with `[ui.colors]`
    /// overrides applied
    pub fn from_config(ui: &UiConfig) -> Self {
        Theme::for_mode(ui.is_dark(), ui)
    }

    /// Same as `from_config` but with the palette chosen explicitly
    pub fn for_mode(dark: bool, ui: &UiConfig) -> Self {
        let mut theme = if dark { Theme::dark() } else { Theme::light() };

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "surface" => theme.surface = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "dim" => theme.dim = color,
                "accent" => theme.accent = color,
                "border" => theme.border = color,
                "green" => theme.green = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "selection_bg" => theme.selection_bg = color,
                _ => {}
            }
        }

        theme
    }

    /// Badge color for a task type
    pub fn kind_color(&self, kind: &str) -> Color {
        match kind {
            "DSA" => self.accent,
            "Apti" => self.yellow,
            _ => self.text,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn preference_selects_palette() {
        assert_eq!(Theme::from_config(&UiConfig::default()), Theme::light());

        let ui = UiConfig {
            theme: Some("dark".into()),
            ..Default::default()
        };
        assert_eq!(Theme::from_config(&ui), Theme::dark());
    }

    #[test]
    fn overrides_apply_to_either_palette() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("accent".into(), "not-a-color".into());

        let light = Theme::for_mode(false, &ui);
        assert_eq!(light.background, Color::Rgb(0, 0, 0));
        assert_eq!(light.accent, Theme::light().accent);

        let dark = Theme::for_mode(true, &ui);
        assert_eq!(dark.background, Color::Rgb(0, 0, 0));
        assert_eq!(dark.text, Theme::dark().text);
    }

    #[test]
    fn kind_color_fallback() {
        let theme = Theme::dark();
        assert_eq!(theme.kind_color("DSA"), theme.accent);
        assert_eq!(theme.kind_color("Apti"), theme.yellow);
        assert_eq!(theme.kind_color("Reading"), theme.text);
    }
}
