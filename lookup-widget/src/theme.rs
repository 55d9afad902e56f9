use ratatui::style::{Color, Modifier, Style};

use crate::state::Font;

pub const DARK_BACKGROUND: Color = Color::Rgb(0x34, 0x34, 0x34);
pub const LIGHT_TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const ACCENT: Color = Color::Rgb(0xa4, 0x45, 0xed);
pub const MUTED: Color = Color::Rgb(0x75, 0x75, 0x75);
pub const ERROR: Color = Color::Rgb(0xff, 0x52, 0x52);

/// Colours for one render. `None` leaves the terminal default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Option<Color>,
    pub text: Option<Color>,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        background: None,
        text: None,
    };

    pub const DARK: Theme = Theme {
        background: Some(DARK_BACKGROUND),
        text: Some(LIGHT_TEXT),
    };

    pub fn for_dark_flag(dark: bool) -> Theme {
        if dark {
            Theme::DARK
        } else {
            Theme::LIGHT
        }
    }

    /// Base style of the page and of the font selector.
    pub fn surface(&self) -> Style {
        match self.background {
            Some(color) => Style::default().bg(color),
            None => Style::default(),
        }
    }

    /// Style for themed text: headings, definitions, the source link.
    pub fn text(&self) -> Style {
        match self.text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(ACCENT)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(MUTED)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(ERROR)
    }
}

/// Terminals have one typeface, so each family maps to a text modifier.
pub fn font_modifier(font: Font) -> Modifier {
    match font {
        Font::Serif => Modifier::ITALIC,
        Font::SansSerif => Modifier::empty(),
        Font::Monospace => Modifier::BOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_flag_switches_text_colour() {
        assert_eq!(Theme::for_dark_flag(false).text, None);
        assert_eq!(Theme::for_dark_flag(true).text, Some(LIGHT_TEXT));
        assert_eq!(Theme::for_dark_flag(false).text, None);
    }

    #[test]
    fn light_theme_leaves_styles_unset() {
        assert_eq!(Theme::LIGHT.surface(), Style::default());
        assert_eq!(Theme::LIGHT.text(), Style::default());
        assert_eq!(Theme::DARK.surface().bg, Some(DARK_BACKGROUND));
    }
}
