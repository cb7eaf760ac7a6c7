//! Color tokens and derived widget styles
//!
//! | Token    | Dark      | Light     | Usage                      |
//! |----------|-----------|-----------|----------------------------|
//! | primary  | `#FF8F3C` | `#C75B12` | headings, buttons, accents |
//! | text     | `#E8E0D8` | `#2B2B2B` | regular copy               |
//! | muted    | `#8B8378` | `#7A7265` | placeholders, metadata     |
//! | error    | `#E23D2D` | `#B02A1E` | validation, failures       |
//! | success  | `#2FBF71` | `#1E8A52` | confirmations              |

use ratatui::style::{Color, Modifier, Style};

mod palette {
    use ratatui::style::Color;

    pub const PRIMARY_DARK: Color = Color::Rgb(0xFF, 0x8F, 0x3C);
    pub const PRIMARY_LIGHT: Color = Color::Rgb(0xC7, 0x5B, 0x12);
    pub const TEXT_DARK: Color = Color::Rgb(0xE8, 0xE0, 0xD8);
    pub const TEXT_LIGHT: Color = Color::Rgb(0x2B, 0x2B, 0x2B);
    pub const MUTED_DARK: Color = Color::Rgb(0x8B, 0x83, 0x78);
    pub const MUTED_LIGHT: Color = Color::Rgb(0x7A, 0x72, 0x65);
    pub const ERROR_DARK: Color = Color::Rgb(0xE2, 0x3D, 0x2D);
    pub const ERROR_LIGHT: Color = Color::Rgb(0xB0, 0x2A, 0x1E);
    pub const SUCCESS_DARK: Color = Color::Rgb(0x2F, 0xBF, 0x71);
    pub const SUCCESS_LIGHT: Color = Color::Rgb(0x1E, 0x8A, 0x52);
}

/// Theme provider: one primary color token plus a dark-mode flag,
/// everything else derived from those.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn primary(&self) -> Color {
        if self.dark {
            palette::PRIMARY_DARK
        } else {
            palette::PRIMARY_LIGHT
        }
    }

    pub fn text(&self) -> Color {
        if self.dark {
            palette::TEXT_DARK
        } else {
            palette::TEXT_LIGHT
        }
    }

    pub fn muted(&self) -> Color {
        if self.dark {
            palette::MUTED_DARK
        } else {
            palette::MUTED_LIGHT
        }
    }

    fn error_color(&self) -> Color {
        if self.dark {
            palette::ERROR_DARK
        } else {
            palette::ERROR_LIGHT
        }
    }

    fn success_color(&self) -> Color {
        if self.dark {
            palette::SUCCESS_DARK
        } else {
            palette::SUCCESS_LIGHT
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary())
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error_color())
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_color())
    }

    pub fn info(&self) -> Style {
        Style::default().fg(self.text())
    }

    pub fn inactive(&self) -> Style {
        Style::default().fg(self.muted())
    }

    pub fn active_border(&self) -> Style {
        Style::default().fg(self.primary())
    }

    pub fn inactive_border(&self) -> Style {
        Style::default().fg(self.muted())
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.primary())
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    /// Contained button, the primary action on a screen
    pub fn button(&self) -> Style {
        Style::default()
            .bg(self.primary())
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_by_mode() {
        let dark = Theme::new(true);
        let light = Theme::new(false);
        assert_ne!(dark.primary(), light.primary());
        assert_ne!(dark.text(), light.text());
    }

    #[test]
    fn test_selected_uses_primary_background() {
        let theme = Theme::new(true);
        assert_eq!(theme.selected().bg, Some(theme.primary()));
    }
}
