//! Registration screen
//!
//! Navigation target for phone numbers the service does not know yet.
//! Receives the phone number from the login screen; account creation
//! itself happens elsewhere.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::i18n::Translations;
use crate::theme::Theme;
use crate::tui::ui::InputField;

/// Registration screen state
pub struct RegisterScreen {
    pub phone: String,
    pub name_input: InputField,
}

impl RegisterScreen {
    pub fn new(translations: &Translations) -> Self {
        let mut name_input = InputField::new(translations.t("messages.displayName"));
        name_input.set_focus(true);
        Self {
            phone: String::new(),
            name_input,
        }
    }

    /// Target phone, set right before navigating here
    pub fn set_phone(&mut self, phone: String) {
        self.phone = phone;
    }

    pub fn handle_char_input(&mut self, c: char) {
        if !c.is_control() {
            self.name_input.insert_char(c);
        }
    }

    /// Draw the registration screen
    pub fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        translations: &Translations,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(2), // New-account note
                Constraint::Length(3), // Phone (read-only)
                Constraint::Length(3), // Display name
                Constraint::Min(0),
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        let title = Paragraph::new(format!("otpgate - {}", translations.t("messages.register")))
            .style(theme.title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let note = Paragraph::new(translations.t("auth.newAccount"))
            .style(theme.info())
            .wrap(Wrap { trim: true });
        f.render_widget(note, chunks[1]);

        let phone = Paragraph::new(format!("+{}", self.phone))
            .style(theme.inactive())
            .block(
                Block::default()
                    .title(translations.t("messages.phone"))
                    .borders(Borders::ALL)
                    .border_style(theme.inactive_border()),
            );
        f.render_widget(phone, chunks[2]);

        self.name_input.render(f, chunks[3], theme);

        let instructions = Paragraph::new(vec![Line::from("Esc: Back | F1: Help")])
            .style(theme.inactive())
            .block(
                Block::default()
                    .title("Instructions")
                    .borders(Borders::ALL)
                    .border_style(theme.inactive_border()),
            );
        f.render_widget(instructions, chunks[5]);
    }
}
