//! Passcode verification screen
//!
//! Navigation target for accounts the service already knows. The screen
//! receives the phone number the passcode was requested for and collects
//! the code; checking it is the backend's business.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::i18n::Translations;
use crate::theme::Theme;
use crate::tui::ui::InputField;

/// Passcodes are six digits
const CODE_LEN: usize = 6;

/// Verification screen state
pub struct OtpVerificationScreen {
    pub phone: String,
    pub code_input: InputField,
}

impl OtpVerificationScreen {
    pub fn new(translations: &Translations) -> Self {
        let mut code_input = InputField::new(translations.t("messages.code"));
        code_input.set_focus(true);
        Self {
            phone: String::new(),
            code_input,
        }
    }

    /// Target phone, set right before navigating here
    pub fn set_phone(&mut self, phone: String) {
        self.phone = phone;
        self.code_input.clear();
    }

    pub fn handle_char_input(&mut self, c: char) {
        if c.is_ascii_digit() && self.code_input.value.chars().count() < CODE_LEN {
            self.code_input.insert_char(c);
        }
    }

    /// Draw the verification screen
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
                Constraint::Length(2), // Where the code went
                Constraint::Length(3), // Code input
                Constraint::Min(0),
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        let title = Paragraph::new(format!("otpgate - {}", translations.t("messages.code")))
            .style(theme.title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let sent_to = Paragraph::new(format!(
            "{} +{}",
            translations.t("auth.otpSent"),
            self.phone
        ))
        .style(theme.info());
        f.render_widget(sent_to, chunks[1]);

        self.code_input.render(f, chunks[2], theme);

        let instructions = Paragraph::new(vec![Line::from("Esc: Back | F1: Help")])
            .style(theme.inactive())
            .block(
                Block::default()
                    .title("Instructions")
                    .borders(Borders::ALL)
                    .border_style(theme.inactive_border()),
            );
        f.render_widget(instructions, chunks[4]);
    }
}
