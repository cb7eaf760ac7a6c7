//! Login screen: phone number entry behind a confirmation dialog

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::Config;
use crate::i18n::Translations;
use crate::theme::Theme;
use crate::tui::components::ConfirmDialog;
use crate::tui::ui::InputField;

/// Login screen state
pub struct LoginScreen {
    pub phone_input: InputField,
    pub is_loading: bool,
    pub error_message: String,
    pub confirm_dialog: ConfirmDialog,
    default_phone: String,
}

impl LoginScreen {
    pub fn new(config: &Config, translations: &Translations) -> Self {
        let default_phone = config.dial_code_prefix();
        Self {
            phone_input: Self::phone_field(translations.t("messages.phone"), &default_phone),
            is_loading: false,
            error_message: String::new(),
            confirm_dialog: ConfirmDialog::new(),
            default_phone,
        }
    }

    fn phone_field(label: &str, default_phone: &str) -> InputField {
        let mut field = InputField::new(label).with_value(default_phone);
        field.set_focus(true);
        field
    }

    /// Back to the state of a fresh mount
    pub fn reset(&mut self) {
        let label = self.phone_input.label.clone();
        self.phone_input = Self::phone_field(&label, &self.default_phone);
        self.is_loading = false;
        self.error_message.clear();
        self.confirm_dialog.hide();
    }

    /// Characters the phone widget accepts; everything else is dropped
    pub fn handle_char_input(&mut self, c: char) {
        if c.is_ascii_digit() || c == '+' || c == ' ' {
            self.phone_input.insert_char(c);
        }
    }

    /// Open the confirmation dialog for the current phone value
    pub fn open_confirm_dialog(&mut self, translations: &Translations) {
        let body = format!(
            "{}: {}?",
            self.phone_input.value,
            translations.t("auth.confirmPhone")
        );
        self.confirm_dialog
            .open(translations.t("messages.confirmation").to_string(), body);
    }

    /// Phone number as submitted to the backend: the first `+` is
    /// dropped, nothing else is touched.
    pub fn submitted_phone(&self) -> String {
        self.phone_input.value.replacen('+', "", 1)
    }

    /// Draw the login screen
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
                Constraint::Length(3), // Phone input
                Constraint::Length(1), // Inline error
                Constraint::Length(3), // Authenticate button
                Constraint::Min(0),
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0], theme, translations);
        self.phone_input.render(f, chunks[1], theme);
        self.draw_error_line(f, chunks[2], theme);
        self.draw_button(f, chunks[3], theme, translations);
        self.draw_instructions(f, chunks[5], theme);

        self.confirm_dialog.draw(f, area, theme);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect, theme: &Theme, translations: &Translations) {
        let title = if self.is_loading {
            format!("otpgate - {}", translations.t("auth.requesting"))
        } else {
            format!("otpgate - {}", translations.t("messages.authenticate"))
        };

        let widget = Paragraph::new(title)
            .style(theme.title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn draw_error_line(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let widget = Paragraph::new(self.error_message.as_str()).style(theme.error());
        f.render_widget(widget, area);
    }

    fn draw_button(&self, f: &mut Frame, area: Rect, theme: &Theme, translations: &Translations) {
        let (label, style) = if self.is_loading {
            (translations.t("auth.requesting"), theme.inactive())
        } else {
            (translations.t("messages.authenticate"), theme.button())
        };

        let widget = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(widget, area);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let lines = if self.is_loading {
            vec![Line::from("Esc: Cancel request")]
        } else {
            vec![
                Line::from("Type the phone number, Enter to continue"),
                Line::from("Esc: Quit | F1: Help"),
            ]
        };

        let widget = Paragraph::new(lines).style(theme.inactive()).block(
            Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(theme.inactive_border()),
        );
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> LoginScreen {
        LoginScreen::new(&Config::default(), &Translations::default())
    }

    #[test]
    fn test_prefills_dial_code() {
        let screen = screen();
        assert_eq!(screen.phone_input.value, "+243");
    }

    #[test]
    fn test_char_filter_accepts_phone_characters_only() {
        let mut screen = screen();
        screen.phone_input.clear();
        for c in "+243 900x-1a".chars() {
            screen.handle_char_input(c);
        }
        assert_eq!(screen.phone_input.value, "+243 9001");
    }

    #[test]
    fn test_submitted_phone_strips_first_plus_only() {
        let mut screen = screen();
        screen.phone_input = InputField::new("Phone").with_value("+123456");
        assert_eq!(screen.submitted_phone(), "123456");

        screen.phone_input = InputField::new("Phone").with_value("12+34");
        assert_eq!(screen.submitted_phone(), "1234");

        screen.phone_input = InputField::new("Phone").with_value("+12+34");
        assert_eq!(screen.submitted_phone(), "12+34");
    }

    #[test]
    fn test_dialog_body_names_the_phone() {
        let mut screen = screen();
        screen.phone_input = InputField::new("Phone").with_value("+243900000001");
        screen.open_confirm_dialog(&Translations::default());
        assert!(screen.confirm_dialog.is_visible());
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut screen = screen();
        screen.handle_char_input('9');
        screen.is_loading = true;
        screen.error_message = "Check the phone number!".to_string();
        screen.open_confirm_dialog(&Translations::default());

        screen.reset();

        assert_eq!(screen.phone_input.value, "+243");
        assert!(!screen.is_loading);
        assert!(screen.error_message.is_empty());
        assert!(!screen.confirm_dialog.is_visible());
    }
}
