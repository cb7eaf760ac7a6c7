//! Common UI components and utilities

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;

/// Input field widget
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_focused: bool,
    /// Cursor position in characters, not bytes
    pub cursor_position: usize,
}

impl InputField {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            is_focused: false,
            cursor_position: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor_position = self.value.chars().count();
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.value.chars().count() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Display column of the cursor inside the field
    fn cursor_column(&self) -> u16 {
        self.value
            .chars()
            .take(self.cursor_position)
            .map(|c| c.width().unwrap_or(0) as u16)
            .sum()
    }

    /// Render the input field as a widget
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if self.is_focused {
            theme.active_border()
        } else {
            theme.inactive_border()
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        let input_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            theme.inactive()
        } else {
            theme.info()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(input_style)
            .block(block);

        f.render_widget(paragraph, area);

        if self.is_focused {
            let cursor_x = area.x + 1 + self.cursor_column();
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut field = InputField::new("Phone");
        field.insert_char('+');
        field.insert_char('2');
        field.insert_char('4');
        assert_eq!(field.value, "+24");
        field.delete_char();
        assert_eq!(field.value, "+2");
        assert_eq!(field.cursor_position, 2);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut field = InputField::new("Phone").with_value("13");
        field.move_cursor_left();
        field.insert_char('2');
        assert_eq!(field.value, "123");
    }

    #[test]
    fn test_delete_forward() {
        let mut field = InputField::new("Phone").with_value("123");
        field.move_cursor_to_start();
        field.delete_char_forward();
        assert_eq!(field.value, "23");
        assert_eq!(field.cursor_position, 0);
    }

    #[test]
    fn test_cursor_stays_on_char_boundaries() {
        let mut field = InputField::new("Name").with_value("Aké");
        field.delete_char();
        assert_eq!(field.value, "Ak");
        field.insert_char('é');
        assert_eq!(field.value, "Aké");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut field = InputField::new("Phone").with_value("+243");
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.cursor_position, 0);
    }
}
