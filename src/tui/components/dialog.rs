//! Modal confirmation dialog
//!
//! The dialog owns its state and key handling and reports an outcome;
//! the caller decides what confirmation means.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;
use crate::tui::ui::centered_rect;

/// Which button the selection rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogButton {
    Confirm,
    Cancel,
}

/// What the user decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed,
    Cancelled,
}

/// Yes/no modal rendered centered over the current screen
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    title: String,
    body: String,
    visible: bool,
    selected: DialogButton,
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            visible: false,
            // cancel is the safe default
            selected: DialogButton::Cancel,
        }
    }

    pub fn open(&mut self, title: String, body: String) {
        self.title = title;
        self.body = body;
        self.visible = true;
        self.selected = DialogButton::Cancel;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Handle a key while the dialog is open. Returns an outcome once
    /// the user commits; the dialog hides itself at that point.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DialogOutcome> {
        if !self.visible {
            return None;
        }

        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = match self.selected {
                    DialogButton::Confirm => DialogButton::Cancel,
                    DialogButton::Cancel => DialogButton::Confirm,
                };
                None
            }
            KeyCode::Enter => {
                self.hide();
                Some(match self.selected {
                    DialogButton::Confirm => DialogOutcome::Confirmed,
                    DialogButton::Cancel => DialogOutcome::Cancelled,
                })
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.hide();
                Some(DialogOutcome::Confirmed)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.hide();
                Some(DialogOutcome::Cancelled)
            }
            _ => None,
        }
    }

    /// Draw the dialog over `area` if visible
    pub fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let popup_area = centered_rect(60, 30, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(theme.active_border());
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let body = Paragraph::new(self.body.as_str())
            .style(theme.info())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
        f.render_widget(body, chunks[0]);

        let confirm_style = if self.selected == DialogButton::Confirm {
            theme.selected()
        } else {
            theme.inactive()
        };
        let cancel_style = if self.selected == DialogButton::Cancel {
            theme.selected()
        } else {
            theme.inactive()
        };

        let buttons = Line::from(vec![
            Span::styled("[ OK ]", confirm_style),
            Span::raw("   "),
            Span::styled("[ Cancel ]", cancel_style),
        ]);
        let buttons = Paragraph::new(buttons).alignment(Alignment::Center);
        f.render_widget(buttons, chunks[1]);
    }
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new()
    }
}
