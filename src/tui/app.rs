//! Main TUI application state and logic

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::auth::{AuthClient, AuthError, HttpAuthClient, OtpResponse, OtpRoute};
use crate::config::Config;
use crate::i18n::Translations;
use crate::theme::Theme;
use crate::tui::events::AppEvent;
use crate::tui::screens::{
    login::LoginScreen, otp_verification::OtpVerificationScreen, register::RegisterScreen,
};

/// How long the event loop waits for a key before checking background work
const TICK_RATE: Duration = Duration::from_millis(100);

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    OtpVerification,
    Register,
}

/// A passcode request in flight, bound to the login screen's lifetime
struct PendingOtp {
    phone: String,
    handle: JoinHandle<Result<OtpResponse, AuthError>>,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Previous screen for navigation
    pub previous_screen: Option<Screen>,
    /// Application configuration
    pub config: Config,
    pub translations: Translations,
    pub theme: Theme,

    // Screen states
    pub login: LoginScreen,
    pub otp_verification: OtpVerificationScreen,
    pub register: RegisterScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,

    auth: Arc<dyn AuthClient>,
    pending_otp: Option<PendingOtp>,
}

impl App {
    /// Create a new TUI application talking to the real service
    pub fn new(config: Config) -> Result<Self> {
        let auth = Arc::new(HttpAuthClient::new(&config)?);
        Ok(Self::with_auth(config, auth))
    }

    /// Create an application with an injected authentication client
    pub fn with_auth(config: Config, auth: Arc<dyn AuthClient>) -> Self {
        let translations = Translations::from_tag(&config.locale);
        let theme = Theme::new(config.dark_theme);

        Self {
            current_screen: Screen::Login,
            previous_screen: None,
            login: LoginScreen::new(&config, &translations),
            otp_verification: OtpVerificationScreen::new(&translations),
            register: RegisterScreen::new(&translations),
            config,
            translations,
            theme,
            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,
            auth,
            pending_otp: None,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Some(app_event) = self.poll_otp_completion().await {
                self.handle_app_event(app_event);
            }

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.cancel_pending_otp();
        Ok(())
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return Ok(());
            }
            _ => {}
        }

        if self.show_help_popup {
            return Ok(());
        }

        match self.current_screen {
            Screen::Login => self.handle_login_event(key),
            Screen::OtpVerification => self.handle_otp_verification_event(key),
            Screen::Register => self.handle_register_event(key),
        }

        Ok(())
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.current_screen {
            Screen::Login => self
                .login
                .draw(f, chunks[0], &self.theme, &self.translations),
            Screen::OtpVerification => {
                self.otp_verification
                    .draw(f, chunks[0], &self.theme, &self.translations)
            }
            Screen::Register => self
                .register
                .draw(f, chunks[0], &self.theme, &self.translations),
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            format!(
                "otpgate - {} | F1: Help",
                match self.current_screen {
                    Screen::Login => "Sign In",
                    Screen::OtpVerification => "Passcode Verification",
                    Screen::Register => "Registration",
                }
            )
        };

        let style = if self.error_message.is_some() {
            self.theme.error()
        } else if self.status_message.is_some() {
            self.theme.success()
        } else {
            self.theme.inactive()
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = crate::tui::ui::centered_rect(70, 60, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .border_style(self.theme.active_border()),
            )
            .style(self.theme.info());

        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global:\n\
            F1 - Toggle this help\n\
            Ctrl+C - Quit\n\n";

        let screen_help = match self.current_screen {
            Screen::Login => {
                "Sign In:\n\
                Type digits (and a leading +) into the phone field\n\
                Enter - Open the confirmation dialog\n\
                Esc - Quit\n\
                While a request is pending, Esc cancels it\n\n\
                Dialog: ←/→/Tab select, Enter commit, y/n shortcuts"
            }
            Screen::OtpVerification => {
                "Passcode Verification:\n\
                Type the six-digit passcode\n\
                Esc - Back to sign in"
            }
            Screen::Register => {
                "Registration:\n\
                Type a display name\n\
                Esc - Back to sign in"
            }
        };

        format!("{}{}", global_help, screen_help)
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
        self.clear_messages();

        // coming back to the login screen means starting over
        if screen == Screen::Login {
            self.cancel_pending_otp();
            self.login.reset();
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    // Event handlers for each screen

    fn handle_login_event(&mut self, key: KeyEvent) {
        // A request is in flight: Esc cancels it, everything else waits
        if self.login.is_loading {
            if key.code == KeyCode::Esc {
                self.cancel_pending_otp();
                self.login.is_loading = false;
                let message = self.translations.t("auth.requestCancelled").to_string();
                self.set_status(message);
            }
            return;
        }

        if self.login.confirm_dialog.is_visible() {
            use crate::tui::components::DialogOutcome;
            if let Some(DialogOutcome::Confirmed) = self.login.confirm_dialog.handle_key(key) {
                self.submit_login();
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let translations = self.translations;
                self.login.open_confirm_dialog(&translations);
            }
            KeyCode::Esc => {
                // login is the root screen
                self.should_quit = true;
            }
            KeyCode::Char(c) => self.login.handle_char_input(c),
            KeyCode::Backspace => self.login.phone_input.delete_char(),
            KeyCode::Delete => self.login.phone_input.delete_char_forward(),
            KeyCode::Left => self.login.phone_input.move_cursor_left(),
            KeyCode::Right => self.login.phone_input.move_cursor_right(),
            KeyCode::Home => self.login.phone_input.move_cursor_to_start(),
            KeyCode::End => self.login.phone_input.move_cursor_to_end(),
            _ => {}
        }
    }

    fn handle_otp_verification_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.navigate_to_screen(Screen::Login),
            KeyCode::Char(c) => self.otp_verification.handle_char_input(c),
            KeyCode::Backspace => self.otp_verification.code_input.delete_char(),
            KeyCode::Delete => self.otp_verification.code_input.delete_char_forward(),
            KeyCode::Left => self.otp_verification.code_input.move_cursor_left(),
            KeyCode::Right => self.otp_verification.code_input.move_cursor_right(),
            KeyCode::Home => self.otp_verification.code_input.move_cursor_to_start(),
            KeyCode::End => self.otp_verification.code_input.move_cursor_to_end(),
            _ => {}
        }
    }

    fn handle_register_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.navigate_to_screen(Screen::Login),
            KeyCode::Char(c) => self.register.handle_char_input(c),
            KeyCode::Backspace => self.register.name_input.delete_char(),
            KeyCode::Delete => self.register.name_input.delete_char_forward(),
            KeyCode::Left => self.register.name_input.move_cursor_left(),
            KeyCode::Right => self.register.name_input.move_cursor_right(),
            KeyCode::Home => self.register.name_input.move_cursor_to_start(),
            KeyCode::End => self.register.name_input.move_cursor_to_end(),
            _ => {}
        }
    }

    /// Confirmed submission: validate, then fire the passcode request
    fn submit_login(&mut self) {
        self.login.confirm_dialog.hide();

        let phone = self.login.submitted_phone();

        if phone.trim().is_empty() {
            self.login.error_message = format!("{}!", self.translations.t("auth.checkPhone"));
            return;
        }

        self.login.error_message.clear();
        self.login.is_loading = true;
        info!("requesting one-time passcode for {}", phone);

        let auth = Arc::clone(&self.auth);
        let task_phone = phone.clone();
        let handle = tokio::spawn(async move { auth.request_otp(&task_phone).await });
        self.pending_otp = Some(PendingOtp { phone, handle });
    }

    /// Pick up a finished passcode request, if any
    async fn poll_otp_completion(&mut self) -> Option<AppEvent> {
        let finished = self
            .pending_otp
            .as_ref()
            .is_some_and(|p| p.handle.is_finished());
        if !finished {
            return None;
        }

        let PendingOtp { phone, handle } = self.pending_otp.take()?;
        let outcome = match handle.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_cancelled() => return None,
            Err(join_error) => Err(AuthError::Internal(join_error.to_string())),
        };

        Some(AppEvent::OtpRequestFinished { phone, outcome })
    }

    /// Route a resolved passcode request
    fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::OtpRequestFinished { phone, outcome } => match outcome {
                Ok(response) => match response.route() {
                    OtpRoute::Verify => {
                        info!("existing account for {}, continuing to verification", phone);
                        self.otp_verification.set_phone(phone);
                        self.navigate_to_screen(Screen::OtpVerification);
                    }
                    OtpRoute::Register => {
                        info!("no account for {}, continuing to registration", phone);
                        self.login.is_loading = false;
                        self.register.set_phone(phone);
                        self.navigate_to_screen(Screen::Register);
                    }
                },
                Err(err) => {
                    error!("passcode request for {} failed: {}", phone, err);
                    self.login.is_loading = false;
                    let message =
                        format!("{}: {}", self.translations.t("auth.requestFailed"), err);
                    self.set_error(message);
                }
            },
        }
    }

    /// Abort an in-flight passcode request
    fn cancel_pending_otp(&mut self) {
        if let Some(pending) = self.pending_otp.take() {
            pending.handle.abort();
            info!("cancelled passcode request for {}", pending.phone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// One-shot scripted authentication client
    struct ScriptedAuth {
        response: Mutex<Option<Result<OtpResponse, AuthError>>>,
        calls: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl ScriptedAuth {
        fn replying(status: Option<bool>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(Ok(OtpResponse { status }))),
                calls: Mutex::new(Vec::new()),
                delay: None,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(Err(AuthError::Internal(
                    "connection refused".to_string(),
                )))),
                calls: Mutex::new(Vec::new()),
                delay: None,
            })
        }

        fn stalled() -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(Some(Ok(OtpResponse { status: Some(true) }))),
                calls: Mutex::new(Vec::new()),
                delay: Some(Duration::from_secs(60)),
            })
        }

        fn unused() -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
                delay: None,
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuthClient for ScriptedAuth {
        async fn request_otp(&self, phone: &str) -> Result<OtpResponse, AuthError> {
            self.calls.lock().unwrap().push(phone.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("auth client called more than scripted")
        }
    }

    fn test_app(auth: Arc<ScriptedAuth>) -> App {
        App::with_auth(Config::default(), auth)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(key(code)).await.unwrap();
    }

    fn type_phone(app: &mut App, phone: &str) {
        app.login.phone_input.clear();
        for c in phone.chars() {
            app.login.handle_char_input(c);
        }
    }

    /// Wait for the spawned request to resolve and route it
    async fn drain_pending(app: &mut App) {
        for _ in 0..1000 {
            if app.pending_otp.is_none() {
                return;
            }
            if let Some(app_event) = app.poll_otp_completion().await {
                app.handle_app_event(app_event);
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("passcode request never resolved");
    }

    #[tokio::test]
    async fn test_enter_opens_dialog_without_touching_backend() {
        let auth = ScriptedAuth::unused();
        let mut app = test_app(Arc::clone(&auth));

        press(&mut app, KeyCode::Enter).await;

        assert!(app.login.confirm_dialog.is_visible());
        assert!(auth.calls().is_empty());
        assert_eq!(app.current_screen, Screen::Login);
        assert!(!app.login.is_loading);
    }

    #[tokio::test]
    async fn test_cancelling_dialog_does_nothing() {
        let auth = ScriptedAuth::unused();
        let mut app = test_app(Arc::clone(&auth));

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('n')).await;

        assert!(!app.login.confirm_dialog.is_visible());
        assert!(auth.calls().is_empty());
        assert_eq!(app.current_screen, Screen::Login);
        assert!(app.pending_otp.is_none());
    }

    #[tokio::test]
    async fn test_empty_phone_sets_error_and_skips_backend() {
        let auth = ScriptedAuth::unused();
        let mut app = test_app(Arc::clone(&auth));
        type_phone(&mut app, "+ ");

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('y')).await;

        assert_eq!(app.login.error_message, "Check the phone number!");
        assert!(!app.login.confirm_dialog.is_visible());
        assert!(auth.calls().is_empty());
        assert_eq!(app.current_screen, Screen::Login);
        assert!(!app.login.is_loading);
    }

    #[tokio::test]
    async fn test_first_plus_is_stripped_from_submitted_phone() {
        let auth = ScriptedAuth::replying(Some(true));
        let mut app = test_app(Arc::clone(&auth));
        type_phone(&mut app, "+123456");

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('y')).await;
        drain_pending(&mut app).await;

        assert_eq!(auth.calls(), vec!["123456".to_string()]);
    }

    #[tokio::test]
    async fn test_known_account_routes_to_verification() {
        let auth = ScriptedAuth::replying(Some(true));
        let mut app = test_app(Arc::clone(&auth));
        type_phone(&mut app, "+243900000001");

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('y')).await;
        drain_pending(&mut app).await;

        assert_eq!(app.current_screen, Screen::OtpVerification);
        assert_eq!(app.otp_verification.phone, "243900000001");
        assert!(app.login.error_message.is_empty());
        assert!(app.error_message.is_none());
    }

    #[tokio::test]
    async fn test_unknown_account_routes_to_registration() {
        for status in [Some(false), None] {
            let auth = ScriptedAuth::replying(status);
            let mut app = test_app(Arc::clone(&auth));
            type_phone(&mut app, "+243900000002");

            press(&mut app, KeyCode::Enter).await;
            press(&mut app, KeyCode::Char('y')).await;
            drain_pending(&mut app).await;

            assert_eq!(app.current_screen, Screen::Register);
            assert_eq!(app.register.phone, "243900000002");
            assert!(!app.login.is_loading);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_stays_on_login() {
        let auth = ScriptedAuth::failing();
        let mut app = test_app(Arc::clone(&auth));
        type_phone(&mut app, "+243900000003");

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('y')).await;
        drain_pending(&mut app).await;

        assert_eq!(app.current_screen, Screen::Login);
        assert!(!app.login.is_loading);
        let error = app.error_message.as_deref().unwrap();
        assert!(error.contains("Passcode request failed"), "got: {error}");
    }

    #[tokio::test]
    async fn test_escape_cancels_pending_request() {
        let auth = ScriptedAuth::stalled();
        let mut app = test_app(Arc::clone(&auth));
        type_phone(&mut app, "+243900000004");

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('y')).await;
        assert!(app.login.is_loading);

        press(&mut app, KeyCode::Esc).await;

        assert!(app.pending_otp.is_none());
        assert!(!app.login.is_loading);
        assert_eq!(app.current_screen, Screen::Login);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Passcode request cancelled")
        );
    }

    #[tokio::test]
    async fn test_keys_are_ignored_while_loading() {
        let auth = ScriptedAuth::stalled();
        let mut app = test_app(Arc::clone(&auth));
        type_phone(&mut app, "+243900000005");

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('y')).await;
        let before = app.login.phone_input.value.clone();

        press(&mut app, KeyCode::Char('9')).await;
        press(&mut app, KeyCode::Enter).await;

        assert_eq!(app.login.phone_input.value, before);
        assert!(!app.login.confirm_dialog.is_visible());
    }

    #[tokio::test]
    async fn test_returning_to_login_resets_the_screen() {
        let auth = ScriptedAuth::replying(Some(true));
        let mut app = test_app(Arc::clone(&auth));
        type_phone(&mut app, "+243900000006");

        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('y')).await;
        drain_pending(&mut app).await;
        assert_eq!(app.current_screen, Screen::OtpVerification);

        press(&mut app, KeyCode::Esc).await;

        assert_eq!(app.current_screen, Screen::Login);
        assert_eq!(app.previous_screen, Some(Screen::OtpVerification));
        assert_eq!(app.login.phone_input.value, "+243");
        assert!(!app.login.is_loading);
    }

    #[tokio::test]
    async fn test_help_popup_swallows_screen_input() {
        let auth = ScriptedAuth::unused();
        let mut app = test_app(Arc::clone(&auth));

        press(&mut app, KeyCode::F(1)).await;
        assert!(app.show_help_popup);

        press(&mut app, KeyCode::Enter).await;
        assert!(!app.login.confirm_dialog.is_visible());

        press(&mut app, KeyCode::Esc).await;
        assert!(!app.show_help_popup);
        assert!(!app.should_quit);
    }
}
