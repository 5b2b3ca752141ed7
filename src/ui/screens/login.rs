use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{error_line, Screen, ScreenAction};
use crate::session::Credentials;
use crate::ui::dialogs::centered_rect;
use crate::ui::form_field::{FieldList, FormField};
use crate::ui::keybindings::ShortcutContext;

const METHODS: &[(&str, &str)] = &[
    ("email", "Email"),
    ("node", "Lightning Node"),
    ("wallet", "Wallet"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Method,
    Email,
    Password,
    NodeId,
    PrivateKey,
}

pub struct LoginScreen {
    fields: FieldList<LoginField>,
    method: String,
    error: Option<String>,
    pending: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            fields: Self::fields_for("email"),
            method: "email".to_string(),
            error: None,
            pending: false,
        }
    }

    fn fields_for(method: &str) -> FieldList<LoginField> {
        let mut entries = vec![(
            LoginField::Method,
            "Sign in with",
            FormField::select(METHODS, method, "Choose a method"),
        )];
        match method {
            "node" => entries.push((
                LoginField::NodeId,
                "Node ID",
                FormField::text("", "02a1b2c3d4e5f6..."),
            )),
            "wallet" => entries.push((
                LoginField::PrivateKey,
                "Private Key",
                FormField::masked("Enter your private key"),
            )),
            _ => {
                entries.push((
                    LoginField::Email,
                    "Email",
                    FormField::text("", "you@example.com"),
                ));
                entries.push((
                    LoginField::Password,
                    "Password",
                    FormField::masked("Password"),
                ));
            }
        }
        FieldList::new(entries)
    }

    /// Set by the app while the simulated login is in flight
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn credentials(&self) -> Result<Credentials, &'static str> {
        let value = |field| self.fields.value(field).trim().to_string();
        let credentials = match self.method.as_str() {
            "node" => Credentials::Node {
                node_id: value(LoginField::NodeId),
            },
            "wallet" => Credentials::Wallet {
                private_key: value(LoginField::PrivateKey),
            },
            _ => Credentials::Email {
                email: value(LoginField::Email),
                password: self.fields.value(LoginField::Password),
            },
        };
        let complete = match &credentials {
            Credentials::Email { email, password } => !email.is_empty() && !password.is_empty(),
            Credentials::Node { node_id } => !node_id.is_empty(),
            Credentials::Wallet { private_key } => !private_key.is_empty(),
        };
        if complete {
            Ok(credentials)
        } else {
            Err("Fill in every field to sign in")
        }
    }
}

impl Screen for LoginScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let area = centered_rect(60, 70, area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Sign in ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightRed));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(2),
            ])
            .split(inner);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "⚡ Orange Pages",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Taproot Asset Explorer & Marketplace",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        self.fields.render(frame, chunks[1], !self.pending);

        let footer = if self.pending {
            Line::from(Span::styled(
                "Signing in…",
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(error) = &self.error {
            error_line(error)
        } else {
            Line::from(Span::styled(
                "Enter sign in · Tab next field · Esc quit",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[2]);
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        if self.pending {
            return ScreenAction::None;
        }
        match key {
            KeyCode::Esc => ScreenAction::Quit,
            KeyCode::Tab | KeyCode::Down => {
                self.fields.next_field();
                ScreenAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.fields.prev_field();
                ScreenAction::None
            }
            KeyCode::Enter => match self.credentials() {
                Ok(credentials) => {
                    self.error = None;
                    ScreenAction::Login(credentials)
                }
                Err(message) => {
                    self.error = Some(message.to_string());
                    ScreenAction::None
                }
            },
            other => {
                if self.fields.handle_key(other) == Some(LoginField::Method) {
                    self.method = self.fields.value(LoginField::Method);
                    self.fields = Self::fields_for(&self.method);
                    self.error = None;
                }
                ScreenAction::None
            }
        }
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn context(&self) -> ShortcutContext {
        ShortcutContext::Form
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screens::test_support::render_text;

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_email_login_needs_both_fields() {
        let mut screen = LoginScreen::new();
        screen.handle_key(KeyCode::Tab);
        type_text(&mut screen, "satoshi@example.com");
        assert!(matches!(screen.handle_key(KeyCode::Enter), ScreenAction::None));
        assert!(screen.error.is_some());

        screen.handle_key(KeyCode::Tab);
        type_text(&mut screen, "hunter2");
        match screen.handle_key(KeyCode::Enter) {
            ScreenAction::Login(Credentials::Email { email, password }) => {
                assert_eq!(email, "satoshi@example.com");
                assert_eq!(password, "hunter2");
            }
            _ => panic!("expected an email login"),
        }
    }

    #[test]
    fn test_switching_method_changes_fields() {
        let mut screen = LoginScreen::new();
        screen.handle_key(KeyCode::Right);
        assert_eq!(screen.method, "node");
        screen.handle_key(KeyCode::Tab);
        type_text(&mut screen, "02abc");
        match screen.handle_key(KeyCode::Enter) {
            ScreenAction::Login(Credentials::Node { node_id }) => assert_eq!(node_id, "02abc"),
            _ => panic!("expected a node login"),
        }
    }

    #[test]
    fn test_pending_ignores_keys() {
        let mut screen = LoginScreen::new();
        screen.set_pending(true);
        assert!(matches!(screen.handle_key(KeyCode::Esc), ScreenAction::None));
        let text = render_text(&mut screen, 80, 30);
        assert!(text.contains("Signing in"));
    }

    #[test]
    fn test_password_is_masked() {
        let mut screen = LoginScreen::new();
        screen.handle_key(KeyCode::Tab);
        screen.handle_key(KeyCode::Tab);
        type_text(&mut screen, "secret");
        let text = render_text(&mut screen, 80, 30);
        assert!(!text.contains("secret"));
        assert!(text.contains("••••••"));
    }
}
