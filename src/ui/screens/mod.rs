//! One screen per view. Screens own a snapshot of the data they show and
//! report anything that touches shared state back to the app as a
//! [`ScreenAction`].

mod assets;
mod checkout;
mod claim;
mod dashboard;
mod login;
mod nodes;
mod orders;
mod portfolio;
mod settings;

pub use assets::{AssetDetailsScreen, AssetDiscoveryScreen};
pub use checkout::CheckoutScreen;
pub use claim::ClaimWizardScreen;
pub use dashboard::DashboardScreen;
pub use login::LoginScreen;
pub use nodes::{NodeExplorerScreen, NodeProfileScreen};
pub use orders::{OrderStatusScreen, OrdersScreen};
pub use portfolio::PortfolioScreen;
pub use settings::SettingsScreen;

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::form_field::FormField;
use super::keybindings::ShortcutContext;
use crate::config::Config;
use crate::flows::{Deferred, StepSequencer, StepStatus};
use crate::navigation::View;
use crate::session::Credentials;
use crate::types::{Node, OrderRecord};

/// What a key press asks the app to do beyond the screen itself
pub enum ScreenAction {
    None,
    Quit,
    /// Leave to the view's parent
    Back,
    Navigate(View),
    Login(Credentials),
    ClaimConfirmed(Deferred<Node>),
    OrderPlaced(OrderRecord),
    SaveConfig(Box<Config>),
}

pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction;

    /// While true every key goes to the screen, so letters are typed rather
    /// than treated as shortcuts
    fn captures_input(&self) -> bool {
        false
    }

    fn context(&self) -> ShortcutContext {
        ShortcutContext::Browse
    }
}

/// `/` search line shared by the list screens
pub struct SearchBox {
    field: FormField,
    editing: bool,
}

impl SearchBox {
    pub fn new(placeholder: &str) -> Self {
        Self {
            field: FormField::text("", placeholder),
            editing: false,
        }
    }

    pub fn value(&self) -> String {
        self.field.value()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn start(&mut self) {
        self.editing = true;
    }

    /// Feed a key while editing; returns true when the text changed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                self.editing = false;
                false
            }
            KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete => self.field.handle_key(key),
            other => {
                self.field.handle_key(other);
                false
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let label_style = if self.editing {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let [label_area, field_area] = split_label(area, 3);
        frame.render_widget(Paragraph::new(Span::styled("/ ", label_style)), label_area);
        self.field.render(frame, field_area, self.editing);
    }
}

fn split_label(area: Rect, label_width: u16) -> [Rect; 2] {
    let width = label_width.min(area.width);
    [
        Rect { width, ..area },
        Rect {
            x: area.x + width,
            width: area.width - width,
            ..area
        },
    ]
}

/// `✓ Basic Info ─ ● Technical ─ ○ Verification` header for stepped flows
pub fn step_strip(titles: &[&str], sequencer: &StepSequencer) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        let step = i + 1;
        if i > 0 {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let (mark, style) = match sequencer.status(step) {
            StepStatus::Completed => ("✓", Style::default().fg(Color::Green)),
            StepStatus::Current => (
                "●",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            StepStatus::Pending => ("○", Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(format!("{mark} {step}. {title}"), style));
    }
    Line::from(spans)
}

/// `Label: value` row used by detail panels
pub fn field_line(label: &str, value: impl Into<Span<'static>>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<14}"), Style::default().fg(Color::Gray)),
        value.into(),
    ])
}

pub fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    ))
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, Terminal};

    use super::Screen;

    /// Draw a screen into an in-memory terminal and return its text, row by row
    pub fn render_text(screen: &mut dyn Screen, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area(), true))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_box_edits_until_enter() {
        let mut search = SearchBox::new("Search");
        assert!(!search.is_editing());
        search.start();
        assert!(search.handle_key(KeyCode::Char('o')));
        assert!(search.handle_key(KeyCode::Char('r')));
        assert!(!search.handle_key(KeyCode::Enter));
        assert!(!search.is_editing());
        assert_eq!(search.value(), "or");
    }

    #[test]
    fn test_step_strip_marks_progress() {
        let mut sequencer = StepSequencer::new(3);
        sequencer.advance();
        let line = step_strip(&["One", "Two", "Three"], &sequencer).to_string();
        assert_eq!(line, "✓ 1. One ─ ● 2. Two ─ ○ 3. Three");
    }

    #[test]
    fn test_split_label_never_overflows() {
        let [label, rest] = split_label(Rect::new(0, 0, 2, 1), 3);
        assert_eq!(label.width, 2);
        assert_eq!(rest.width, 0);
    }
}
