use std::path::PathBuf;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use super::{field_line, Screen, ScreenAction};
use crate::config::Config;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::{highlight_style, panel_block};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const TICK_STEP_MS: u64 = 50;
const DELAY_STEP_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    LogLevel,
    LogToFile,
    TickRate,
    ClaimDelay,
    LoginDelay,
}

impl Setting {
    const ALL: [Setting; 5] = [
        Setting::LogLevel,
        Setting::LogToFile,
        Setting::TickRate,
        Setting::ClaimDelay,
        Setting::LoginDelay,
    ];

    fn label(self) -> &'static str {
        match self {
            Setting::LogLevel => "Log level",
            Setting::LogToFile => "Log to file",
            Setting::TickRate => "Tick rate",
            Setting::ClaimDelay => "Claim delay",
            Setting::LoginDelay => "Login delay",
        }
    }

    fn display(self, config: &Config) -> String {
        match self {
            Setting::LogLevel => config.logging.level.clone(),
            Setting::LogToFile => if config.logging.to_file { "on" } else { "off" }.to_string(),
            Setting::TickRate => format!("{} ms", config.ui.tick_rate_ms),
            Setting::ClaimDelay => format!("{} ms", config.flows.claim_delay_ms),
            Setting::LoginDelay => format!("{} ms", config.flows.login_delay_ms),
        }
    }

    /// Step the value forward (`up`) or back
    fn adjust(self, config: &mut Config, up: bool) {
        let step = |value: u64, by: u64, min: u64| {
            if up {
                value.saturating_add(by)
            } else {
                value.saturating_sub(by).max(min)
            }
        };
        match self {
            Setting::LogLevel => {
                let current = LOG_LEVELS
                    .iter()
                    .position(|l| *l == config.logging.level)
                    .unwrap_or(2);
                let next = if up {
                    (current + 1) % LOG_LEVELS.len()
                } else {
                    (current + LOG_LEVELS.len() - 1) % LOG_LEVELS.len()
                };
                config.logging.level = LOG_LEVELS[next].to_string();
            }
            Setting::LogToFile => config.logging.to_file = !config.logging.to_file,
            Setting::TickRate => {
                config.ui.tick_rate_ms = step(config.ui.tick_rate_ms, TICK_STEP_MS, TICK_STEP_MS)
            }
            Setting::ClaimDelay => {
                config.flows.claim_delay_ms = step(config.flows.claim_delay_ms, DELAY_STEP_MS, 0)
            }
            Setting::LoginDelay => {
                config.flows.login_delay_ms = step(config.flows.login_delay_ms, DELAY_STEP_MS, 0)
            }
        }
    }
}

pub struct SettingsScreen {
    config: Config,
    session_file: PathBuf,
    log_file: Option<PathBuf>,
    state: ListState,
    dirty: bool,
}

impl SettingsScreen {
    pub fn new(config: &Config, session_file: PathBuf, log_file: Option<PathBuf>) -> Self {
        Self {
            config: config.clone(),
            session_file,
            log_file,
            state: ListState::default().with_selected(Some(0)),
            dirty: false,
        }
    }

    fn selected(&self) -> Setting {
        Setting::ALL[self.state.selected().unwrap_or(0) % Setting::ALL.len()]
    }

    fn adjust(&mut self, up: bool) {
        self.selected().adjust(&mut self.config, up);
        self.dirty = true;
    }
}

impl Screen for SettingsScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Setting::ALL.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(area);

        let items: Vec<ListItem> = Setting::ALL
            .iter()
            .map(|setting| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<14}", setting.label()),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("◀ {} ▶", setting.display(&self.config)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect();
        let title = if self.dirty {
            "Settings (unsaved, w to save)"
        } else {
            "Settings"
        };
        let list = List::new(items)
            .block(panel_block(title, focused))
            .highlight_style(highlight_style())
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[0], &mut self.state);

        let mut lines = vec![
            field_line("State dir", Span::raw(self.config.state_path().display().to_string())),
            field_line("Session file", Span::raw(self.session_file.display().to_string())),
            field_line(
                "Fee rate",
                Span::raw(format!(
                    "{}%",
                    (self.config.flows.fee_rate * Decimal::from(100)).normalize()
                )),
            ),
        ];
        if let Some(log_file) = &self.log_file {
            lines.push(field_line("Log file", Span::raw(log_file.display().to_string())));
        }
        if let Some(path) = Config::user_config_path() {
            lines.push(field_line("Config file", Span::raw(path.display().to_string())));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "←/→ change · w save · log changes apply on next start",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Paths", false)),
            chunks[1],
        );
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        let len = Setting::ALL.len();
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.state.selected().map_or(0, |i| (i + 1) % len);
                self.state.select(Some(i));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self.state.selected().map_or(0, |i| (i + len - 1) % len);
                self.state.select(Some(i));
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::Enter => {
                self.adjust(true)
            }
            KeyCode::Left | KeyCode::Char('h') => self.adjust(false),
            KeyCode::Char('w') => {
                self.dirty = false;
                return ScreenAction::SaveConfig(Box::new(self.config.clone()));
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn context(&self) -> ShortcutContext {
        ShortcutContext::Global
    }
}
