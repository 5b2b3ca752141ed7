use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, TableState},
    Frame,
};

use crate::navigation::{SidebarItem, SIDEBAR};
use crate::types::{status_tone, AssetCategory, OrderSide, StatusTone, Trend};

/// Badge colour for any status word (orders, nodes, peers, payments)
pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Positive => Color::Green,
        StatusTone::Waiting => Color::Yellow,
        StatusTone::Negative => Color::Red,
        StatusTone::Neutral => Color::Gray,
    }
}

pub fn status_span(label: &str) -> Span<'static> {
    Span::styled(
        label.to_string(),
        Style::default().fg(tone_color(status_tone(label))),
    )
}

pub fn category_color(category: AssetCategory) -> Color {
    match category {
        AssetCategory::Collectibles => Color::Magenta,
        AssetCategory::Utility => Color::Blue,
        AssetCategory::Defi => Color::Green,
        AssetCategory::Protocol => Color::LightRed,
    }
}

pub fn trend_span(trend: Trend, text: String) -> Span<'static> {
    let (arrow, color) = match trend {
        Trend::Up => ("▲ ", Color::Green),
        Trend::Down => ("▼ ", Color::Red),
    };
    Span::styled(format!("{arrow}{text}"), Style::default().fg(color))
}

pub fn side_span(side: OrderSide) -> Span<'static> {
    let color = match side {
        OrderSide::Buy => Color::Green,
        OrderSide::Sell => Color::Red,
    };
    Span::styled(side.label(), Style::default().fg(color))
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Titled block used by every content panel
pub fn panel_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_style(focused))
}

pub fn highlight_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Move a table selection down, wrapping at the end
pub fn select_next(state: &mut TableState, len: usize) {
    if len > 0 {
        let i = state
            .selected()
            .map_or(0, |i| if i >= len - 1 { 0 } else { i + 1 });
        state.select(Some(i));
    }
}

/// Move a table selection up, wrapping at the start
pub fn select_prev(state: &mut TableState, len: usize) {
    if len > 0 {
        let i = state
            .selected()
            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
        state.select(Some(i));
    }
}

/// Keep a selection inside a list that may have shrunk after filtering
pub fn clamp_selection(state: &mut TableState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(i), len) if i >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

pub struct HeaderBar<'a> {
    pub version: &'static str,
    pub view_label: &'a str,
    /// Shown while a simulated request is in flight
    pub pending: Option<&'a str>,
}

impl HeaderBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " ⚡ Orange Pages",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" v{}", self.version),
                Style::default().fg(Color::Gray),
            ),
            Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.view_label.to_string(), Style::default().fg(Color::White)),
        ];

        if let Some(pending) = self.pending {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("⏳ {pending}"),
                Style::default().fg(Color::Yellow),
            ));
        }

        let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(bar, area);
    }
}

pub struct Sidebar {
    pub state: ListState,
}

impl Sidebar {
    pub fn new() -> Self {
        Self {
            state: ListState::default().with_selected(Some(0)),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, selected: usize, focused: bool) {
        self.state.select(Some(selected));

        let items: Vec<ListItem> = SIDEBAR
            .iter()
            .map(|item| {
                let style = match item {
                    SidebarItem::ClaimNode => Style::default().fg(Color::LightRed),
                    SidebarItem::Logout => Style::default().fg(Color::DarkGray),
                    SidebarItem::Go(_) => Style::default().fg(Color::White),
                };
                ListItem::new(Span::styled(item.label(), style))
            })
            .collect();

        let list = List::new(items)
            .block(panel_block("Menu", focused))
            .highlight_style(if focused {
                highlight_style()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            })
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

pub struct StatusBar<'a> {
    pub message: Option<&'a str>,
    pub hint: &'a str,
}

impl StatusBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if let Some(message) = self.message {
            spans.push(Span::styled(
                format!(" {message}  "),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(
            format!(" {}  ? help  q quit", self.hint),
            Style::default().fg(Color::DarkGray),
        ));

        let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
        frame.render_widget(bar, area);
    }
}
