use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{Screen, ScreenAction};
use crate::catalog::{Catalog, StatCard};
use crate::navigation::View;
use crate::types::{Asset, Node};
use crate::ui::panels::{
    category_color, highlight_style, panel_block, select_next, select_prev, status_span,
    trend_span,
};

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DashboardPanel {
    Assets,
    Nodes,
}

pub struct DashboardScreen {
    stats: Vec<StatCard>,
    assets: Vec<Asset>,
    nodes: Vec<Node>,
    panel: DashboardPanel,
    assets_state: TableState,
    nodes_state: TableState,
}

impl DashboardScreen {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            stats: catalog.dashboard_stats(),
            assets: catalog.recent_assets(RECENT_LIMIT).into_iter().cloned().collect(),
            nodes: catalog.active_nodes(RECENT_LIMIT).into_iter().cloned().collect(),
            panel: DashboardPanel::Assets,
            assets_state: TableState::default().with_selected(Some(0)),
            nodes_state: TableState::default().with_selected(Some(0)),
        }
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let constraints = vec![Constraint::Ratio(1, self.stats.len().max(1) as u32); self.stats.len()];
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (card, stat) in cards.iter().zip(&self.stats) {
            let text = vec![
                Line::from(Span::styled(
                    stat.value.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(trend_span(stat.trend, stat.change.to_string())),
            ];
            let widget = Paragraph::new(text).block(
                Block::default()
                    .title(Span::styled(stat.title, Style::default().fg(Color::Gray)))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(widget, *card);
        }
    }

    fn render_assets(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let rows = self.assets.iter().map(|asset| {
            Row::new(vec![
                Line::from(vec![
                    Span::raw(asset.name.clone()),
                    Span::styled(
                        format!(" {}", asset.symbol),
                        Style::default().fg(category_color(asset.category)),
                    ),
                ]),
                Line::from(asset.price.to_string()),
                Line::from(trend_span(asset.trend(), asset.change_display())),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Min(18),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(Row::new(vec!["Asset", "Price", "24h"]).style(Style::default().fg(Color::Gray)))
        .block(panel_block("Recent Assets", focused && self.panel == DashboardPanel::Assets))
        .row_highlight_style(highlight_style())
        .highlight_symbol("> ");
        frame.render_stateful_widget(table, area, &mut self.assets_state);
    }

    fn render_nodes(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let rows = self.nodes.iter().map(|node| {
            Row::new(vec![
                Line::from(node.alias.clone()),
                Line::from(status_span(node.status.label())),
                Line::from(node.capacity.to_string()),
                Line::from(node.channels.to_string()),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Min(14),
                Constraint::Length(9),
                Constraint::Length(10),
                Constraint::Length(8),
            ],
        )
        .header(
            Row::new(vec!["Node", "Status", "Capacity", "Channels"])
                .style(Style::default().fg(Color::Gray)),
        )
        .block(panel_block("Active Nodes", focused && self.panel == DashboardPanel::Nodes))
        .row_highlight_style(highlight_style())
        .highlight_symbol("> ");
        frame.render_stateful_widget(table, area, &mut self.nodes_state);
    }
}

impl Screen for DashboardScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);
        self.render_stats(frame, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        self.render_assets(frame, columns[0], focused);
        self.render_nodes(frame, columns[1], focused);
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        match key {
            KeyCode::Left | KeyCode::Char('h') => self.panel = DashboardPanel::Assets,
            KeyCode::Right | KeyCode::Char('l') => self.panel = DashboardPanel::Nodes,
            KeyCode::Down | KeyCode::Char('j') => match self.panel {
                DashboardPanel::Assets => select_next(&mut self.assets_state, self.assets.len()),
                DashboardPanel::Nodes => select_next(&mut self.nodes_state, self.nodes.len()),
            },
            KeyCode::Up | KeyCode::Char('k') => match self.panel {
                DashboardPanel::Assets => select_prev(&mut self.assets_state, self.assets.len()),
                DashboardPanel::Nodes => select_prev(&mut self.nodes_state, self.nodes.len()),
            },
            KeyCode::Enter => {
                let view = match self.panel {
                    DashboardPanel::Assets => self
                        .assets_state
                        .selected()
                        .and_then(|i| self.assets.get(i))
                        .map(|asset| View::asset_details(asset.clone())),
                    DashboardPanel::Nodes => self
                        .nodes_state
                        .selected()
                        .and_then(|i| self.nodes.get(i))
                        .map(|node| View::node_profile(node.clone())),
                };
                if let Some(view) = view {
                    return ScreenAction::Navigate(view);
                }
            }
            _ => {}
        }
        ScreenAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::ViewId;
    use crate::ui::screens::test_support::render_text;

    #[test]
    fn test_enter_opens_selected_asset() {
        let mut screen = DashboardScreen::new(&Catalog::builtin());
        screen.handle_key(KeyCode::Char('j'));
        match screen.handle_key(KeyCode::Enter) {
            ScreenAction::Navigate(view) => {
                assert_eq!(view.id(), ViewId::AssetDetails);
                assert_eq!(view, View::asset_details(screen.assets[1].clone()));
            }
            _ => panic!("expected navigation"),
        }
    }

    #[test]
    fn test_right_switches_to_nodes() {
        let mut screen = DashboardScreen::new(&Catalog::builtin());
        screen.handle_key(KeyCode::Right);
        match screen.handle_key(KeyCode::Enter) {
            ScreenAction::Navigate(view) => assert_eq!(view.id(), ViewId::NodeProfile),
            _ => panic!("expected navigation"),
        }
    }

    #[test]
    fn test_renders_stats_and_lists() {
        let mut screen = DashboardScreen::new(&Catalog::builtin());
        let text = render_text(&mut screen, 120, 24);
        assert!(text.contains("Recent Assets"));
        assert!(text.contains("Active Nodes"));
        assert!(text.contains(screen.stats[0].title));
    }
}
