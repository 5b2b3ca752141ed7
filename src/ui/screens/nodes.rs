use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table, TableState},
    Frame,
};

use super::{field_line, Screen, ScreenAction, SearchBox};
use crate::catalog::{Catalog, NodeQuery};
use crate::navigation::View;
use crate::types::{Channel, Node, NodePayment, Peer};
use crate::ui::panels::{
    clamp_selection, highlight_style, panel_block, select_next, select_prev, status_span,
};

pub struct NodeExplorerScreen {
    nodes: Vec<Node>,
    query: NodeQuery,
    search: SearchBox,
    state: TableState,
}

impl NodeExplorerScreen {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            nodes: catalog.nodes().to_vec(),
            query: NodeQuery::default(),
            search: SearchBox::new("Search by name, alias or pubkey"),
            state: TableState::default().with_selected(Some(0)),
        }
    }

    fn visible(&self) -> Vec<&Node> {
        self.query.apply(&self.nodes)
    }
}

impl Screen for NodeExplorerScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        self.search.render(frame, chunks[0]);

        let rows: Vec<Row> = self
            .visible()
            .into_iter()
            .map(|node| {
                let mut name = vec![Span::raw(node.name.clone())];
                if node.is_owned {
                    name.push(Span::styled(" ★", Style::default().fg(Color::LightRed)));
                }
                Row::new(vec![
                    Line::from(name),
                    Line::from(node.alias.clone()),
                    Line::from(status_span(node.status.label())),
                    Line::from(node.capacity.to_string()),
                    Line::from(node.channels.to_string()),
                    Line::from(node.uptime_display()),
                    Line::from(node.location.clone()),
                    Line::from(node.short_pubkey()),
                ])
            })
            .collect();

        let title = format!("Node Explorer ({} nodes)", self.nodes.len());
        let table = Table::new(
            rows,
            [
                Constraint::Min(18),
                Constraint::Length(14),
                Constraint::Length(9),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Length(8),
                Constraint::Length(14),
                Constraint::Length(16),
            ],
        )
        .header(
            Row::new(vec![
                "Name", "Alias", "Status", "Capacity", "Channels", "Uptime", "Location", "Pubkey",
            ])
            .style(Style::default().fg(Color::Gray)),
        )
        .block(panel_block(&title, focused && !self.search.is_editing()))
        .row_highlight_style(highlight_style())
        .highlight_symbol("> ");
        frame.render_stateful_widget(table, chunks[1], &mut self.state);
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        if self.search.is_editing() {
            if self.search.handle_key(key) {
                self.query.search = self.search.value();
                let len = self.visible().len();
                clamp_selection(&mut self.state, len);
            }
            return ScreenAction::None;
        }

        match key {
            KeyCode::Char('/') => self.search.start(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible().len();
                select_next(&mut self.state, len);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.visible().len();
                select_prev(&mut self.state, len);
            }
            KeyCode::Enter => {
                let selected = self
                    .state
                    .selected()
                    .and_then(|i| self.visible().get(i).map(|node| (*node).clone()));
                if let Some(node) = selected {
                    return ScreenAction::Navigate(View::node_profile(node));
                }
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn captures_input(&self) -> bool {
        self.search.is_editing()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileTab {
    Channels,
    Peers,
    Payments,
}

impl ProfileTab {
    fn next(self) -> Self {
        match self {
            ProfileTab::Channels => ProfileTab::Peers,
            ProfileTab::Peers => ProfileTab::Payments,
            ProfileTab::Payments => ProfileTab::Channels,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ProfileTab::Channels => "Channels",
            ProfileTab::Peers => "Peers",
            ProfileTab::Payments => "Payments",
        }
    }
}

pub struct NodeProfileScreen {
    node: Node,
    channels: Vec<Channel>,
    peers: Vec<Peer>,
    payments: Vec<NodePayment>,
    tab: ProfileTab,
    state: TableState,
}

impl NodeProfileScreen {
    pub fn new(node: Node, catalog: &Catalog) -> Self {
        // A freshly claimed node has no channel history yet
        let (channels, peers, payments) = if node.channels == 0 {
            (Vec::new(), Vec::new(), Vec::new())
        } else {
            (
                catalog.channels(&node),
                catalog.peers(&node),
                catalog.payments(&node),
            )
        };
        Self {
            node,
            channels,
            peers,
            payments,
            tab: ProfileTab::Channels,
            state: TableState::default().with_selected(Some(0)),
        }
    }

    fn tab_len(&self) -> usize {
        match self.tab {
            ProfileTab::Channels => self.channels.len(),
            ProfileTab::Peers => self.peers.len(),
            ProfileTab::Payments => self.payments.len(),
        }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let node = &self.node;
        let mut title = vec![Span::styled(
            node.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if node.is_owned {
            title.push(Span::styled(
                "  ★ Your node",
                Style::default().fg(Color::LightRed),
            ));
        }
        let lines = vec![
            Line::from(title),
            Line::from(""),
            field_line("Alias", Span::raw(node.alias.clone())),
            field_line("Status", status_span(node.status.label())),
            field_line("Capacity", Span::raw(node.capacity.to_string())),
            field_line("Channels", Span::raw(node.channels.to_string())),
            field_line("Uptime", Span::raw(node.uptime_display())),
            field_line("Location", Span::raw(node.location.clone())),
            field_line("Fees", Span::raw(node.fees.clone())),
            field_line("Last update", Span::raw(node.last_update.clone())),
            field_line("Pubkey", Span::raw(node.pubkey.clone())),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Node Profile", false)),
            area,
        );
    }

    fn render_tab(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let header_style = Style::default().fg(Color::Gray);
        let title = format!("{} [t]", self.tab.title());
        let table = match self.tab {
            ProfileTab::Channels => Table::new(
                self.channels.iter().map(|c| {
                    Row::new(vec![
                        Line::from(c.peer.clone()),
                        Line::from(c.capacity.to_string()),
                        Line::from(c.local.to_string()),
                        Line::from(c.remote.to_string()),
                        Line::from(status_span(c.status.label())),
                    ])
                }),
                [
                    Constraint::Min(14),
                    Constraint::Length(10),
                    Constraint::Length(10),
                    Constraint::Length(10),
                    Constraint::Length(9),
                ],
            )
            .header(
                Row::new(vec!["Peer", "Capacity", "Local", "Remote", "Status"]).style(header_style),
            ),
            ProfileTab::Peers => Table::new(
                self.peers.iter().map(|p| {
                    Row::new(vec![
                        Line::from(p.alias.clone()),
                        Line::from(p.pubkey.clone()),
                        Line::from(p.channels.to_string()),
                        Line::from(p.capacity.to_string()),
                        Line::from(status_span(p.status_label())),
                    ])
                }),
                [
                    Constraint::Length(14),
                    Constraint::Min(16),
                    Constraint::Length(9),
                    Constraint::Length(10),
                    Constraint::Length(13),
                ],
            )
            .header(
                Row::new(vec!["Alias", "Pubkey", "Channels", "Capacity", "Status"])
                    .style(header_style),
            ),
            ProfileTab::Payments => Table::new(
                self.payments.iter().map(|p| {
                    Row::new(vec![
                        Line::from(p.kind.label()),
                        Line::from(p.amount.to_string()),
                        Line::from(p.fee.to_string()),
                        Line::from(status_span(p.status_label())),
                        Line::from(p.time.clone()),
                    ])
                }),
                [
                    Constraint::Length(10),
                    Constraint::Length(12),
                    Constraint::Length(12),
                    Constraint::Length(9),
                    Constraint::Min(10),
                ],
            )
            .header(
                Row::new(vec!["Type", "Amount", "Fee", "Status", "Time"]).style(header_style),
            ),
        };

        if self.tab_len() == 0 {
            let empty = Paragraph::new(Span::styled(
                format!("No {} yet", self.tab.title().to_lowercase()),
                Style::default().fg(Color::DarkGray),
            ))
            .block(panel_block(&title, focused));
            frame.render_widget(empty, area);
            return;
        }

        let table = table
            .block(panel_block(&title, focused))
            .row_highlight_style(highlight_style())
            .highlight_symbol("> ");
        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

impl Screen for NodeProfileScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(13), Constraint::Min(0)])
            .split(area);
        self.render_summary(frame, chunks[0]);
        self.render_tab(frame, chunks[1], focused);
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        match key {
            KeyCode::Char('t') => {
                self.tab = self.tab.next();
                self.state.select(Some(0));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.tab_len();
                select_next(&mut self.state, len);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.tab_len();
                select_prev(&mut self.state, len);
            }
            _ => {}
        }
        ScreenAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screens::test_support::render_text;

    #[test]
    fn test_search_then_open_profile() {
        let catalog = Catalog::builtin();
        let mut screen = NodeExplorerScreen::new(&catalog);
        let alias = catalog.nodes()[1].alias.clone();
        screen.handle_key(KeyCode::Char('/'));
        for c in alias.chars() {
            screen.handle_key(KeyCode::Char(c));
        }
        screen.handle_key(KeyCode::Enter);
        assert!(!screen.captures_input());
        match screen.handle_key(KeyCode::Enter) {
            ScreenAction::Navigate(View::NodeProfile(node)) => assert_eq!(node.alias, alias),
            _ => panic!("expected node profile"),
        }
    }

    #[test]
    fn test_profile_tabs_cycle() {
        let catalog = Catalog::builtin();
        let node = catalog.nodes()[0].clone();
        let mut screen = NodeProfileScreen::new(node.clone(), &catalog);
        assert!(render_text(&mut screen, 120, 30).contains("Channels [t]"));
        screen.handle_key(KeyCode::Char('t'));
        assert!(render_text(&mut screen, 120, 30).contains("Peers [t]"));
        screen.handle_key(KeyCode::Char('t'));
        assert!(render_text(&mut screen, 120, 30).contains("Payments [t]"));
        screen.handle_key(KeyCode::Char('t'));
        assert_eq!(screen.tab, ProfileTab::Channels);
    }

    #[test]
    fn test_new_node_has_empty_history() {
        let catalog = Catalog::builtin();
        let mut node = catalog.nodes()[0].clone();
        node.channels = 0;
        node.is_owned = true;
        let mut screen = NodeProfileScreen::new(node, &catalog);
        let text = render_text(&mut screen, 120, 30);
        assert!(text.contains("No channels yet"));
        assert!(text.contains("Your node"));
    }
}
