use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::{field_line, Screen, ScreenAction, SearchBox};
use crate::flows::{milestones, progress};
use crate::navigation::View;
use crate::orders::{OrderBook, OrderQuery, OrderStats, SideTab};
use crate::types::{OrderRecord, OrderStatus};
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::{
    clamp_selection, highlight_style, panel_block, select_next, select_prev, side_span,
    status_span,
};

pub struct OrdersScreen {
    orders: Vec<OrderRecord>,
    stats: OrderStats,
    query: OrderQuery,
    search: SearchBox,
    state: TableState,
}

impl OrdersScreen {
    pub fn new(book: &OrderBook) -> Self {
        Self {
            orders: book.orders().to_vec(),
            stats: book.stats(),
            query: OrderQuery::default(),
            search: SearchBox::new("Search by asset, symbol or order id"),
            state: TableState::default().with_selected(Some(0)),
        }
    }

    fn visible(&self) -> Vec<&OrderRecord> {
        self.orders.iter().filter(|o| self.query.matches(o)).collect()
    }

    fn clamp(&mut self) {
        let len = self.visible().len();
        clamp_selection(&mut self.state, len);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);
        let figures = [
            ("Total Orders", self.stats.total.to_string(), Color::White),
            ("Completed", self.stats.completed.to_string(), Color::Green),
            ("Pending", self.stats.pending.to_string(), Color::Yellow),
            ("Total Volume", self.stats.volume_display(), Color::LightRed),
        ];
        for (card, (title, value, color)) in cards.iter().zip(figures) {
            let widget = Paragraph::new(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .block(
                Block::default()
                    .title(Span::styled(title, Style::default().fg(Color::Gray)))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(widget, *card);
        }
    }

    fn tab_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("Type: ", Style::default().fg(Color::Gray))];
        for tab in SideTab::all() {
            let style = if *tab == self.query.side {
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(tab.label(), style));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(" Status: ", Style::default().fg(Color::Gray)));
        spans.push(Span::raw(self.query.status.label()));
        Line::from(spans)
    }
}

impl Screen for OrdersScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        self.render_stats(frame, chunks[0]);
        self.search.render(frame, chunks[1]);
        frame.render_widget(Paragraph::new(self.tab_line()), chunks[2]);

        let rows: Vec<Row> = self
            .visible()
            .into_iter()
            .map(|order| {
                Row::new(vec![
                    Line::from(order.id.clone()),
                    Line::from(side_span(order.side)),
                    Line::from(format!("{} ({})", order.asset, order.symbol)),
                    Line::from(order.quantity_display()),
                    Line::from(order.price.to_string()),
                    Line::from(order.grand_total().to_string()),
                    Line::from(status_span(order.status.label())),
                    Line::from(order.date_display()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(17),
                Constraint::Length(5),
                Constraint::Min(20),
                Constraint::Length(9),
                Constraint::Length(11),
                Constraint::Length(11),
                Constraint::Length(11),
                Constraint::Length(17),
            ],
        )
        .header(
            Row::new(vec![
                "Order", "Type", "Asset", "Amount", "Price", "Total", "Status", "Date",
            ])
            .style(Style::default().fg(Color::Gray)),
        )
        .block(panel_block("Orders", focused && !self.search.is_editing()))
        .row_highlight_style(highlight_style())
        .highlight_symbol("> ");
        frame.render_stateful_widget(table, chunks[3], &mut self.state);
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        if self.search.is_editing() {
            if self.search.handle_key(key) {
                self.query.search = self.search.value();
                self.clamp();
            }
            return ScreenAction::None;
        }

        match key {
            KeyCode::Char('/') => self.search.start(),
            KeyCode::Char('f') => {
                self.query.status = self.query.status.next();
                self.clamp();
            }
            KeyCode::Char('t') => {
                self.query.side = self.query.side.next();
                self.clamp();
            }
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
                    .and_then(|i| self.visible().get(i).map(|o| (*o).clone()));
                if let Some(order) = selected {
                    return ScreenAction::Navigate(View::order_status(order));
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

/// Progress of one order through its four milestones
pub struct OrderStatusScreen {
    order: OrderRecord,
}

impl OrderStatusScreen {
    pub fn new(order: OrderRecord) -> Self {
        Self { order }
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let status = self.order.status;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let percent = progress::progress_percent(status);
        let gauge = Gauge::default()
            .block(panel_block("Progress", focused))
            .gauge_style(Style::default().fg(if status == OrderStatus::Completed {
                Color::Green
            } else {
                Color::LightRed
            }))
            .percent(percent)
            .label(format!(
                "{} of 4 milestones",
                progress::completed_count(status)
            ));
        frame.render_widget(gauge, chunks[0]);

        let mut lines = Vec::new();
        for state in milestones(status) {
            let (mark, style) = if state.reached {
                ("✓", Style::default().fg(Color::Green))
            } else {
                ("○", Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{mark} "), style),
                Span::styled(
                    state.milestone.title(),
                    style.add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", state.milestone.description()),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel_block("Milestones", false)),
            chunks[1],
        );
    }

    fn render_details(&self, frame: &mut Frame, area: Rect) {
        let order = &self.order;
        let mut lines = vec![
            field_line("Order", Span::raw(order.id.clone())),
            field_line("Status", status_span(order.status.label())),
            field_line("Type", side_span(order.side)),
            field_line("Asset", Span::raw(format!("{} ({})", order.asset, order.symbol))),
            field_line("Amount", Span::raw(order.quantity_display())),
            field_line("Unit price", Span::raw(order.price.to_string())),
            field_line("Subtotal", Span::raw(order.total.to_string())),
            field_line("Fee", Span::raw(order.fee.to_string())),
            field_line(
                "Total",
                Span::styled(
                    order.grand_total().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ),
            field_line("Placed", Span::raw(order.date_display())),
        ];
        if let Some(method) = order.payment_method {
            lines.push(field_line("Payment", Span::raw(method.label())));
            if matches!(order.status, OrderStatus::Pending | OrderStatus::Processing) {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    method.instructions(),
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(panel_block("Order Details", false)),
            area,
        );
    }
}

impl Screen for OrderStatusScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        self.render_progress(frame, columns[0], focused);
        self.render_details(frame, columns[1]);
    }

    fn handle_key(&mut self, _key: KeyCode) -> ScreenAction {
        ScreenAction::None
    }

    fn context(&self) -> ShortcutContext {
        ShortcutContext::Global
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::StatusFilter;
    use crate::ui::screens::test_support::render_text;

    #[test]
    fn test_status_filter_narrows_rows() {
        let mut screen = OrdersScreen::new(&OrderBook::seeded());
        let total = screen.visible().len();
        screen.handle_key(KeyCode::Char('f'));
        assert_ne!(screen.query.status, StatusFilter::All);
        let filtered = screen.visible();
        assert!(filtered.len() < total);
        assert!(filtered.iter().all(|o| screen.query.status.matches(o.status)));
    }

    #[test]
    fn test_side_tab_cycles() {
        let mut screen = OrdersScreen::new(&OrderBook::seeded());
        screen.handle_key(KeyCode::Char('t'));
        assert_eq!(screen.query.side, SideTab::Buy);
        assert!(screen
            .visible()
            .iter()
            .all(|o| SideTab::Buy.matches(o.side)));
    }

    #[test]
    fn test_enter_opens_order_status() {
        let book = OrderBook::seeded();
        let mut screen = OrdersScreen::new(&book);
        match screen.handle_key(KeyCode::Enter) {
            ScreenAction::Navigate(View::OrderStatus(order)) => {
                assert_eq!(order.id, book.orders()[0].id)
            }
            _ => panic!("expected order status"),
        }
    }

    #[test]
    fn test_stats_render() {
        let mut screen = OrdersScreen::new(&OrderBook::seeded());
        let text = render_text(&mut screen, 140, 20);
        assert!(text.contains("Total Orders"));
        assert!(text.contains("₿0.108"));
    }

    #[test]
    fn test_status_screen_shows_milestones() {
        let mut order = OrderBook::seeded().orders()[0].clone();
        order.status = OrderStatus::Pending;
        let mut screen = OrderStatusScreen::new(order);
        let text = render_text(&mut screen, 120, 30);
        assert!(text.contains("1 of 4 milestones"));
        assert!(text.contains("Order Details"));
    }
}
