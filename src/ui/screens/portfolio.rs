use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table, TableState},
    Frame,
};

use super::{Screen, ScreenAction, SearchBox};
use crate::catalog::{Catalog, HoldingQuery};
use crate::flows::CheckoutSeed;
use crate::navigation::View;
use crate::types::{Asset, Btc, Holding};
use crate::ui::panels::{
    category_color, clamp_selection, highlight_style, panel_block, select_next, select_prev,
    trend_span,
};

/// "Manage Assets": the user's holdings
pub struct PortfolioScreen {
    holdings: Vec<Holding>,
    assets: Vec<Asset>,
    total: Btc,
    query: HoldingQuery,
    search: SearchBox,
    state: TableState,
}

impl PortfolioScreen {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            holdings: catalog.holdings().to_vec(),
            assets: catalog.assets().to_vec(),
            total: catalog.portfolio_value(),
            query: HoldingQuery::default(),
            search: SearchBox::new("Search holdings"),
            state: TableState::default().with_selected(Some(0)),
        }
    }

    fn visible(&self) -> Vec<&Holding> {
        self.query.apply(&self.holdings)
    }

    fn selected(&self) -> Option<&Holding> {
        let index = self.state.selected()?;
        self.visible().get(index).copied()
    }

    fn asset_for(&self, holding: &Holding) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == holding.asset_id)
    }
}

impl Screen for PortfolioScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let summary = Line::from(vec![
            Span::styled("Portfolio value ", Style::default().fg(Color::Gray)),
            Span::styled(
                self.total.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Type: ", Style::default().fg(Color::Gray)),
            Span::raw(self.query.category.label()),
            Span::styled(
                format!("   {} holdings", self.holdings.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(summary), chunks[0]);
        self.search.render(frame, chunks[1]);

        let rows: Vec<Row> = self
            .visible()
            .into_iter()
            .map(|holding| {
                Row::new(vec![
                    Line::from(holding.name.clone()),
                    Line::from(holding.symbol.clone()),
                    Line::from(Span::styled(
                        holding.category.label(),
                        Style::default().fg(category_color(holding.category)),
                    )),
                    Line::from(holding.balance.normalize().to_string()),
                    Line::from(holding.value.to_string()),
                    Line::from(trend_span(holding.trend(), holding.change_display())),
                    Line::from(holding.last_transaction.clone()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(18),
                Constraint::Length(7),
                Constraint::Length(13),
                Constraint::Length(10),
                Constraint::Length(11),
                Constraint::Length(10),
                Constraint::Length(14),
            ],
        )
        .header(
            Row::new(vec![
                "Asset", "Symbol", "Type", "Balance", "Value", "24h", "Last activity",
            ])
            .style(Style::default().fg(Color::Gray)),
        )
        .block(panel_block(
            "Manage Assets  b buy more · x sell",
            focused && !self.search.is_editing(),
        ))
        .row_highlight_style(highlight_style())
        .highlight_symbol("> ");
        frame.render_stateful_widget(table, chunks[2], &mut self.state);
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
            KeyCode::Char('f') => {
                self.query.category = self.query.category.next();
                let len = self.visible().len();
                clamp_selection(&mut self.state, len);
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
                if let Some(asset) = self.selected().and_then(|h| self.asset_for(h)) {
                    return ScreenAction::Navigate(View::asset_details(asset.clone()));
                }
            }
            KeyCode::Char('b') => {
                if let Some(asset) = self.selected().and_then(|h| self.asset_for(h)) {
                    return ScreenAction::Navigate(View::Checkout(Some(CheckoutSeed::buy(asset))));
                }
            }
            KeyCode::Char('x') => {
                if let Some(holding) = self.selected() {
                    return ScreenAction::Navigate(View::Checkout(Some(CheckoutSeed::sell(
                        holding,
                    ))));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderSide;
    use crate::ui::screens::test_support::render_text;

    #[test]
    fn test_sell_seeds_checkout_from_holding() {
        let catalog = Catalog::builtin();
        let mut screen = PortfolioScreen::new(&catalog);
        let first = catalog.holdings()[0].clone();
        match screen.handle_key(KeyCode::Char('x')) {
            ScreenAction::Navigate(View::Checkout(Some(seed))) => {
                assert_eq!(seed.side, OrderSide::Sell);
                assert_eq!(seed.symbol, first.symbol);
                assert_eq!(seed.unit_price, first.unit_price());
            }
            _ => panic!("expected sell checkout"),
        }
    }

    #[test]
    fn test_filter_cycles_type() {
        let mut screen = PortfolioScreen::new(&Catalog::builtin());
        let all = screen.visible().len();
        screen.handle_key(KeyCode::Char('f'));
        assert!(screen.visible().len() <= all);
        assert!(screen
            .visible()
            .iter()
            .all(|h| screen.query.category.matches(h.category)));
    }

    #[test]
    fn test_shows_portfolio_value() {
        let catalog = Catalog::builtin();
        let mut screen = PortfolioScreen::new(&catalog);
        let text = render_text(&mut screen, 120, 20);
        assert!(text.contains(&catalog.portfolio_value().to_string()));
    }
}
