use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Sparkline, Table, TableState, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{field_line, Screen, ScreenAction, SearchBox};
use crate::catalog::{AssetQuery, Catalog, HolderShare};
use crate::flows::CheckoutSeed;
use crate::navigation::View;
use crate::types::{Asset, Btc, PricePoint, Trade};
use crate::ui::panels::{
    category_color, clamp_selection, highlight_style, panel_block, select_next, select_prev,
    side_span, trend_span,
};

pub struct AssetDiscoveryScreen {
    assets: Vec<Asset>,
    query: AssetQuery,
    search: SearchBox,
    state: TableState,
}

impl AssetDiscoveryScreen {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            assets: catalog.assets().to_vec(),
            query: AssetQuery::default(),
            search: SearchBox::new("Search assets by name or symbol"),
            state: TableState::default().with_selected(Some(0)),
        }
    }

    fn visible(&self) -> Vec<&Asset> {
        self.query.apply(&self.assets)
    }

    fn selected(&self) -> Option<&Asset> {
        let index = self.state.selected()?;
        self.visible().get(index).copied()
    }

    fn refilter(&mut self) {
        let len = self.visible().len();
        clamp_selection(&mut self.state, len);
    }
}

impl Screen for AssetDiscoveryScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        self.search.render(frame, chunks[0]);

        let count = self.visible().len();
        let filters = Line::from(vec![
            Span::styled("Category: ", Style::default().fg(Color::Gray)),
            Span::raw(self.query.category.label()),
            Span::styled("   Sort: ", Style::default().fg(Color::Gray)),
            Span::raw(self.query.sort.label()),
            Span::styled(
                format!("   {count} of {} assets", self.assets.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(filters), chunks[1]);

        let rows: Vec<Row> = self
            .visible()
            .into_iter()
            .map(|asset| {
                let mut name = vec![Span::raw(asset.name.clone())];
                if asset.is_new {
                    name.push(Span::styled(" NEW", Style::default().fg(Color::LightRed)));
                }
                Row::new(vec![
                    Line::from(name),
                    Line::from(asset.symbol.clone()),
                    Line::from(Span::styled(
                        asset.category.label(),
                        Style::default().fg(category_color(asset.category)),
                    )),
                    Line::from(asset.price.to_string()),
                    Line::from(trend_span(asset.trend(), asset.change_display())),
                    Line::from(asset.volume.compact()),
                    Line::from(asset.market_cap.compact()),
                    Line::from(asset.holders.to_string()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(7),
                Constraint::Length(13),
                Constraint::Length(11),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Length(11),
                Constraint::Length(8),
            ],
        )
        .header(
            Row::new(vec![
                "Name", "Symbol", "Category", "Price", "24h", "Volume", "Market Cap", "Holders",
            ])
            .style(Style::default().fg(Color::Gray)),
        )
        .block(panel_block("Asset Discovery", focused && !self.search.is_editing()))
        .row_highlight_style(highlight_style())
        .highlight_symbol("> ");
        frame.render_stateful_widget(table, chunks[2], &mut self.state);
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        if self.search.is_editing() {
            if self.search.handle_key(key) {
                self.query.search = self.search.value();
                self.refilter();
            }
            return ScreenAction::None;
        }

        match key {
            KeyCode::Char('/') => self.search.start(),
            KeyCode::Char('f') => {
                self.query.category = self.query.category.next();
                self.refilter();
            }
            KeyCode::Char('s') => self.query.sort = self.query.sort.next(),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible().len();
                select_next(&mut self.state, len);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.visible().len();
                select_prev(&mut self.state, len);
            }
            KeyCode::Enter => {
                if let Some(asset) = self.selected() {
                    return ScreenAction::Navigate(View::asset_details(asset.clone()));
                }
            }
            KeyCode::Char('b') => {
                if let Some(asset) = self.selected() {
                    return ScreenAction::Navigate(View::Checkout(Some(CheckoutSeed::buy(asset))));
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
enum DetailTab {
    Trades,
    Holders,
}

pub struct AssetDetailsScreen {
    asset: Asset,
    history: Vec<PricePoint>,
    trades: Vec<Trade>,
    holders: Vec<HolderShare>,
    tab: DetailTab,
    state: TableState,
}

impl AssetDetailsScreen {
    pub fn new(asset: Asset, catalog: &Catalog) -> Self {
        Self {
            history: catalog.price_history(&asset),
            trades: catalog.recent_trades(&asset),
            holders: catalog.top_holders(&asset),
            asset,
            tab: DetailTab::Trades,
            state: TableState::default().with_selected(Some(0)),
        }
    }

    fn tab_len(&self) -> usize {
        match self.tab {
            DetailTab::Trades => self.trades.len(),
            DetailTab::Holders => self.holders.len(),
        }
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let asset = &self.asset;
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", asset.price),
                    Style::default().fg(Color::White),
                ),
                trend_span(asset.trend(), asset.change_display()),
            ]),
            Line::from(""),
            field_line(
                "Category",
                Span::styled(
                    asset.category.label(),
                    Style::default().fg(category_color(asset.category)),
                ),
            ),
            field_line("Market Cap", Span::raw(asset.market_cap.to_string())),
            field_line("Volume (24h)", Span::raw(asset.volume.to_string())),
            field_line("Holders", Span::raw(asset.holders.to_string())),
            field_line("Total Supply", Span::raw(asset.total_supply.to_string())),
            field_line("Circulating", Span::raw(asset.circulating_supply.to_string())),
            field_line("Website", Span::raw(asset.website.clone())),
            field_line("Twitter", Span::raw(asset.twitter.clone())),
            field_line("Discord", Span::raw(asset.discord.clone())),
            Line::from(""),
            Line::from(Span::styled(
                asset.description.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];
        let title = format!("{} ({})", asset.name, asset.symbol);
        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel_block(&title, focused));
        frame.render_widget(widget, area);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect) {
        let data: Vec<u64> = self.history.iter().map(|p| sats(p.price)).collect();
        let range = match (self.history.first(), self.history.last()) {
            (Some(first), Some(last)) => format!("Price History  {} → {}", first.date, last.date),
            _ => "Price History".to_string(),
        };
        let sparkline = Sparkline::default()
            .block(panel_block(&range, false))
            .data(&data)
            .style(Style::default().fg(Color::LightRed));
        frame.render_widget(sparkline, area);
    }

    fn render_tab(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let header_style = Style::default().fg(Color::Gray);
        let table = match self.tab {
            DetailTab::Trades => {
                let rows = self.trades.iter().map(|trade| {
                    Row::new(vec![
                        Line::from(side_span(trade.side)),
                        Line::from(trade.quantity.normalize().to_string()),
                        Line::from(trade.price.to_string()),
                        Line::from(trade.counterparty.clone()),
                        Line::from(trade.time.clone()),
                    ])
                });
                Table::new(
                    rows,
                    [
                        Constraint::Length(6),
                        Constraint::Length(10),
                        Constraint::Length(12),
                        Constraint::Min(14),
                        Constraint::Length(12),
                    ],
                )
                .header(
                    Row::new(vec!["Side", "Amount", "Price", "Counterparty", "Time"])
                        .style(header_style),
                )
                .block(panel_block("Recent Trades [t]", focused))
            }
            DetailTab::Holders => {
                let rows = self.holders.iter().map(|holder| {
                    Row::new(vec![
                        holder.address.clone(),
                        holder.balance.normalize().to_string(),
                        format!("{}%", holder.share_pct.normalize()),
                    ])
                });
                Table::new(
                    rows,
                    [
                        Constraint::Min(16),
                        Constraint::Length(12),
                        Constraint::Length(8),
                    ],
                )
                .header(Row::new(vec!["Address", "Balance", "Share"]).style(header_style))
                .block(panel_block("Top Holders [t]", focused))
            }
        };
        let table = table
            .row_highlight_style(highlight_style())
            .highlight_symbol("> ");
        frame.render_stateful_widget(table, area, &mut self.state);
    }
}

/// Price in satoshis, for charting
fn sats(price: Btc) -> u64 {
    price
        .checked_mul(Decimal::from(100_000_000u64))
        .and_then(|sats| sats.value().to_u64())
        .unwrap_or(0)
}

impl Screen for AssetDetailsScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        self.render_overview(frame, columns[0], false);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0), Constraint::Length(1)])
            .split(columns[1]);
        self.render_history(frame, right[0]);
        self.render_tab(frame, right[1], focused);

        let hint = Paragraph::new(Span::styled(
            "b buy · t trades/holders · Esc back",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(hint, right[2]);
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        match key {
            KeyCode::Char('b') => {
                return ScreenAction::Navigate(View::Checkout(Some(CheckoutSeed::buy(
                    &self.asset,
                ))))
            }
            KeyCode::Char('t') => {
                self.tab = match self.tab {
                    DetailTab::Trades => DetailTab::Holders,
                    DetailTab::Holders => DetailTab::Trades,
                };
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
    use crate::catalog::AssetSort;
    use crate::navigation::ViewId;
    use crate::types::OrderSide;
    use crate::ui::screens::test_support::render_text;

    fn type_search(screen: &mut AssetDiscoveryScreen, text: &str) {
        screen.handle_key(KeyCode::Char('/'));
        for c in text.chars() {
            screen.handle_key(KeyCode::Char(c));
        }
        screen.handle_key(KeyCode::Enter);
    }

    #[test]
    fn test_search_captures_letters() {
        let mut screen = AssetDiscoveryScreen::new(&Catalog::builtin());
        screen.handle_key(KeyCode::Char('/'));
        assert!(screen.captures_input());
        // 'f' is typed, not treated as the filter shortcut
        screen.handle_key(KeyCode::Char('f'));
        assert_eq!(screen.query.search, "f");
        assert_eq!(screen.query.category, Default::default());
        screen.handle_key(KeyCode::Esc);
        assert!(!screen.captures_input());
    }

    #[test]
    fn test_search_narrows_list() {
        let catalog = Catalog::builtin();
        let mut screen = AssetDiscoveryScreen::new(&catalog);
        let target = catalog.assets()[0].symbol.clone();
        type_search(&mut screen, &target.to_lowercase());
        assert!(screen.visible().iter().all(|a| {
            a.symbol.to_lowercase().contains(&target.to_lowercase())
                || a.name.to_lowercase().contains(&target.to_lowercase())
        }));
        assert!(!screen.visible().is_empty());
    }

    #[test]
    fn test_no_match_clears_selection() {
        let mut screen = AssetDiscoveryScreen::new(&Catalog::builtin());
        type_search(&mut screen, "zzzz-nothing");
        assert!(screen.visible().is_empty());
        assert!(screen.selected().is_none());
        assert!(matches!(screen.handle_key(KeyCode::Enter), ScreenAction::None));
    }

    #[test]
    fn test_sort_key_cycles() {
        let mut screen = AssetDiscoveryScreen::new(&Catalog::builtin());
        assert_eq!(screen.query.sort, AssetSort::MarketCap);
        screen.handle_key(KeyCode::Char('s'));
        assert_eq!(screen.query.sort, AssetSort::Volume);
    }

    #[test]
    fn test_buy_opens_checkout_for_selection() {
        let mut screen = AssetDiscoveryScreen::new(&Catalog::builtin());
        let first = screen.visible()[0].clone();
        match screen.handle_key(KeyCode::Char('b')) {
            ScreenAction::Navigate(View::Checkout(Some(seed))) => {
                assert_eq!(seed.symbol, first.symbol);
                assert_eq!(seed.side, OrderSide::Buy);
            }
            _ => panic!("expected checkout"),
        }
    }

    #[test]
    fn test_details_tabs_and_buy() {
        let catalog = Catalog::builtin();
        let asset = catalog.assets()[0].clone();
        let mut screen = AssetDetailsScreen::new(asset.clone(), &catalog);
        let text = render_text(&mut screen, 140, 30);
        assert!(text.contains(&asset.name));
        assert!(text.contains("Recent Trades"));

        screen.handle_key(KeyCode::Char('t'));
        let text = render_text(&mut screen, 140, 30);
        assert!(text.contains("Top Holders"));

        match screen.handle_key(KeyCode::Char('b')) {
            ScreenAction::Navigate(view) => assert_eq!(view.id(), ViewId::Checkout),
            _ => panic!("expected checkout"),
        }
    }

    #[test]
    fn test_sats_conversion() {
        assert_eq!(sats(Btc::scaled(1, 3)), 100_000);
        assert_eq!(sats(Btc::ZERO), 0);
    }
}
