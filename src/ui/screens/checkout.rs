use chrono::Utc;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::{error_line, field_line, step_strip, Screen, ScreenAction};
use crate::config::FlowsConfig;
use crate::flows::checkout::STEP_TITLES;
use crate::flows::{CheckoutFlow, CheckoutSeed};
use crate::navigation::View;
use crate::types::PaymentMethod;
use crate::ui::form_field::FormField;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::{highlight_style, panel_block, side_span, status_span};

pub struct CheckoutScreen {
    flow: CheckoutFlow,
    amount: FormField,
    methods: ListState,
    error: Option<String>,
}

impl CheckoutScreen {
    pub fn new(seed: Option<CheckoutSeed>, flows: &FlowsConfig) -> Self {
        let flow = CheckoutFlow::new(
            seed.unwrap_or_default(),
            flows.fee_rate,
            &flows.default_checkout_amount,
        );
        Self {
            amount: FormField::text(&flow.draft().amount, "Amount"),
            flow,
            methods: ListState::default().with_selected(Some(0)),
            error: None,
        }
    }

    fn cycle_method(&mut self, forward: bool) {
        let all = PaymentMethod::all();
        let current = self.methods.selected().unwrap_or(0);
        let next = if forward {
            (current + 1) % all.len()
        } else {
            (current + all.len() - 1) % all.len()
        };
        self.methods.select(Some(next));
        if let Err(err) = self.flow.set_payment_method(all[next]) {
            self.error = Some(err.to_string());
        }
    }

    fn handle_details_key(&mut self, key: KeyCode) -> ScreenAction {
        match key {
            KeyCode::Esc => return ScreenAction::Back,
            KeyCode::Enter => match self.flow.continue_to_payment() {
                Ok(()) => self.error = None,
                Err(err) => self.error = Some(err.to_string()),
            },
            other => {
                if self.amount.handle_key(other) {
                    self.error = self.flow.set_amount(self.amount.value()).err().map(|e| e.to_string());
                }
            }
        }
        ScreenAction::None
    }

    fn handle_payment_key(&mut self, key: KeyCode) -> ScreenAction {
        match key {
            KeyCode::Esc => {
                self.flow.back();
                self.error = None;
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char(' ') => {
                self.cycle_method(true)
            }
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => self.cycle_method(false),
            KeyCode::Enter => match self.flow.submit(Utc::now()) {
                Ok(order) => {
                    self.error = None;
                    return ScreenAction::OrderPlaced(order);
                }
                Err(err) => self.error = Some(err.to_string()),
            },
            _ => {}
        }
        ScreenAction::None
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let draft = self.flow.draft();
        let mut lines = vec![
            field_line("Asset", Span::raw(format!("{} ({})", draft.asset, draft.symbol))),
            field_line("Type", side_span(draft.side)),
            field_line("Unit price", Span::raw(draft.unit_price.to_string())),
            field_line("Amount", Span::raw(draft.amount.clone())),
            Line::from(""),
        ];
        match draft.quote {
            Some(quote) => {
                lines.push(field_line("Subtotal", Span::raw(quote.subtotal.to_string())));
                lines.push(field_line("Fee", Span::raw(quote.fee.to_string())));
                lines.push(field_line(
                    "Total",
                    Span::styled(
                        quote.total.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ));
            }
            None => lines.push(Line::from(Span::styled(
                "Enter a positive amount to see the total",
                Style::default().fg(Color::DarkGray),
            ))),
        }
        lines.push(Line::from(""));
        lines.push(field_line("Payment", Span::raw(draft.payment_method.label())));
        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Order Summary", false)),
            area,
        );
    }

    fn render_step(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        match self.flow.current_step() {
            1 => {
                let block = panel_block("Order Details", focused);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(0),
                    ])
                    .split(inner);
                frame.render_widget(
                    Paragraph::new(Span::styled("Amount", Style::default().fg(Color::Cyan))),
                    rows[0],
                );
                self.amount.render(frame, rows[1], focused);
                let hint = if self.flow.can_continue() {
                    Line::from(Span::styled(
                        "Enter continue to payment · Esc cancel",
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    error_line("Amount must be a positive number")
                };
                frame.render_widget(Paragraph::new(hint), rows[3]);
            }
            2 => {
                let items: Vec<ListItem> = PaymentMethod::all()
                    .iter()
                    .map(|method| {
                        ListItem::new(vec![
                            Line::from(Span::styled(
                                method.label(),
                                Style::default().add_modifier(Modifier::BOLD),
                            )),
                            Line::from(Span::styled(
                                format!("  {}", method.description()),
                                Style::default().fg(Color::Gray),
                            )),
                        ])
                    })
                    .collect();
                let list = List::new(items)
                    .block(panel_block(
                        "Payment Method  Enter submit · Esc back",
                        focused,
                    ))
                    .highlight_style(highlight_style())
                    .highlight_symbol("> ");
                frame.render_stateful_widget(list, area, &mut self.methods);
            }
            _ => {
                let lines = match self.flow.submitted() {
                    Some(order) => vec![
                        Line::from(Span::styled(
                            "Order submitted",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::from(""),
                        field_line("Order", Span::raw(order.id.clone())),
                        field_line("Status", status_span(order.status.label())),
                        field_line("Total", Span::raw(order.grand_total().to_string())),
                        Line::from(""),
                        Line::from(Span::styled(
                            self.flow.draft().payment_method.instructions(),
                            Style::default().fg(Color::Yellow),
                        )),
                        Line::from(""),
                        Line::from(Span::styled(
                            "Enter track order · o all orders · Esc back to assets",
                            Style::default().fg(Color::DarkGray),
                        )),
                    ],
                    None => vec![],
                };
                frame.render_widget(
                    Paragraph::new(lines)
                        .wrap(Wrap { trim: true })
                        .block(panel_block("Submitted", focused)),
                    area,
                );
            }
        }
    }
}

impl Screen for CheckoutScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);
        frame.render_widget(
            Paragraph::new(step_strip(&STEP_TITLES, self.flow.sequencer())),
            chunks[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        self.render_step(frame, columns[0], focused);
        self.render_summary(frame, columns[1]);

        if let Some(error) = &self.error {
            frame.render_widget(Paragraph::new(error_line(error)), chunks[3]);
        }
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        match self.flow.current_step() {
            1 => self.handle_details_key(key),
            2 => self.handle_payment_key(key),
            _ => match (key, self.flow.submitted()) {
                (KeyCode::Enter, Some(order)) => {
                    ScreenAction::Navigate(View::order_status(order.clone()))
                }
                (KeyCode::Char('o'), _) => ScreenAction::Navigate(View::Orders),
                _ => ScreenAction::None,
            },
        }
    }

    fn captures_input(&self) -> bool {
        self.flow.submitted().is_none()
    }

    fn context(&self) -> ShortcutContext {
        if self.captures_input() {
            ShortcutContext::Form
        } else {
            ShortcutContext::Global
        }
    }
}
