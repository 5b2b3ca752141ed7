use std::time::Duration;

use chrono::Utc;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{error_line, field_line, step_strip, Screen, ScreenAction};
use crate::flows::claim::{missing_fields, STEP_DESCRIPTIONS, STEP_TITLES};
use crate::flows::{
    claim::{location_label, NODE_LOCATIONS},
    ClaimField, ClaimForm, ClaimWizard, FieldValue, CLAIM_STEPS,
};
use crate::ui::form_field::{FieldList, FormField};
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::panel_block;

pub struct ClaimWizardScreen {
    wizard: ClaimWizard,
    fields: FieldList<ClaimField>,
    claim_delay: Duration,
    error: Option<String>,
}

/// Widgets for the fields a step collects, pre-filled from the form
fn build_fields(step: usize, form: &ClaimForm) -> FieldList<ClaimField> {
    let entries = ClaimField::editable_on(step)
        .into_iter()
        .map(|field| {
            let widget = match field {
                ClaimField::NodeLocation => {
                    FormField::select(NODE_LOCATIONS, form.text(field), "Select a location")
                }
                ClaimField::NodeDescription | ClaimField::Signature => {
                    FormField::text_area(form.text(field), field.placeholder())
                }
                f if f.is_flag() => FormField::toggle(form.flag(f)),
                f => FormField::text(form.text(f), f.placeholder()),
            };
            (field, field.label(), widget)
        })
        .collect();
    FieldList::new(entries)
}

impl ClaimWizardScreen {
    pub fn new(claim_delay: Duration) -> Self {
        let wizard = ClaimWizard::new(Utc::now());
        Self {
            fields: build_fields(wizard.current_step(), wizard.form()),
            wizard,
            claim_delay,
            error: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.wizard.is_complete()
    }

    fn rebuild(&mut self) {
        self.fields = build_fields(self.wizard.current_step(), self.wizard.form());
        self.error = None;
    }

    fn sync_field(&mut self, field: ClaimField) {
        let Some(widget) = self.fields.get(field) else {
            return;
        };
        let value = match widget.flag() {
            Some(flag) => FieldValue::Flag(flag),
            None => FieldValue::Text(widget.value()),
        };
        if let Err(err) = self.wizard.update_field(field, value) {
            self.error = Some(err.to_string());
        }
    }

    fn review_lines(&self) -> Vec<Line<'static>> {
        let form = self.wizard.form();
        let text = |field: ClaimField| {
            let value = form.text(field).trim();
            if value.is_empty() {
                Span::styled("-", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(value.to_string())
            }
        };
        let yes_no = |on: bool| {
            if on {
                Span::styled("Yes", Style::default().fg(Color::Green))
            } else {
                Span::styled("No", Style::default().fg(Color::DarkGray))
            }
        };
        vec![
            field_line("Name", text(ClaimField::NodeName)),
            field_line("Alias", text(ClaimField::NodeAlias)),
            field_line(
                "Location",
                Span::raw(location_label(form.text(ClaimField::NodeLocation)).to_string()),
            ),
            field_line("Pubkey", text(ClaimField::Pubkey)),
            field_line(
                "Address",
                Span::raw(format!(
                    "{}:{}",
                    form.text(ClaimField::IpAddress).trim(),
                    form.text(ClaimField::Port).trim()
                )),
            ),
            field_line("Tor", text(ClaimField::TorAddress)),
            field_line("Signed", yes_no(form.is_present(ClaimField::Signature))),
            field_line("Public listing", yes_no(form.flag(ClaimField::EnablePublicListing))),
            field_line("Auto update", yes_no(form.flag(ClaimField::EnableAutoUpdate))),
            Line::from(""),
            Line::from(Span::styled(
                "Enter claim node · Esc back",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }

    fn gate_line(&self) -> Line<'static> {
        let step = self.wizard.current_step();
        if let Some(error) = &self.error {
            return error_line(error);
        }
        if step == CLAIM_STEPS {
            return Line::from("");
        }
        let missing = missing_fields(step, self.wizard.form());
        if missing.is_empty() {
            Line::from(Span::styled(
                "Enter next ▶",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from(Span::styled(
                format!("Required: {}", missing.join(", ")),
                Style::default().fg(Color::Yellow),
            ))
        }
    }
}

impl Screen for ClaimWizardScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let step = self.wizard.current_step();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(step_strip(&STEP_TITLES, self.wizard.sequencer())),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(
                    "Step {step} of {CLAIM_STEPS} · {}% · {}",
                    self.wizard.sequencer().progress_percent(),
                    STEP_DESCRIPTIONS[step - 1]
                ),
                Style::default().fg(Color::Gray),
            )),
            chunks[1],
        );

        let block = panel_block(STEP_TITLES[step - 1], focused);
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        if self.wizard.is_complete() {
            let lines = vec![
                Line::from(Span::styled(
                    "Claiming node…",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Waiting for confirmation. Your node profile opens when it completes."),
            ];
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        } else if step == CLAIM_STEPS {
            frame.render_widget(Paragraph::new(self.review_lines()), inner);
        } else if step == 3 {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(inner);
            let message = vec![
                Line::from(Span::styled(
                    "Sign this message with your node's private key:",
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    self.wizard
                        .form()
                        .text(ClaimField::SignatureMessage)
                        .to_string(),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                )),
            ];
            frame.render_widget(Paragraph::new(message), parts[0]);
            self.fields.render(frame, parts[1], focused);
        } else {
            self.fields.render(frame, inner, focused);
        }

        frame.render_widget(Paragraph::new(self.gate_line()), chunks[3]);
    }

    fn handle_key(&mut self, key: KeyCode) -> ScreenAction {
        if self.wizard.is_complete() {
            return ScreenAction::None;
        }
        let step = self.wizard.current_step();
        match key {
            KeyCode::Tab => self.fields.next_field(),
            KeyCode::BackTab => self.fields.prev_field(),
            KeyCode::Esc => {
                if !self.wizard.back() {
                    return ScreenAction::Back;
                }
                self.rebuild();
            }
            KeyCode::Enter if step == CLAIM_STEPS => {
                match self.wizard.confirm(Utc::now(), self.claim_delay) {
                    Ok(pending) => return ScreenAction::ClaimConfirmed(pending),
                    Err(err) => self.error = Some(err.to_string()),
                }
            }
            KeyCode::Enter => match self.wizard.next() {
                Ok(_) => self.rebuild(),
                Err(err) => self.error = Some(err.to_string()),
            },
            other => {
                if let Some(field) = self.fields.handle_key(other) {
                    self.error = None;
                    self.sync_field(field);
                }
            }
        }
        ScreenAction::None
    }

    fn captures_input(&self) -> bool {
        !self.wizard.is_complete()
    }

    fn context(&self) -> ShortcutContext {
        if self.captures_input() {
            ShortcutContext::Form
        } else {
            ShortcutContext::Global
        }
    }
}
