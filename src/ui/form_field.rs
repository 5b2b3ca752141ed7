//! Reusable form field widgets for TUI forms

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

/// A form field widget that can handle different input types
pub enum FormField {
    /// Single-line text input. `cursor_pos` counts chars, not bytes.
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: String,
        masked: bool,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        placeholder: String,
    },
    /// One of a fixed list of `(id, label)` options, or nothing yet
    Select {
        options: Vec<(String, String)>,
        selected: Option<usize>,
        placeholder: String,
    },
    /// Checkbox
    Toggle { value: bool },
}

fn byte_index(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map_or(value.len(), |(i, _)| i)
}

impl FormField {
    pub fn text(value: &str, placeholder: &str) -> Self {
        FormField::TextInput {
            cursor_pos: value.chars().count(),
            value: value.to_string(),
            placeholder: placeholder.to_string(),
            masked: false,
        }
    }

    /// Text input rendered as bullets (passwords, private keys)
    pub fn masked(placeholder: &str) -> Self {
        FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.to_string(),
            masked: true,
        }
    }

    pub fn text_area(value: &str, placeholder: &str) -> Self {
        let mut textarea = TextArea::default();
        if !value.is_empty() {
            textarea.insert_str(value);
        }
        FormField::TextArea {
            textarea: Box::new(textarea),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn select(options: &[(&str, &str)], value: &str, placeholder: &str) -> Self {
        let options: Vec<(String, String)> = options
            .iter()
            .map(|(id, label)| ((*id).to_string(), (*label).to_string()))
            .collect();
        let selected = options.iter().position(|(id, _)| id == value);
        FormField::Select {
            options,
            selected,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn toggle(value: bool) -> Self {
        FormField::Toggle { value }
    }

    /// Get the current value as a string (select fields yield the option id)
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } => value.clone(),
            FormField::TextArea { textarea, .. } => textarea.lines().join("\n"),
            FormField::Select {
                options, selected, ..
            } => selected
                .and_then(|i| options.get(i))
                .map(|(id, _)| id.clone())
                .unwrap_or_default(),
            FormField::Toggle { value } => value.to_string(),
        }
    }

    /// Checkbox state, `None` for other field kinds
    pub fn flag(&self) -> Option<bool> {
        match self {
            FormField::Toggle { value } => Some(*value),
            _ => None,
        }
    }

    /// Set the value from a string
    pub fn set_value(&mut self, new_value: &str) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => {
                *value = new_value.to_string();
                *cursor_pos = value.chars().count();
            }
            FormField::TextArea { textarea, .. } => {
                textarea.select_all();
                textarea.cut();
                textarea.insert_str(new_value);
            }
            FormField::Select {
                options, selected, ..
            } => {
                *selected = options.iter().position(|(id, _)| id == new_value);
            }
            FormField::Toggle { value } => {
                *value = new_value == "true";
            }
        }
    }

    /// Whether this field takes plain character input (so letters are not shortcuts)
    pub fn captures_text(&self) -> bool {
        matches!(
            self,
            FormField::TextInput { .. } | FormField::TextArea { .. }
        )
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => {
                let len = value.chars().count();
                match key {
                    KeyCode::Char(c) => {
                        value.insert(byte_index(value, *cursor_pos), c);
                        *cursor_pos += 1;
                        true
                    }
                    KeyCode::Backspace => {
                        if *cursor_pos > 0 {
                            *cursor_pos -= 1;
                            value.remove(byte_index(value, *cursor_pos));
                        }
                        true
                    }
                    KeyCode::Delete => {
                        if *cursor_pos < len {
                            value.remove(byte_index(value, *cursor_pos));
                        }
                        true
                    }
                    KeyCode::Left => {
                        *cursor_pos = cursor_pos.saturating_sub(1);
                        true
                    }
                    KeyCode::Right => {
                        if *cursor_pos < len {
                            *cursor_pos += 1;
                        }
                        true
                    }
                    KeyCode::Home => {
                        *cursor_pos = 0;
                        true
                    }
                    KeyCode::End => {
                        *cursor_pos = len;
                        true
                    }
                    _ => false,
                }
            }
            FormField::TextArea { textarea, .. } => match key {
                // Enter moves the form along; newlines are not needed here
                KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => false,
                _ => {
                    textarea.input(crossterm::event::KeyEvent::new(
                        key,
                        crossterm::event::KeyModifiers::NONE,
                    ));
                    true
                }
            },
            FormField::Select {
                options, selected, ..
            } => {
                let count = options.len();
                if count == 0 {
                    return false;
                }
                match key {
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                        *selected = Some(selected.map_or(0, |i| (i + 1) % count));
                        true
                    }
                    KeyCode::Left | KeyCode::Char('h') => {
                        *selected = Some(selected.map_or(count - 1, |i| (i + count - 1) % count));
                        true
                    }
                    _ => false,
                }
            }
            FormField::Toggle { value } => match key {
                KeyCode::Char(' ') => {
                    *value = !*value;
                    true
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    *value = false;
                    true
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    *value = true;
                    true
                }
                _ => false,
            },
        }
    }

    /// Get the height needed to render this field
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextArea { .. } => 5,
            _ => 1,
        }
    }

    /// Render the field
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::Gray };
        let text_style = Style::default().fg(if focused { Color::White } else { Color::Gray });

        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                masked,
            } => {
                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    let mut text: String = if *masked {
                        "•".repeat(value.chars().count())
                    } else {
                        value.clone()
                    };
                    if focused {
                        text.insert(byte_index(&text, *cursor_pos), '|');
                    }
                    Line::from(text)
                };
                frame.render_widget(Paragraph::new(content).style(text_style), area);
            }
            FormField::TextArea {
                textarea,
                placeholder,
            } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );
                if textarea.lines().iter().all(|l| l.is_empty()) {
                    textarea.set_placeholder_text(placeholder.clone());
                    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
                }
                frame.render_widget(&**textarea, area);
            }
            FormField::Select {
                options,
                selected,
                placeholder,
            } => {
                let label = selected
                    .and_then(|i| options.get(i))
                    .map(|(_, label)| Span::styled(label.clone(), text_style))
                    .unwrap_or_else(|| {
                        Span::styled(placeholder.clone(), Style::default().fg(Color::DarkGray))
                    });
                let arrows = Style::default().fg(border_color);
                let line = Line::from(vec![
                    Span::styled("◀ ", arrows),
                    label,
                    Span::styled(" ▶", arrows),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
            FormField::Toggle { value } => {
                let (mark, style) = if *value {
                    (
                        "[x]",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("[ ]", Style::default().fg(Color::DarkGray))
                };
                let line = Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(if focused { " ◀" } else { "" }, text_style),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
        }
    }
}

/// Labelled fields with one focused at a time, keyed by `K`
pub struct FieldList<K> {
    entries: Vec<(K, &'static str, FormField)>,
    focused_index: usize,
}

impl<K: Copy + PartialEq> FieldList<K> {
    pub fn new(entries: Vec<(K, &'static str, FormField)>) -> Self {
        Self {
            entries,
            focused_index: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn focused_key(&self) -> Option<K> {
        self.entries.get(self.focused_index).map(|(k, _, _)| *k)
    }

    pub fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.entries
            .get_mut(self.focused_index)
            .map(|(_, _, field)| field)
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.entries.get(self.focused_index).map(|(_, _, field)| field)
    }

    pub fn get(&self, key: K) -> Option<&FormField> {
        self.entries
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, _, field)| field)
    }

    pub fn value(&self, key: K) -> String {
        self.get(key).map(FormField::value).unwrap_or_default()
    }

    /// Move to the next field, wrapping around
    pub fn next_field(&mut self) {
        if !self.entries.is_empty() {
            self.focused_index = (self.focused_index + 1) % self.entries.len();
        }
    }

    /// Move to the previous field, wrapping around
    pub fn prev_field(&mut self) {
        if !self.entries.is_empty() {
            self.focused_index =
                (self.focused_index + self.entries.len() - 1) % self.entries.len();
        }
    }

    /// Forward a key to the focused field; returns its key when the value changed
    pub fn handle_key(&mut self, key: KeyCode) -> Option<K> {
        let index = self.focused_index;
        let (k, _, field) = self.entries.get_mut(index)?;
        field.handle_key(key).then_some(*k)
    }

    /// Render each field under its label, stacked top to bottom
    pub fn render(&mut self, frame: &mut Frame, area: Rect, active: bool) {
        let constraints: Vec<Constraint> = self
            .entries
            .iter()
            .map(|(_, _, field)| Constraint::Length(field.render_height() + 2))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (i, (_, label, field)) in self.entries.iter_mut().enumerate() {
            let focused = active && i == self.focused_index;
            let row = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(field.render_height()),
                    Constraint::Min(0),
                ])
                .split(rows[i]);
            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(Paragraph::new(Span::styled(*label, label_style)), row[0]);
            field.render(frame, row[1], focused);
        }
    }
}
