use crate::client::params::{QueryDraft, SearchField};
use crate::interactive::domain::models::SearchPane;
use crate::interactive::ui::components::{Component, text_input::TextInput};
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// The fourteen-field query form. The canonical draft lives in app state;
/// the form keeps per-field inputs for cursor handling and emits
/// [`Message::DraftChanged`] on every edit.
pub struct SearchForm {
    inputs: Vec<TextInput>,
    deleted: bool,
    focus: usize,
    pane: SearchPane,
    searching: bool,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self {
            inputs: SearchField::ALL.iter().map(|_| TextInput::new()).collect(),
            deleted: false,
            focus: 0,
            pane: SearchPane::Form,
            searching: false,
        }
    }

    pub fn set_draft(&mut self, draft: &QueryDraft) {
        for (i, field) in SearchField::ALL.iter().enumerate() {
            if let Some(text) = draft.text(*field) {
                if self.inputs[i].text() != text {
                    self.inputs[i].set_text(text.to_string());
                }
            }
        }
        self.deleted = draft.is_deleted;
    }

    pub fn set_focus(&mut self, focus: usize) {
        self.focus = focus;
    }

    pub fn set_pane(&mut self, pane: SearchPane) {
        self.pane = pane;
    }

    pub fn set_searching(&mut self, searching: bool) {
        self.searching = searching;
    }

    fn field_line(&self, index: usize) -> Line<'_> {
        let field = SearchField::ALL[index];
        let focused = self.pane == SearchPane::Form && self.focus == index;
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let mut spans = vec![Span::styled(format!("{:<14} ", field.label()), label_style)];
        if field.is_flag() {
            let mark = if self.deleted { "[x]" } else { "[ ]" };
            spans.push(if focused {
                Span::styled(mark, Style::default().add_modifier(Modifier::REVERSED))
            } else {
                Span::raw(mark)
            });
        } else {
            spans.extend(self.inputs[index].spans(focused));
        }
        Line::from(spans)
    }
}

impl Component for SearchForm {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let mut title = "Search parameters".to_string();
        if self.searching {
            title.push_str(" - searching...");
        }
        let block = Block::default().title(title).borders(Borders::ALL).border_style(
            if self.pane == SearchPane::Form {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            },
        );
        let inner = block.inner(area);
        f.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let half = SearchField::ALL.len().div_ceil(2);
        let left: Vec<Line> = (0..half).map(|i| self.field_line(i)).collect();
        let right: Vec<Line> = (half..SearchField::ALL.len())
            .map(|i| self.field_line(i))
            .collect();

        f.render_widget(Paragraph::new(left), columns[0]);
        f.render_widget(Paragraph::new(right), columns[1]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        let field = SearchField::ALL[self.focus];
        match key.code {
            KeyCode::Up => Some(Message::FocusPrevField),
            KeyCode::Down => Some(Message::FocusNextField),
            KeyCode::Tab => Some(Message::FocusResults),
            KeyCode::Enter => Some(Message::SubmitSearch),
            KeyCode::Char(' ') if field.is_flag() => Some(Message::ToggleDeleted),
            _ if field.is_flag() => None,
            _ => {
                if self.inputs[self.focus].handle_key(key) {
                    Some(Message::DraftChanged(
                        field,
                        self.inputs[self.focus].text().to_string(),
                    ))
                } else {
                    None
                }
            }
        }
    }
}
