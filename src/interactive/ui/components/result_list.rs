use crate::formatters::format_timestamp;
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crate::schemas::Message as CorpusMessage;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Scrollable list of search results.
pub struct ResultList {
    messages: Vec<CorpusMessage>,
    list_state: ListState,
    focused: bool,
}

impl Default for ResultList {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultList {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            list_state: ListState::default(),
            focused: false,
        }
    }

    pub fn set_messages(&mut self, messages: Vec<CorpusMessage>) {
        self.messages = messages;
    }

    pub fn set_selected(&mut self, index: usize) {
        self.list_state.select(if self.messages.is_empty() {
            None
        } else {
            Some(index.min(self.messages.len() - 1))
        });
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn item_text(message: &CorpusMessage) -> String {
        let timestamp = message
            .status_timestamp
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());
        let status = message.message_status.as_deref().unwrap_or("-");
        format!("{timestamp}  [{status}]  {}", message.summary())
    }
}

impl Component for ResultList {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!("Results ({})", self.messages.len()))
            .borders(Borders::ALL)
            .border_style(if self.focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            });

        if self.messages.is_empty() {
            f.render_widget(block, area);
            return;
        }

        let items: Vec<ListItem> = self
            .messages
            .iter()
            .map(|message| ListItem::new(Self::item_text(message)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up => Some(Message::SelectUp),
            KeyCode::Down => Some(Message::SelectDown),
            KeyCode::Enter => Some(Message::EnterDetail),
            KeyCode::Tab => Some(Message::FocusForm),
            _ => None,
        }
    }
}
