use crate::formatters::format_timestamp;
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crate::schemas::Message as CorpusMessage;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Full-record view of one message.
#[derive(Default)]
pub struct MessageDetail {
    message: Option<CorpusMessage>,
    scroll: usize,
}

impl MessageDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: Option<CorpusMessage>) {
        self.message = message;
    }

    pub fn set_scroll(&mut self, scroll: usize) {
        self.scroll = scroll;
    }

    fn field_line<'a>(label: &'a str, value: String) -> Line<'a> {
        Line::from(vec![
            Span::styled(
                format!("{label:<14} "),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(value),
        ])
    }

    fn lines(message: &CorpusMessage) -> Vec<Line<'_>> {
        let mut lines = vec![Line::from(Span::styled(
            message
                .name_of_sender
                .clone()
                .unwrap_or_else(|| "Unknown sender".to_string()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))];
        lines.push(Line::from(""));
        for content_line in message.message_content.as_deref().unwrap_or("").lines() {
            lines.push(Line::from(content_line.to_string()));
        }
        if let Some(translated) = &message.translated_text {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Translation: {translated}"),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::from(""));

        if let Some(receiver) = &message.name_of_receiver {
            lines.push(Self::field_line("Receiver", receiver.clone()));
        }
        if let Some(group) = &message.group_name {
            lines.push(Self::field_line("Group", group.clone()));
        }
        if let Some(app) = &message.app {
            lines.push(Self::field_line("App", app.clone()));
        }
        if let Some(timestamp) = message.status_timestamp {
            lines.push(Self::field_line("Timestamp", format_timestamp(timestamp)));
        }
        if let Some(status) = &message.message_status {
            lines.push(Self::field_line("Status", status.clone()));
        }
        if message.is_deleted == Some(true) {
            lines.push(Self::field_line("Deleted", "yes".to_string()));
        }
        if let Some(own_phone) = &message.own_phone {
            lines.push(Self::field_line("Own phone", own_phone.clone()));
        }
        if let Some(phone) = &message.phone {
            lines.push(Self::field_line("Phone", phone.clone()));
        }
        if let Some(email) = &message.email {
            lines.push(Self::field_line("Email", email.clone()));
        }
        if let Some(language) = &message.source_language {
            lines.push(Self::field_line("Language", language.clone()));
        }
        if let Some(location) = &message.location_of_sender {
            if let (Some(lat), Some(lon)) = (location.lat, location.lon) {
                lines.push(Self::field_line("Location", format!("{lat}, {lon}")));
            }
        }
        lines
    }
}

impl Component for MessageDetail {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Message - ↑/↓: scroll | Esc: back")
            .borders(Borders::ALL);
        let Some(message) = &self.message else {
            f.render_widget(block, area);
            return;
        };
        let paragraph = Paragraph::new(Self::lines(message))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll as u16, 0));
        f.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up => Some(Message::DetailScrollUp),
            KeyCode::Down => Some(Message::DetailScrollDown),
            KeyCode::Esc | KeyCode::Backspace => Some(Message::ExitDetail),
            _ => None,
        }
    }
}
