use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct HelpDialog;

impl HelpDialog {
    pub fn new() -> Self {
        Self
    }

    fn get_help_text() -> Vec<Line<'static>> {
        fn heading(text: &'static str) -> Line<'static> {
            Line::from(vec![Span::styled(
                text,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )])
        }

        vec![
            Line::from(vec![Span::styled(
                "Message Corpus Explorer - Interactive Mode",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            heading("Global:"),
            Line::from("  Ctrl+T      - Next tab (Search / Analysis / Guard)"),
            Line::from("  ?           - Show this help"),
            Line::from("  Esc         - Quit"),
            Line::from("  Ctrl+C x2   - Quit"),
            Line::from(""),
            heading("Search tab:"),
            Line::from("  ↑/↓         - Move between form fields"),
            Line::from("  Space       - Toggle the deleted-only flag"),
            Line::from("  Enter       - Run the search"),
            Line::from("  Tab         - Switch between form and results"),
            Line::from("  Enter (results) - View message details"),
            Line::from(""),
            heading("Analysis tab:"),
            Line::from("  Enter       - Aggregate the whole dataset"),
            Line::from(""),
            heading("Guard tab:"),
            Line::from("  Tab         - Cycle category / limit / text / matches"),
            Line::from("  ↑/↓         - Pick a hazard category or a match"),
            Line::from("  Enter       - Run the focused check"),
            Line::from(""),
            Line::from("Successful payloads are saved as JSON artifacts next to"),
            Line::from("your downloads (see --export-dir / --no-export)."),
            Line::from(""),
            Line::from("Press any key to close this help..."),
        ]
    }
}

impl Component for HelpDialog {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let help_text = Self::get_help_text();
        let height = (help_text.len() as u16 + 2).min(area.height);
        let width = 64.min(area.width);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        f.render_widget(Clear, popup);
        let paragraph = Paragraph::new(help_text)
            .block(Block::default().title("Help").borders(Borders::ALL))
            .alignment(Alignment::Left);
        f.render_widget(paragraph, popup);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Option<Message> {
        Some(Message::CloseHelp)
    }
}
