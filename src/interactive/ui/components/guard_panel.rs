use crate::formatters::format_timestamp;
use crate::interactive::domain::models::GuardFocus;
use crate::interactive::ui::components::{Component, text_input::TextInput};
use crate::interactive::ui::events::Message;
use crate::schemas::{
    GuardResult, HAZARD_CATEGORIES, SafetyStatus, TextVerdict, hazard_label,
    Message as CorpusMessage,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// The hazard-screening view: category selector and limit for the stored
/// corpus check, a probe input for single texts, and the flagged matches.
pub struct GuardPanel {
    focus: GuardFocus,
    category_index: Option<usize>,
    category_list: ListState,
    limit: TextInput,
    probe: TextInput,
    category_pending: bool,
    category_error: Option<String>,
    result: Option<GuardResult>,
    selected_match: usize,
    match_list: ListState,
    text_pending: bool,
    text_error: Option<String>,
    verdict: Option<TextVerdict>,
}

impl Default for GuardPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardPanel {
    pub fn new() -> Self {
        Self {
            focus: GuardFocus::Categories,
            category_index: None,
            category_list: ListState::default(),
            limit: TextInput::new(),
            probe: TextInput::new(),
            category_pending: false,
            category_error: None,
            result: None,
            selected_match: 0,
            match_list: ListState::default(),
            text_pending: false,
            text_error: None,
            verdict: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_state(
        &mut self,
        focus: GuardFocus,
        category_index: Option<usize>,
        limit_text: &str,
        probe_text: &str,
        category_pending: bool,
        category_error: Option<String>,
        result: Option<GuardResult>,
        selected_match: usize,
        text_pending: bool,
        text_error: Option<String>,
        verdict: Option<TextVerdict>,
    ) {
        self.focus = focus;
        self.category_index = category_index;
        self.category_list.select(category_index);
        if self.limit.text() != limit_text {
            self.limit.set_text(limit_text.to_string());
        }
        if self.probe.text() != probe_text {
            self.probe.set_text(probe_text.to_string());
        }
        self.category_pending = category_pending;
        self.category_error = category_error;
        self.selected_match = selected_match;
        self.match_list.select(
            result
                .as_ref()
                .filter(|result| !result.matches.is_empty())
                .map(|result| selected_match.min(result.matches.len() - 1)),
        );
        self.result = result;
        self.text_pending = text_pending;
        self.text_error = text_error;
        self.verdict = verdict;
    }

    fn border_style(&self, focus: GuardFocus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn render_categories(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = HAZARD_CATEGORIES
            .iter()
            .map(|(code, label)| ListItem::new(format!("{code:<4} {label}")))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Hazard category")
                    .borders(Borders::ALL)
                    .border_style(self.border_style(GuardFocus::Categories)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut self.category_list);
    }

    fn render_limit(&self, f: &mut Frame, area: Rect) {
        let spans = self.limit.spans(self.focus == GuardFocus::Limit);
        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title("Result limit")
                .borders(Borders::ALL)
                .border_style(self.border_style(GuardFocus::Limit)),
        );
        f.render_widget(paragraph, area);
    }

    fn render_probe(&self, f: &mut Frame, area: Rect) {
        let spans = self.probe.spans(self.focus == GuardFocus::Probe);
        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title("Check a single text")
                .borders(Borders::ALL)
                .border_style(self.border_style(GuardFocus::Probe)),
        );
        f.render_widget(paragraph, area);
    }

    fn render_verdict(&self, f: &mut Frame, area: Rect) {
        let line = if self.text_pending {
            Line::from(Span::styled("Checking...", Style::default().fg(Color::Yellow)))
        } else if let Some(error) = &self.text_error {
            Line::from(Span::styled(
                format!("Text check failed: {error}"),
                Style::default().fg(Color::Red),
            ))
        } else if let Some(verdict) = &self.verdict {
            match verdict.status {
                SafetyStatus::Safe => {
                    Line::from(Span::styled("safe", Style::default().fg(Color::Green)))
                }
                SafetyStatus::Unsafe => {
                    let category = verdict.category.as_deref().unwrap_or("?");
                    let text = match hazard_label(category) {
                        Some(label) => format!("unsafe ({category}: {label})"),
                        None => format!("unsafe ({category})"),
                    };
                    Line::from(Span::styled(text, Style::default().fg(Color::Red)))
                }
            }
        } else {
            Line::from(Span::styled(
                "Enter a text above and press Enter.",
                Style::default().add_modifier(Modifier::DIM),
            ))
        };
        let paragraph = Paragraph::new(line)
            .block(Block::default().title("Verdict").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_matches(&mut self, f: &mut Frame, area: Rect) {
        let title = if self.category_pending {
            "Flagged messages - screening...".to_string()
        } else {
            match &self.result {
                Some(result) => format!("Flagged messages ({} reported)", result.count),
                None => "Flagged messages".to_string(),
            }
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.border_style(GuardFocus::Matches));

        if let Some(error) = &self.category_error {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                format!("Guard check failed: {error}"),
                Style::default().fg(Color::Red),
            )))
            .block(block)
            .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
            return;
        }

        let Some(result) = &self.result else {
            f.render_widget(block, area);
            return;
        };
        if result.matches.is_empty() {
            let paragraph = Paragraph::new("No messages matched this category.").block(block);
            f.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = result
            .matches
            .iter()
            .map(|message| ListItem::new(Self::match_text(message)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, area, &mut self.match_list);
    }

    fn match_text(message: &CorpusMessage) -> String {
        let timestamp = message
            .status_timestamp
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());
        format!("{timestamp}  {}", message.summary())
    }
}

impl Component for GuardPanel {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(0)])
            .split(area);
        self.render_categories(f, columns[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(columns[1]);
        self.render_limit(f, rows[0]);
        self.render_probe(f, rows[1]);
        self.render_verdict(f, rows[2]);
        self.render_matches(f, rows[3]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if key.code == KeyCode::Tab {
            return Some(Message::GuardFocusNext);
        }
        match self.focus {
            GuardFocus::Categories => match key.code {
                KeyCode::Up => Some(Message::GuardCategoryUp),
                KeyCode::Down => Some(Message::GuardCategoryDown),
                KeyCode::Enter => Some(Message::SubmitGuardCategory),
                _ => None,
            },
            GuardFocus::Limit => match key.code {
                KeyCode::Enter => Some(Message::SubmitGuardCategory),
                // The limit is numeric; drop anything that is not a digit.
                KeyCode::Char(c) if !c.is_ascii_digit() => None,
                _ => {
                    if self.limit.handle_key(key) {
                        Some(Message::GuardLimitChanged(self.limit.text().to_string()))
                    } else {
                        None
                    }
                }
            },
            GuardFocus::Probe => match key.code {
                KeyCode::Enter => Some(Message::SubmitGuardText),
                _ => {
                    if self.probe.handle_key(key) {
                        Some(Message::GuardProbeChanged(self.probe.text().to_string()))
                    } else {
                        None
                    }
                }
            },
            GuardFocus::Matches => match key.code {
                KeyCode::Up => Some(Message::GuardMatchUp),
                KeyCode::Down => Some(Message::GuardMatchDown),
                KeyCode::Enter => Some(Message::EnterDetail),
                _ => None,
            },
        }
    }
}
