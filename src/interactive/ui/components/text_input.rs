use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// A reusable single-line text input with cursor handling.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor_position: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, moving the cursor to the end. Callers syncing from
    /// app state should skip the call when nothing changed so the cursor
    /// position survives the round trip.
    pub fn set_text(&mut self, text: String) {
        self.cursor_position = text.chars().count();
        self.text = text;
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.text
            .chars()
            .take(char_pos)
            .map(|c| c.len_utf8())
            .sum()
    }

    fn find_prev_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = from;
        while pos > 0 && chars.get(pos - 1).is_some_and(|c| c.is_whitespace()) {
            pos -= 1;
        }
        while pos > 0 && chars.get(pos - 1).is_some_and(|c| !c.is_whitespace()) {
            pos -= 1;
        }
        pos
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end || end > self.text.chars().count() {
            return false;
        }
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        self.text.drain(byte_start..byte_end);
        self.cursor_position = start;
        true
    }

    /// Apply an editing key. Returns whether the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor_position = 0;
                    false
                }
                KeyCode::Char('e') => {
                    self.cursor_position = self.text.chars().count();
                    false
                }
                KeyCode::Char('u') => {
                    self.cursor_position > 0 && self.delete_range(0, self.cursor_position)
                }
                KeyCode::Char('k') => {
                    let len = self.text.chars().count();
                    self.cursor_position < len && self.delete_range(self.cursor_position, len)
                }
                KeyCode::Char('w') => {
                    let boundary = self.find_prev_word_boundary(self.cursor_position);
                    self.delete_range(boundary, self.cursor_position)
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let byte_pos = self.byte_offset(self.cursor_position);
                self.text.insert(byte_pos, c);
                self.cursor_position += 1;
                true
            }
            KeyCode::Backspace => {
                self.cursor_position > 0
                    && self.delete_range(self.cursor_position - 1, self.cursor_position)
            }
            KeyCode::Delete => {
                self.cursor_position < self.text.chars().count()
                    && self.delete_range(self.cursor_position, self.cursor_position + 1)
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor_position < self.text.chars().count() {
                    self.cursor_position += 1;
                }
                false
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                false
            }
            KeyCode::End => {
                self.cursor_position = self.text.chars().count();
                false
            }
            _ => false,
        }
    }

    /// Spans with the cursor cell highlighted when focused.
    pub fn spans(&self, focused: bool) -> Vec<Span<'_>> {
        if !focused {
            return vec![Span::raw(self.text.clone())];
        }
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        if self.cursor_position < self.text.chars().count() {
            let byte_pos = self.byte_offset(self.cursor_position);
            let (before, rest) = self.text.split_at(byte_pos);
            let mut rest_chars = rest.chars();
            let under = rest_chars.next().unwrap_or(' ');
            vec![
                Span::raw(before.to_string()),
                Span::styled(under.to_string(), cursor_style),
                Span::raw(rest_chars.collect::<String>()),
            ]
        } else {
            vec![
                Span::raw(self.text.clone()),
                Span::styled(" ", cursor_style),
            ]
        }
    }
}
