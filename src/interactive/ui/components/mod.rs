pub mod analysis_view;
pub mod guard_panel;
pub mod help_dialog;
pub mod message_detail;
pub mod result_list;
pub mod search_form;
pub mod tab_bar;
pub mod text_input;

#[cfg(test)]
mod search_form_test;
#[cfg(test)]
mod text_input_test;

use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

pub trait Component {
    fn render(&mut self, f: &mut Frame, area: Rect);
    fn handle_key(&mut self, key: KeyEvent) -> Option<Message>;
}
