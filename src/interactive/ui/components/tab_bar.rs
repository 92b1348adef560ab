use crate::interactive::domain::models::Tab;
use crate::interactive::ui::components::Component;
use crate::interactive::ui::events::Message;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Tabs,
};

#[derive(Default)]
pub struct TabBar {
    selected: usize,
}

impl TabBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_selected(&mut self, tab: Tab) {
        self.selected = tab.index();
    }
}

impl Component for TabBar {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let titles = Tab::ALL.iter().map(|tab| tab.title());
        let tabs = Tabs::new(titles)
            .select(self.selected)
            .style(Style::default().fg(Color::Cyan))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|");
        f.render_widget(tabs, area);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Option<Message> {
        None
    }
}
