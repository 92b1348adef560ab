use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::interactive::domain::models::{Mode, SearchPane, Tab};
use crate::interactive::ui::app_state::AppState;
use crate::interactive::ui::components::{
    Component, analysis_view::AnalysisView, guard_panel::GuardPanel, help_dialog::HelpDialog,
    message_detail::MessageDetail, result_list::ResultList, search_form::SearchForm,
    tab_bar::TabBar,
};
use crate::lifecycle::RequestState;

pub struct Renderer {
    tab_bar: TabBar,
    search_form: SearchForm,
    result_list: ResultList,
    analysis_view: AnalysisView,
    guard_panel: GuardPanel,
    message_detail: MessageDetail,
    help_dialog: HelpDialog,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            tab_bar: TabBar::new(),
            search_form: SearchForm::new(),
            result_list: ResultList::new(),
            analysis_view: AnalysisView::new(),
            guard_panel: GuardPanel::new(),
            message_detail: MessageDetail::new(),
            help_dialog: HelpDialog::new(),
        }
    }

    pub fn render(&mut self, f: &mut Frame, state: &AppState) {
        match state.mode {
            Mode::Main => self.render_main(f, state),
            Mode::Detail => self.render_detail(f, state),
            Mode::Help => {
                self.render_main(f, state);
                self.help_dialog.render(f, f.area());
            }
        }
    }

    fn render_main(&mut self, f: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tab bar
                Constraint::Min(0),    // Active view
                Constraint::Length(1), // Status line
            ])
            .split(f.area());

        self.tab_bar.set_selected(state.tab);
        self.tab_bar.render(f, chunks[0]);

        match state.tab {
            Tab::Search => self.render_search_tab(f, chunks[1], state),
            Tab::Analysis => self.render_analysis_tab(f, chunks[1], state),
            Tab::Guard => self.render_guard_tab(f, chunks[1], state),
        }

        self.render_status_line(f, chunks[2], state);
    }

    fn render_search_tab(&mut self, f: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9), // Form
                Constraint::Min(0),    // Results
            ])
            .split(area);

        self.search_form.set_draft(&state.search.draft);
        self.search_form.set_focus(state.search.focus);
        self.search_form.set_pane(state.search.pane);
        self.search_form
            .set_searching(state.search.orchestrator.is_pending());
        self.search_form.render(f, chunks[0]);

        self.result_list.set_messages(
            state
                .search
                .orchestrator
                .messages()
                .map(|messages| messages.to_vec())
                .unwrap_or_default(),
        );
        self.result_list.set_selected(state.search.selected_index);
        self.result_list
            .set_focused(state.search.pane == SearchPane::Results);
        self.result_list.render(f, chunks[1]);
    }

    fn render_analysis_tab(&mut self, f: &mut Frame, area: Rect, state: &AppState) {
        let orchestrator = &state.analysis.orchestrator;
        self.analysis_view.set_payload(orchestrator.payload().cloned());
        self.analysis_view.set_pending(orchestrator.is_pending());
        self.analysis_view.set_error(match orchestrator.state() {
            RequestState::Failed(message) => Some(message.clone()),
            _ => None,
        });
        self.analysis_view.render(f, area);
    }

    fn render_guard_tab(&mut self, f: &mut Frame, area: Rect, state: &AppState) {
        let orchestrator = &state.guard.orchestrator;
        let category_error = match orchestrator.category_state() {
            RequestState::Failed(message) => Some(message.clone()),
            _ => None,
        };
        let text_error = match orchestrator.text_state() {
            RequestState::Failed(message) => Some(message.clone()),
            _ => None,
        };
        self.guard_panel.set_state(
            state.guard.focus,
            state.guard.category_index,
            &state.guard.limit_text,
            &state.guard.probe_text,
            matches!(orchestrator.category_state(), RequestState::Pending),
            category_error,
            orchestrator.category_result().cloned(),
            state.guard.selected_match,
            matches!(orchestrator.text_state(), RequestState::Pending),
            text_error,
            orchestrator.text_verdict().cloned(),
        );
        self.guard_panel.render(f, area);
    }

    fn render_detail(&mut self, f: &mut Frame, state: &AppState) {
        self.message_detail.set_message(state.ui.detail.clone());
        self.message_detail.set_scroll(state.ui.detail_scroll);
        self.message_detail.render(f, f.area());
    }

    fn render_status_line(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let line = match &state.ui.message {
            Some(message) => Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(
                hint_for(state),
                Style::default().add_modifier(Modifier::DIM),
            )),
        };
        f.render_widget(Paragraph::new(line), area);
    }

    pub fn get_search_form_mut(&mut self) -> &mut SearchForm {
        &mut self.search_form
    }

    pub fn get_result_list_mut(&mut self) -> &mut ResultList {
        &mut self.result_list
    }

    pub fn get_analysis_view_mut(&mut self) -> &mut AnalysisView {
        &mut self.analysis_view
    }

    pub fn get_guard_panel_mut(&mut self) -> &mut GuardPanel {
        &mut self.guard_panel
    }

    pub fn get_message_detail_mut(&mut self) -> &mut MessageDetail {
        &mut self.message_detail
    }

    pub fn get_help_dialog_mut(&mut self) -> &mut HelpDialog {
        &mut self.help_dialog
    }
}

fn hint_for(state: &AppState) -> &'static str {
    match state.tab {
        Tab::Search => match state.search.pane {
            SearchPane::Form => {
                "Enter: search | ↑/↓: fields | Space: toggle flag | Tab: results | Ctrl+T: next tab | ?: help | Esc: quit"
            }
            SearchPane::Results => {
                "↑/↓: select | Enter: details | Tab: back to form | Ctrl+T: next tab | ?: help | Esc: quit"
            }
        },
        Tab::Analysis => "Enter: analyze dataset | Ctrl+T: next tab | ?: help | Esc: quit",
        Tab::Guard => {
            "Tab: cycle focus | ↑/↓: pick | Enter: run check | Ctrl+T: next tab | ?: help | Esc: quit"
        }
    }
}
