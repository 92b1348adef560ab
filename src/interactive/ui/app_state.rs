use crate::client::params::QueryDraft;
use crate::interactive::domain::models::{GuardFocus, Mode, SearchPane, Tab};
use crate::interactive::ui::commands::Command;
use crate::interactive::ui::events::Message;
use crate::orchestrator::{
    AnalysisOrchestrator, ApiResponse, GuardOrchestrator, QueryOrchestrator, SettleOutcome,
    Submission,
};
use crate::schemas::{HAZARD_CATEGORIES, Message as CorpusMessage};

pub struct AppState {
    pub mode: Mode,
    pub tab: Tab,
    pub search: SearchViewState,
    pub analysis: AnalysisViewState,
    pub guard: GuardViewState,
    pub ui: UiState,
}

pub struct SearchViewState {
    pub draft: QueryDraft,
    /// Index into [`crate::client::params::SearchField::ALL`].
    pub focus: usize,
    pub pane: SearchPane,
    pub orchestrator: QueryOrchestrator,
    pub selected_index: usize,
}

pub struct AnalysisViewState {
    pub orchestrator: AnalysisOrchestrator,
}

pub struct GuardViewState {
    pub orchestrator: GuardOrchestrator,
    pub focus: GuardFocus,
    /// Selection in the hazard table; `None` until the operator picks one.
    pub category_index: Option<usize>,
    pub limit_text: String,
    pub probe_text: String,
    pub selected_match: usize,
}

pub struct UiState {
    pub message: Option<String>,
    pub detail: Option<CorpusMessage>,
    pub detail_scroll: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Main,
            tab: Tab::Search,
            search: SearchViewState {
                draft: QueryDraft::new(),
                focus: 0,
                pane: SearchPane::Form,
                orchestrator: QueryOrchestrator::new(),
                selected_index: 0,
            },
            analysis: AnalysisViewState {
                orchestrator: AnalysisOrchestrator::new(),
            },
            guard: GuardViewState {
                orchestrator: GuardOrchestrator::new(),
                focus: GuardFocus::Categories,
                category_index: None,
                limit_text: "10".to_string(),
                probe_text: String::new(),
                selected_match: 0,
            },
            ui: UiState {
                message: None,
                detail: None,
                detail_scroll: 0,
            },
        }
    }

    /// The hazard code currently selected, empty until one is picked.
    pub fn selected_category(&self) -> &'static str {
        self.guard
            .category_index
            .map(|i| HAZARD_CATEGORIES[i].0)
            .unwrap_or("")
    }

    pub fn update(&mut self, message: Message) -> Command {
        match message {
            Message::NextTab => {
                self.tab = self.tab.next();
                self.ui.message = None;
                Command::None
            }
            Message::ShowHelp => {
                self.mode = Mode::Help;
                Command::None
            }
            Message::CloseHelp => {
                self.mode = Mode::Main;
                Command::None
            }
            Message::EnterDetail => {
                if let Some(record) = self.record_under_cursor() {
                    self.ui.detail = Some(record);
                    self.ui.detail_scroll = 0;
                    self.mode = Mode::Detail;
                }
                Command::None
            }
            Message::ExitDetail => {
                self.mode = Mode::Main;
                self.ui.detail = None;
                Command::None
            }

            Message::FocusNextField => {
                self.search.focus =
                    (self.search.focus + 1) % crate::client::params::SearchField::ALL.len();
                Command::None
            }
            Message::FocusPrevField => {
                let len = crate::client::params::SearchField::ALL.len();
                self.search.focus = (self.search.focus + len - 1) % len;
                Command::None
            }
            Message::FocusResults => {
                if self
                    .search
                    .orchestrator
                    .messages()
                    .is_some_and(|messages| !messages.is_empty())
                {
                    self.search.pane = SearchPane::Results;
                }
                Command::None
            }
            Message::FocusForm => {
                self.search.pane = SearchPane::Form;
                Command::None
            }
            Message::DraftChanged(field, text) => {
                if let Some(slot) = self.search.draft.text_mut(field) {
                    *slot = text;
                }
                Command::None
            }
            Message::ToggleDeleted => {
                self.search.draft.is_deleted = !self.search.draft.is_deleted;
                Command::None
            }
            Message::SubmitSearch => match self.search.orchestrator.submit(&self.search.draft) {
                Some(request) => {
                    self.ui.message = None;
                    Command::Dispatch(request)
                }
                // A search is already in flight; drop the submission.
                None => Command::None,
            },
            Message::SelectUp => {
                self.search.selected_index = self.search.selected_index.saturating_sub(1);
                Command::None
            }
            Message::SelectDown => {
                let len = self
                    .search
                    .orchestrator
                    .messages()
                    .map(|messages| messages.len())
                    .unwrap_or(0);
                if len > 0 && self.search.selected_index + 1 < len {
                    self.search.selected_index += 1;
                }
                Command::None
            }
            Message::DetailScrollUp => {
                self.ui.detail_scroll = self.ui.detail_scroll.saturating_sub(1);
                Command::None
            }
            Message::DetailScrollDown => {
                self.ui.detail_scroll += 1;
                Command::None
            }

            Message::SubmitAnalyze => match self.analysis.orchestrator.submit() {
                Some(request) => {
                    self.ui.message = None;
                    Command::Dispatch(request)
                }
                None => Command::None,
            },

            Message::GuardFocusNext => {
                self.guard.focus = self.guard.focus.next();
                Command::None
            }
            Message::GuardCategoryUp => {
                self.guard.category_index = Some(match self.guard.category_index {
                    Some(i) => i.saturating_sub(1),
                    None => 0,
                });
                Command::None
            }
            Message::GuardCategoryDown => {
                self.guard.category_index = Some(match self.guard.category_index {
                    Some(i) => (i + 1).min(HAZARD_CATEGORIES.len() - 1),
                    None => 0,
                });
                Command::None
            }
            Message::GuardLimitChanged(text) => {
                self.guard.limit_text = text;
                Command::None
            }
            Message::GuardProbeChanged(text) => {
                self.guard.probe_text = text;
                Command::None
            }
            Message::SubmitGuardCategory => {
                let category = self.selected_category();
                let limit = self.guard.limit_text.parse().unwrap_or(10);
                match self.guard.orchestrator.submit_category(category, limit) {
                    Submission::Issued(request) => {
                        self.ui.message = None;
                        Command::Dispatch(request)
                    }
                    Submission::Busy => Command::None,
                    Submission::Invalid(reason) => {
                        self.ui.message = Some(reason);
                        Command::None
                    }
                }
            }
            Message::SubmitGuardText => {
                match self.guard.orchestrator.submit_text(&self.guard.probe_text) {
                    Submission::Issued(request) => {
                        self.ui.message = None;
                        Command::Dispatch(request)
                    }
                    Submission::Busy => Command::None,
                    Submission::Invalid(reason) => {
                        self.ui.message = Some(reason);
                        Command::None
                    }
                }
            }
            Message::GuardMatchUp => {
                self.guard.selected_match = self.guard.selected_match.saturating_sub(1);
                Command::None
            }
            Message::GuardMatchDown => {
                let len = self
                    .guard
                    .orchestrator
                    .category_result()
                    .map(|result| result.matches.len())
                    .unwrap_or(0);
                if len > 0 && self.guard.selected_match + 1 < len {
                    self.guard.selected_match += 1;
                }
                Command::None
            }

            Message::ApiCompleted(response) => self.apply_response(response),

            Message::ClearStatus => {
                self.ui.message = None;
                Command::None
            }
        }
    }

    fn apply_response(&mut self, response: ApiResponse) -> Command {
        match response {
            ApiResponse::Search { generation, outcome } => {
                match self.search.orchestrator.settle(generation, outcome) {
                    SettleOutcome::Stale => Command::None,
                    SettleOutcome::Failed(reason) => {
                        self.ui.message = Some(format!("Search failed: {reason}"));
                        Command::None
                    }
                    SettleOutcome::Succeeded(export) => {
                        self.search.selected_index = 0;
                        let count = self
                            .search
                            .orchestrator
                            .messages()
                            .map(|messages| messages.len())
                            .unwrap_or(0);
                        if count > 0 {
                            self.search.pane = SearchPane::Results;
                            self.ui.message = Some(format!("{count} messages"));
                        } else {
                            self.search.pane = SearchPane::Form;
                            self.ui.message = Some("No messages found".to_string());
                        }
                        export_command(export)
                    }
                }
            }
            ApiResponse::Analyze { generation, outcome } => {
                match self.analysis.orchestrator.settle(generation, outcome) {
                    SettleOutcome::Stale => Command::None,
                    SettleOutcome::Failed(reason) => {
                        self.ui.message = Some(format!("Analyze failed: {reason}"));
                        Command::None
                    }
                    SettleOutcome::Succeeded(export) => {
                        self.ui.message = Some("Analysis complete".to_string());
                        export_command(export)
                    }
                }
            }
            ApiResponse::GuardCategory { generation, outcome } => {
                match self.guard.orchestrator.settle_category(generation, outcome) {
                    SettleOutcome::Stale => Command::None,
                    SettleOutcome::Failed(reason) => {
                        self.ui.message = Some(format!("Guard check failed: {reason}"));
                        Command::None
                    }
                    SettleOutcome::Succeeded(export) => {
                        self.guard.selected_match = 0;
                        if let Some(result) = self.guard.orchestrator.category_result() {
                            self.ui.message = Some(format!("{} messages flagged", result.count));
                        }
                        export_command(export)
                    }
                }
            }
            ApiResponse::GuardText { generation, outcome } => {
                match self.guard.orchestrator.settle_text(generation, outcome) {
                    SettleOutcome::Stale => Command::None,
                    SettleOutcome::Failed(reason) => {
                        self.ui.message = Some(format!("Text check failed: {reason}"));
                        Command::None
                    }
                    SettleOutcome::Succeeded(_) => {
                        self.ui.message = None;
                        Command::None
                    }
                }
            }
        }
    }

    /// The record the detail view would open for the current tab and
    /// selection.
    fn record_under_cursor(&self) -> Option<CorpusMessage> {
        match self.tab {
            Tab::Search => self
                .search
                .orchestrator
                .messages()?
                .get(self.search.selected_index)
                .cloned(),
            Tab::Guard => self
                .guard
                .orchestrator
                .category_result()?
                .matches
                .get(self.guard.selected_match)
                .cloned(),
            Tab::Analysis => None,
        }
    }
}

fn export_command(export: Option<crate::orchestrator::ExportRequest>) -> Command {
    match export {
        Some(request) => Command::Export {
            stem: request.stem,
            payload: request.payload,
        },
        None => Command::None,
    }
}
