use crate::client::params::SearchField;
use crate::orchestrator::ApiResponse;

#[derive(Debug)]
pub enum Message {
    // Tab and mode changes
    NextTab,
    ShowHelp,
    CloseHelp,
    EnterDetail,
    ExitDetail,

    // Search form
    FocusNextField,
    FocusPrevField,
    FocusResults,
    FocusForm,
    DraftChanged(SearchField, String),
    ToggleDeleted,
    SubmitSearch,
    SelectUp,
    SelectDown,
    DetailScrollUp,
    DetailScrollDown,

    // Analysis
    SubmitAnalyze,

    // Guard
    GuardFocusNext,
    GuardCategoryUp,
    GuardCategoryDown,
    GuardLimitChanged(String),
    GuardProbeChanged(String),
    SubmitGuardCategory,
    SubmitGuardText,
    GuardMatchUp,
    GuardMatchDown,

    // Async completions from the worker
    ApiCompleted(ApiResponse),

    // Status line
    ClearStatus,
}
