pub mod client;
pub mod export;
pub mod formatters;
pub mod interactive;
pub mod lifecycle;
pub mod logging;
pub mod orchestrator;
pub mod schemas;

#[cfg(test)]
mod orchestrator_test;

pub use client::{ApiClient, QueryDraft, SearchField, wire_params};
pub use export::ExportSink;
pub use lifecycle::{RequestLifecycle, RequestState};
pub use orchestrator::{
    AnalysisOrchestrator, ApiRequest, ApiResponse, GuardOrchestrator, QueryOrchestrator,
    Submission, execute_request,
};
pub use schemas::{
    AnalysisPayload, ChartSeries, GuardResult, Message, TextVerdict, extract_series, hazard_label,
};
