//! Query/result orchestration.
//!
//! Each orchestrator owns the [`RequestLifecycle`] of one user-triggered
//! operation, validates input locally, shapes the outbound request, and
//! applies the completion. Orchestrators never perform IO themselves: a
//! `submit` yields an [`ApiRequest`] for the app shell to execute (worker
//! thread in the TUI, inline in the CLI), and the matching [`ApiResponse`]
//! is fed back through `settle`. Exports are likewise returned as data, so
//! a failing export can never be mistaken for a failing request.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::client::api::ApiClient;
use crate::client::params::{QueryDraft, wire_params};
use crate::lifecycle::{RequestLifecycle, RequestState};
use crate::schemas::{
    AnalysisPayload, ChartSeries, GuardResult, Message, TextVerdict, extract_series,
};

/// A wire request shaped by an orchestrator, tagged with the lifecycle
/// generation its completion must present.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Search {
        generation: u64,
        params: Vec<(&'static str, String)>,
    },
    Analyze {
        generation: u64,
    },
    GuardCategory {
        generation: u64,
        category: String,
        limit: u32,
    },
    GuardText {
        generation: u64,
        text: String,
    },
}

/// Completion of a wire request. Failures carry a one-line human-readable
/// summary; the raw error payload is discarded and nothing retries
/// automatically.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    Search {
        generation: u64,
        outcome: Result<SearchData, String>,
    },
    Analyze {
        generation: u64,
        outcome: Result<AnalysisData, String>,
    },
    GuardCategory {
        generation: u64,
        outcome: Result<GuardData, String>,
    },
    GuardText {
        generation: u64,
        outcome: Result<TextVerdict, String>,
    },
}

/// A successful search: the decoded result list for display plus the full
/// envelope for export.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchData {
    pub envelope: Value,
    pub messages: Vec<Message>,
}

impl SearchData {
    /// An envelope without `results` is an empty result set, not an error.
    pub fn decode(envelope: Value) -> Result<Self> {
        let messages = match envelope.get("results") {
            None | Some(Value::Null) => Vec::new(),
            Some(results) => serde_json::from_value(results.clone())
                .context("search envelope has a malformed `results` field")?,
        };
        Ok(Self { envelope, messages })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisData {
    pub envelope: Value,
    pub payload: AnalysisPayload,
}

impl AnalysisData {
    pub fn decode(envelope: Value) -> Result<Self> {
        let payload = serde_json::from_value(envelope.clone())
            .context("analyze response is not a series mapping")?;
        Ok(Self { envelope, payload })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuardData {
    pub envelope: Value,
    pub result: GuardResult,
}

impl GuardData {
    pub fn decode(envelope: Value) -> Result<Self> {
        let result = serde_json::from_value(envelope.clone())
            .context("guard response is not a category result")?;
        Ok(Self { envelope, result })
    }
}

/// A best-effort export of a success envelope, handed to the app shell.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub stem: String,
    pub payload: Value,
}

/// What a completion did to the owning lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SettleOutcome {
    /// The completion's generation no longer matches; state is untouched.
    Stale,
    /// Applied as a failure; carries the user-facing message.
    Failed(String),
    /// Applied as a success, with the export this operation produces.
    Succeeded(Option<ExportRequest>),
}

/// Outcome of a submission attempt on an operation that validates input.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Accepted; execute the request and settle with its completion.
    Issued(ApiRequest),
    /// A request for this operation is already in flight; nothing was sent.
    Busy,
    /// Input rejected locally; nothing was sent and the lifecycle is
    /// untouched.
    Invalid(String),
}

/// Runs a search: ParamFilter in front, one lifecycle behind.
#[derive(Debug, Default)]
pub struct QueryOrchestrator {
    lifecycle: RequestLifecycle<SearchData>,
}

impl QueryOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the draft and issue the search. `None` while a search is
    /// already in flight.
    pub fn submit(&mut self, draft: &QueryDraft) -> Option<ApiRequest> {
        let generation = self.lifecycle.begin()?;
        Some(ApiRequest::Search {
            generation,
            params: wire_params(draft),
        })
    }

    /// Apply a completion; on a fresh success the full envelope goes to the
    /// export sink under the `search_result` stem.
    pub fn settle(
        &mut self,
        generation: u64,
        outcome: Result<SearchData, String>,
    ) -> SettleOutcome {
        if !self.lifecycle.settle(generation, outcome) {
            return SettleOutcome::Stale;
        }
        match self.lifecycle.state() {
            RequestState::Failed(message) => SettleOutcome::Failed(message.clone()),
            _ => SettleOutcome::Succeeded(self.lifecycle.payload().map(|data| ExportRequest {
                stem: "search_result".to_string(),
                payload: data.envelope.clone(),
            })),
        }
    }

    pub fn state(&self) -> &RequestState<SearchData> {
        self.lifecycle.state()
    }

    pub fn is_pending(&self) -> bool {
        self.lifecycle.is_pending()
    }

    /// Messages of the latest successful search.
    pub fn messages(&self) -> Option<&[Message]> {
        self.lifecycle.payload().map(|data| data.messages.as_slice())
    }

    pub fn reset(&mut self) {
        self.lifecycle.reset();
    }
}

/// Runs the full-dataset aggregation and serves derived chart series.
#[derive(Debug, Default)]
pub struct AnalysisOrchestrator {
    lifecycle: RequestLifecycle<AnalysisData>,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self) -> Option<ApiRequest> {
        let generation = self.lifecycle.begin()?;
        Some(ApiRequest::Analyze { generation })
    }

    pub fn settle(
        &mut self,
        generation: u64,
        outcome: Result<AnalysisData, String>,
    ) -> SettleOutcome {
        if !self.lifecycle.settle(generation, outcome) {
            return SettleOutcome::Stale;
        }
        match self.lifecycle.state() {
            RequestState::Failed(message) => SettleOutcome::Failed(message.clone()),
            _ => SettleOutcome::Succeeded(self.lifecycle.payload().map(|data| ExportRequest {
                stem: "analyze_result".to_string(),
                payload: data.envelope.clone(),
            })),
        }
    }

    pub fn state(&self) -> &RequestState<AnalysisData> {
        self.lifecycle.state()
    }

    pub fn is_pending(&self) -> bool {
        self.lifecycle.is_pending()
    }

    pub fn payload(&self) -> Option<&AnalysisPayload> {
        self.lifecycle.payload().map(|data| &data.payload)
    }

    /// Derived series for one key of the latest payload; `None` when the
    /// key (or the payload) is absent, which simply means no chart.
    pub fn series(&self, key: &str) -> Option<ChartSeries> {
        extract_series(self.payload(), key)
    }

    pub fn reset(&mut self) {
        self.lifecycle.reset();
    }
}

/// Runs the two hazard checks. Each sub-operation owns its own lifecycle,
/// so a pending text probe never blocks a category screen and vice versa.
#[derive(Debug, Default)]
pub struct GuardOrchestrator {
    category: RequestLifecycle<GuardData>,
    text: RequestLifecycle<TextVerdict>,
}

impl GuardOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen stored messages against one hazard category. An empty
    /// category is rejected locally; no request is sent.
    pub fn submit_category(&mut self, category: &str, limit: u32) -> Submission {
        if category.is_empty() {
            return Submission::Invalid("Select a hazard category first".to_string());
        }
        match self.category.begin() {
            None => Submission::Busy,
            Some(generation) => Submission::Issued(ApiRequest::GuardCategory {
                generation,
                category: category.to_string(),
                limit,
            }),
        }
    }

    /// Classify a single text. Whitespace-only input is rejected locally;
    /// no request is sent.
    pub fn submit_text(&mut self, text: &str) -> Submission {
        if text.trim().is_empty() {
            return Submission::Invalid("Enter a text to check".to_string());
        }
        match self.text.begin() {
            None => Submission::Busy,
            Some(generation) => Submission::Issued(ApiRequest::GuardText {
                generation,
                text: text.to_string(),
            }),
        }
    }

    /// Category completions export under a stem keyed by the reported
    /// category; text verdicts are never exported.
    pub fn settle_category(
        &mut self,
        generation: u64,
        outcome: Result<GuardData, String>,
    ) -> SettleOutcome {
        if !self.category.settle(generation, outcome) {
            return SettleOutcome::Stale;
        }
        match self.category.state() {
            RequestState::Failed(message) => SettleOutcome::Failed(message.clone()),
            _ => SettleOutcome::Succeeded(self.category.payload().map(|data| ExportRequest {
                stem: format!("guard_result_{}", data.result.category),
                payload: data.envelope.clone(),
            })),
        }
    }

    pub fn settle_text(
        &mut self,
        generation: u64,
        outcome: Result<TextVerdict, String>,
    ) -> SettleOutcome {
        if !self.text.settle(generation, outcome) {
            return SettleOutcome::Stale;
        }
        match self.text.state() {
            RequestState::Failed(message) => SettleOutcome::Failed(message.clone()),
            _ => SettleOutcome::Succeeded(None),
        }
    }

    pub fn category_state(&self) -> &RequestState<GuardData> {
        self.category.state()
    }

    pub fn text_state(&self) -> &RequestState<TextVerdict> {
        self.text.state()
    }

    pub fn category_result(&self) -> Option<&GuardResult> {
        self.category.payload().map(|data| &data.result)
    }

    pub fn text_verdict(&self) -> Option<&TextVerdict> {
        self.text.payload()
    }

    pub fn reset(&mut self) {
        self.category.reset();
        self.text.reset();
    }
}

/// Execute one wire request against the backend and pair the completion
/// with its generation. Runs on the worker thread in interactive mode.
pub fn execute_request(client: &ApiClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::Search { generation, params } => ApiResponse::Search {
            generation,
            outcome: client
                .search(&params)
                .and_then(SearchData::decode)
                .map_err(describe),
        },
        ApiRequest::Analyze { generation } => ApiResponse::Analyze {
            generation,
            outcome: client
                .analyze()
                .and_then(AnalysisData::decode)
                .map_err(describe),
        },
        ApiRequest::GuardCategory {
            generation,
            category,
            limit,
        } => ApiResponse::GuardCategory {
            generation,
            outcome: client
                .guard_category(&category, limit)
                .and_then(GuardData::decode)
                .map_err(describe),
        },
        ApiRequest::GuardText { generation, text } => ApiResponse::GuardText {
            generation,
            outcome: client
                .guard_text(&text)
                .and_then(|envelope| {
                    serde_json::from_value(envelope).context("guard response is not a verdict")
                })
                .map_err(describe),
        },
    }
}

fn describe(error: anyhow::Error) -> String {
    tracing::warn!("request failed: {error:#}");
    format!("{error:#}")
}
