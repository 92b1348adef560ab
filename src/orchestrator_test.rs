use serde_json::json;

use crate::client::params::QueryDraft;
use crate::lifecycle::RequestState;
use crate::orchestrator::{
    AnalysisData, AnalysisOrchestrator, ApiRequest, GuardData, GuardOrchestrator,
    QueryOrchestrator, SearchData, SettleOutcome, Submission,
};
use crate::schemas::{SafetyStatus, TextVerdict};

fn search_request_parts(request: ApiRequest) -> (u64, Vec<(&'static str, String)>) {
    match request {
        ApiRequest::Search { generation, params } => (generation, params),
        other => panic!("expected a search request, got {other:?}"),
    }
}

fn exported(outcome: SettleOutcome) -> crate::orchestrator::ExportRequest {
    match outcome {
        SettleOutcome::Succeeded(Some(export)) => export,
        other => panic!("expected a success with an export, got {other:?}"),
    }
}

#[test]
fn test_search_submit_filters_draft_and_goes_pending() {
    let mut orchestrator = QueryOrchestrator::new();
    let draft = QueryDraft {
        q: "hello".to_string(),
        is_deleted: true,
        ..QueryDraft::default()
    };

    let (_, params) = search_request_parts(orchestrator.submit(&draft).unwrap());
    assert_eq!(
        params,
        vec![
            ("q", "hello".to_string()),
            ("is_deleted", "true".to_string()),
        ]
    );
    assert!(orchestrator.is_pending());
}

#[test]
fn test_search_resubmit_while_pending_is_a_no_op() {
    let mut orchestrator = QueryOrchestrator::new();
    orchestrator.submit(&QueryDraft::new()).unwrap();
    assert!(orchestrator.submit(&QueryDraft::new()).is_none());
}

#[test]
fn test_search_success_decodes_results_and_exports_full_envelope() {
    let mut orchestrator = QueryOrchestrator::new();
    let (generation, _) = search_request_parts(orchestrator.submit(&QueryDraft::new()).unwrap());

    let envelope = json!({
        "results": [{"message_content": "hi"}],
        "duration_ms": 12
    });
    let data = SearchData::decode(envelope.clone()).unwrap();
    let export = exported(orchestrator.settle(generation, Ok(data)));

    assert_eq!(export.stem, "search_result");
    assert_eq!(export.payload, envelope);
    let messages = orchestrator.messages().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message_content.as_deref(), Some("hi"));
}

#[test]
fn test_search_envelope_without_results_is_an_empty_list() {
    let data = SearchData::decode(json!({"note": "nothing here"})).unwrap();
    assert!(data.messages.is_empty());
}

#[test]
fn test_search_failure_shows_no_partial_results() {
    let mut orchestrator = QueryOrchestrator::new();
    let (first, _) = search_request_parts(orchestrator.submit(&QueryDraft::new()).unwrap());
    let data = SearchData::decode(json!({"results": [{"message_content": "old"}]})).unwrap();
    orchestrator.settle(first, Ok(data));

    let (second, _) = search_request_parts(orchestrator.submit(&QueryDraft::new()).unwrap());
    let outcome = orchestrator.settle(second, Err("backend returned 500".to_string()));

    assert!(matches!(outcome, SettleOutcome::Failed(message) if message.contains("500")));
    assert!(matches!(orchestrator.state(), RequestState::Failed(_)));
    assert!(orchestrator.messages().is_none());
}

#[test]
fn test_stale_search_completion_is_discarded_after_reset() {
    let mut orchestrator = QueryOrchestrator::new();
    let (generation, _) = search_request_parts(orchestrator.submit(&QueryDraft::new()).unwrap());
    orchestrator.reset();

    let data = SearchData::decode(json!({"results": []})).unwrap();
    assert_eq!(orchestrator.settle(generation, Ok(data)), SettleOutcome::Stale);
    assert!(matches!(orchestrator.state(), RequestState::Idle));
}

#[test]
fn test_analyze_round_trip_and_series_extraction() {
    let mut orchestrator = AnalysisOrchestrator::new();
    let ApiRequest::Analyze { generation } = orchestrator.submit().unwrap() else {
        panic!("expected an analyze request");
    };

    let envelope = json!({
        "messages_by_status": {"index": ["sent", "read"], "count": [3, 7]}
    });
    let export = exported(
        orchestrator.settle(generation, Ok(AnalysisData::decode(envelope.clone()).unwrap())),
    );
    assert_eq!(export.stem, "analyze_result");
    assert_eq!(export.payload, envelope);

    let series = orchestrator.series("messages_by_status").unwrap();
    assert_eq!(series.labels, vec!["sent", "read"]);
    assert_eq!(series.values, vec![3, 7]);
    // A key the backend did not produce is simply not rendered.
    assert!(orchestrator.series("messages_by_app").is_none());
}

#[test]
fn test_analyze_is_extraction_equivalent_across_reruns() {
    let envelope = json!({
        "daily_message_counts": {"index": ["2024-05-01"], "count": [10]}
    });

    let mut orchestrator = AnalysisOrchestrator::new();
    let ApiRequest::Analyze { generation } = orchestrator.submit().unwrap() else {
        panic!("expected an analyze request");
    };
    orchestrator.settle(generation, Ok(AnalysisData::decode(envelope.clone()).unwrap()));
    let first = orchestrator.series("daily_message_counts");

    let ApiRequest::Analyze { generation } = orchestrator.submit().unwrap() else {
        panic!("expected an analyze request");
    };
    orchestrator.settle(generation, Ok(AnalysisData::decode(envelope).unwrap()));
    let second = orchestrator.series("daily_message_counts");

    assert_eq!(first, second);
}

#[test]
fn test_guard_category_empty_selection_is_rejected_locally() {
    let mut orchestrator = GuardOrchestrator::new();
    let submission = orchestrator.submit_category("", 10);
    assert!(matches!(submission, Submission::Invalid(_)));
    assert!(matches!(orchestrator.category_state(), RequestState::Idle));
}

#[test]
fn test_guard_text_whitespace_only_is_rejected_locally() {
    let mut orchestrator = GuardOrchestrator::new();
    let submission = orchestrator.submit_text("  ");
    assert!(matches!(submission, Submission::Invalid(_)));
    assert!(matches!(orchestrator.text_state(), RequestState::Idle));
}

#[test]
fn test_guard_category_export_stem_is_keyed_by_category() {
    let mut orchestrator = GuardOrchestrator::new();
    let Submission::Issued(ApiRequest::GuardCategory {
        generation,
        category,
        limit,
    }) = orchestrator.submit_category("S10", 10)
    else {
        panic!("expected a category request");
    };
    assert_eq!(category, "S10");
    assert_eq!(limit, 10);

    let envelope = json!({"category": "S10", "count": 2, "matches": []});
    let export =
        exported(orchestrator.settle_category(generation, Ok(GuardData::decode(envelope).unwrap())));
    assert_eq!(export.stem, "guard_result_S10");
}

#[test]
fn test_guard_sub_operations_are_independently_lifecycled() {
    let mut orchestrator = GuardOrchestrator::new();
    let Submission::Issued(_) = orchestrator.submit_category("S1", 10) else {
        panic!("expected a category request");
    };

    // The category check is still pending; the text probe is not blocked.
    let Submission::Issued(ApiRequest::GuardText { generation, .. }) =
        orchestrator.submit_text("check this")
    else {
        panic!("expected a text request");
    };
    assert!(matches!(orchestrator.category_state(), RequestState::Pending));

    let outcome = orchestrator.settle_text(
        generation,
        Ok(TextVerdict {
            status: SafetyStatus::Unsafe,
            category: Some("S10".to_string()),
        }),
    );
    assert_eq!(outcome, SettleOutcome::Succeeded(None));
    assert_eq!(
        orchestrator.text_verdict().unwrap().category.as_deref(),
        Some("S10")
    );
    // Still pending; the text completion did not touch the other lifecycle.
    assert!(matches!(orchestrator.category_state(), RequestState::Pending));
}

#[test]
fn test_guard_resubmit_while_pending_is_busy() {
    let mut orchestrator = GuardOrchestrator::new();
    let Submission::Issued(_) = orchestrator.submit_category("S1", 10) else {
        panic!("expected a category request");
    };
    assert_eq!(orchestrator.submit_category("S1", 10), Submission::Busy);
}
