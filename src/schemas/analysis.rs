use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One aggregate of the analysis payload: two positionally aligned
/// sequences, `index[i]` labeling `count[i]`. Either side may be missing on
/// a partially populated aggregate; the pair is never reordered client-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateRecord {
    pub index: Option<Vec<Value>>,
    pub count: Option<Vec<i64>>,
}

/// A value under a series key. Backends occasionally put non-aggregate
/// metadata next to the aggregates; anything that does not decode as an
/// [`AggregateRecord`] is carried as-is and simply yields no chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesEntry {
    Aggregate(AggregateRecord),
    Other(Value),
}

/// The full-dataset aggregation response: series key → aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(flatten)]
    pub series: BTreeMap<String, SeriesEntry>,
}

/// Chart-ready series derived from an [`AnalysisPayload`]; labels and
/// values correspond 1:1 by position.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

/// Pull one series out of the payload. Returns `None` when the payload is
/// absent, the key is absent, or the addressed record lacks either side of
/// the pair. The series comes back unchanged: no sorting and no truncation;
/// top-N limiting is presentation's job, applied to the extracted series.
pub fn extract_series(payload: Option<&AnalysisPayload>, key: &str) -> Option<ChartSeries> {
    let entry = payload?.series.get(key)?;
    let SeriesEntry::Aggregate(record) = entry else {
        return None;
    };
    let index = record.index.as_ref()?;
    let count = record.count.as_ref()?;
    Some(ChartSeries {
        labels: index.iter().map(label_text).collect(),
        values: count.clone(),
    })
}

/// Labels arrive as strings for most series but as numbers for some; both
/// render verbatim.
fn label_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// How a series is presented once extracted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChartKind {
    Bar,
    TopList,
    Line,
}

pub struct SeriesSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    /// Top-N cap applied by presentation, not by extraction.
    pub top: Option<usize>,
}

/// The series the analyze view knows how to render. Keys missing from a
/// payload are skipped, not errors.
pub const KNOWN_SERIES: [SeriesSpec; 6] = [
    SeriesSpec {
        key: "messages_by_status",
        title: "Messages by status",
        kind: ChartKind::Bar,
        top: None,
    },
    SeriesSpec {
        key: "messages_by_type",
        title: "Messages by type",
        kind: ChartKind::Bar,
        top: None,
    },
    SeriesSpec {
        key: "messages_by_app",
        title: "Messages by app",
        kind: ChartKind::Bar,
        top: None,
    },
    SeriesSpec {
        key: "messages_by_receiver",
        title: "Top 5 receivers",
        kind: ChartKind::TopList,
        top: Some(5),
    },
    SeriesSpec {
        key: "messages_by_location",
        title: "Top 5 sender locations",
        kind: ChartKind::TopList,
        top: Some(5),
    },
    SeriesSpec {
        key: "daily_message_counts",
        title: "Daily message counts",
        kind: ChartKind::Line,
        top: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(raw: serde_json::Value) -> AnalysisPayload {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_absent_payload_yields_no_series() {
        assert_eq!(extract_series(None, "messages_by_status"), None);
    }

    #[test]
    fn test_absent_key_yields_no_series() {
        let payload = payload(serde_json::json!({
            "messages_by_status": {"index": ["sent"], "count": [1]}
        }));
        assert_eq!(extract_series(Some(&payload), "messages_by_app"), None);
    }

    #[test]
    fn test_record_missing_either_side_yields_no_series() {
        let payload = payload(serde_json::json!({
            "only_index": {"index": ["a"]},
            "only_count": {"count": [1]},
        }));
        assert_eq!(extract_series(Some(&payload), "only_index"), None);
        assert_eq!(extract_series(Some(&payload), "only_count"), None);
    }

    #[test]
    fn test_aligned_pair_passes_through_unchanged() {
        let payload = payload(serde_json::json!({
            "messages_by_status": {"index": ["sent", "read"], "count": [3, 7]}
        }));
        let series = extract_series(Some(&payload), "messages_by_status").unwrap();
        assert_eq!(series.labels, vec!["sent", "read"]);
        assert_eq!(series.values, vec![3, 7]);
    }

    #[test]
    fn test_numeric_labels_render_verbatim() {
        let payload = payload(serde_json::json!({
            "messages_by_location": {"index": [55.7, 37.6], "count": [4, 2]}
        }));
        let series = extract_series(Some(&payload), "messages_by_location").unwrap();
        assert_eq!(series.labels, vec!["55.7", "37.6"]);
    }

    #[test]
    fn test_non_aggregate_entry_yields_no_series() {
        let payload = payload(serde_json::json!({
            "generated_at": "2024-05-01",
            "messages_by_status": {"index": ["sent"], "count": [1]},
        }));
        assert_eq!(extract_series(Some(&payload), "generated_at"), None);
        assert!(extract_series(Some(&payload), "messages_by_status").is_some());
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let payload = payload(serde_json::json!({
            "daily_message_counts": {"index": ["2024-05-01", "2024-05-02"], "count": [10, 12]}
        }));
        let first = extract_series(Some(&payload), "daily_message_counts");
        let second = extract_series(Some(&payload), "daily_message_counts");
        assert_eq!(first, second);
    }
}
