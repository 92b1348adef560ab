use serde::{Deserialize, Serialize};

use super::message::Message;

/// Result of a category screen: the stored messages the safety service
/// flagged for one hazard category. `count` is advisory metadata; the
/// backend may cap `matches` below the true count, so the two are displayed
/// as reported and never reconciled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardResult {
    pub category: String,
    pub count: u64,
    pub matches: Vec<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    Unsafe,
}

/// Classification of a single probe text. `category` is present only on
/// unsafe verdicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextVerdict {
    pub status: SafetyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// The safety service's hazard taxonomy: category code → human label.
pub const HAZARD_CATEGORIES: [(&str, &str); 13] = [
    ("S1", "Violent crimes"),
    ("S2", "Non-violent crimes"),
    ("S3", "Sex-related crimes"),
    ("S4", "Child sexual exploitation"),
    ("S5", "Defamation"),
    ("S6", "Specialized advice"),
    ("S7", "Privacy violations"),
    ("S8", "Intellectual property"),
    ("S9", "Indiscriminate weapons"),
    ("S10", "Hate speech"),
    ("S11", "Suicide and self-harm"),
    ("S12", "Sexual content"),
    ("S13", "Elections"),
];

/// Human label for a category code. Unknown codes come back `None` and are
/// displayed verbatim.
pub fn hazard_label(code: &str) -> Option<&'static str> {
    HAZARD_CATEGORIES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazard_label_lookup() {
        assert_eq!(hazard_label("S1"), Some("Violent crimes"));
        assert_eq!(hazard_label("S13"), Some("Elections"));
        assert_eq!(hazard_label("spam"), None);
    }

    #[test]
    fn test_guard_result_tolerates_missing_fields() {
        let result: GuardResult = serde_json::from_value(serde_json::json!({
            "category": "S10",
            "count": 42
        }))
        .unwrap();
        assert_eq!(result.count, 42);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_count_may_exceed_matches() {
        let result: GuardResult = serde_json::from_value(serde_json::json!({
            "category": "S10",
            "count": 100,
            "matches": [{"message_content": "x"}]
        }))
        .unwrap();
        assert_eq!(result.count, 100);
        assert_eq!(result.matches.len(), 1);
    }

    #[test]
    fn test_safe_verdict_has_no_category() {
        let verdict: TextVerdict =
            serde_json::from_value(serde_json::json!({"status": "safe"})).unwrap();
        assert_eq!(verdict.status, SafetyStatus::Safe);
        assert!(verdict.category.is_none());
    }

    #[test]
    fn test_unsafe_verdict_carries_category() {
        let verdict: TextVerdict =
            serde_json::from_value(serde_json::json!({"status": "unsafe", "category": "S10"}))
                .unwrap();
        assert_eq!(verdict.status, SafetyStatus::Unsafe);
        assert_eq!(verdict.category.as_deref(), Some("S10"));
    }
}
