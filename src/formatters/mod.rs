//! Text rendering for one-shot CLI output.

use chrono::DateTime;
use colored::Colorize;

use crate::schemas::{
    AnalysisPayload, ChartSeries, GuardResult, KNOWN_SERIES, Message, SafetyStatus, TextVerdict,
    extract_series, hazard_label,
};

/// Unix seconds → `YYYY-mm-dd HH:MM:SS` (UTC); out-of-range values fall
/// back to the raw number.
pub fn format_timestamp(unix_seconds: i64) -> String {
    match DateTime::from_timestamp(unix_seconds, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => unix_seconds.to_string(),
    }
}

pub fn format_message(message: &Message, use_color: bool) -> String {
    let sender = message.name_of_sender.as_deref().unwrap_or("Unknown sender");
    let app = message.app.as_deref().unwrap_or("N/A");
    let timestamp = message
        .status_timestamp
        .map(format_timestamp)
        .unwrap_or_else(|| "N/A".to_string());
    let content = message.message_content.as_deref().unwrap_or("");

    let mut output = if use_color {
        format!(
            "{} {} [{}]\n  {}",
            timestamp.bright_blue(),
            sender.bright_yellow(),
            app.bright_green(),
            content
        )
    } else {
        format!("{timestamp} {sender} [{app}]\n  {content}")
    };

    if let Some(translated) = &message.translated_text {
        let line = format!("\n  translation: {translated}");
        output.push_str(&if use_color {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    let mut details = Vec::new();
    if let Some(receiver) = &message.name_of_receiver {
        details.push(format!("to: {receiver}"));
    }
    if let Some(group) = &message.group_name {
        details.push(format!("group: {group}"));
    }
    if let Some(status) = &message.message_status {
        details.push(format!("status: {status}"));
    }
    if message.is_deleted == Some(true) {
        details.push("deleted".to_string());
    }
    if let Some(email) = &message.email {
        details.push(email.clone());
    }
    if let Some(phone) = &message.phone {
        details.push(phone.clone());
    }
    if let Some(language) = &message.source_language {
        details.push(format!("lang: {language}"));
    }
    if let Some(location) = &message.location_of_sender {
        if let (Some(lat), Some(lon)) = (location.lat, location.lon) {
            details.push(format!("at: {lat},{lon}"));
        }
    }
    if !details.is_empty() {
        let line = format!("\n  {}", details.join(" | "));
        output.push_str(&if use_color {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    output
}

pub fn format_guard_result(result: &GuardResult, use_color: bool) -> String {
    let label = hazard_label(&result.category)
        .map(|label| format!("{} ({label})", result.category))
        .unwrap_or_else(|| result.category.clone());

    let mut output = if use_color {
        format!(
            "{}: {}\n{}: {}\n",
            "Category".bright_yellow(),
            label,
            "Flagged messages".bright_yellow(),
            result.count.to_string().bright_green()
        )
    } else {
        format!("Category: {label}\nFlagged messages: {}\n", result.count)
    };

    if result.matches.is_empty() {
        output.push_str("No messages matched this category.");
    } else {
        for message in &result.matches {
            output.push('\n');
            output.push_str(&format_message(message, use_color));
        }
    }
    output
}

pub fn format_text_verdict(verdict: &TextVerdict, use_color: bool) -> String {
    let category = verdict.category.as_deref().map(|code| {
        hazard_label(code)
            .map(|label| format!(" ({code}: {label})"))
            .unwrap_or_else(|| format!(" ({code})"))
    });
    match verdict.status {
        SafetyStatus::Safe => {
            let status = if use_color {
                "safe".bright_green().to_string()
            } else {
                "safe".to_string()
            };
            format!("Status: {status}")
        }
        SafetyStatus::Unsafe => {
            let status = if use_color {
                "unsafe".bright_red().to_string()
            } else {
                "unsafe".to_string()
            };
            format!("Status: {status}{}", category.unwrap_or_default())
        }
    }
}

/// All known series of an analysis payload as aligned label/value tables,
/// with each table's presentation cap applied after extraction.
pub fn format_analysis(payload: &AnalysisPayload, use_color: bool) -> String {
    let mut sections = Vec::new();
    for spec in &KNOWN_SERIES {
        let Some(series) = extract_series(Some(payload), spec.key) else {
            continue;
        };
        sections.push(format_series_table(spec.title, &series, spec.top, use_color));
    }
    if sections.is_empty() {
        "The analysis payload contained no renderable series.".to_string()
    } else {
        sections.join("\n\n")
    }
}

fn format_series_table(
    title: &str,
    series: &ChartSeries,
    top: Option<usize>,
    use_color: bool,
) -> String {
    let rows = top.unwrap_or(series.labels.len()).min(series.labels.len());
    let width = series.labels[..rows]
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = if use_color {
        format!("{}\n{}\n", title.bright_blue().bold(), "─".repeat(30))
    } else {
        format!("{title}\n{}\n", "─".repeat(30))
    };
    for i in 0..rows {
        let label = &series.labels[i];
        let value = series.values.get(i).copied().unwrap_or_default();
        let padding = " ".repeat(width.saturating_sub(label.chars().count()));
        if use_color {
            output.push_str(&format!(
                "  {label}{padding}  {}\n",
                value.to_string().bright_green()
            ));
        } else {
            output.push_str(&format!("  {label}{padding}  {value}\n"));
        }
    }
    output.pop();
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::GeoPoint;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_format_message_includes_details() {
        let message = Message {
            name_of_sender: Some("alice".to_string()),
            message_content: Some("hello".to_string()),
            message_status: Some("seen-by-2".to_string()),
            is_deleted: Some(true),
            location_of_sender: Some(GeoPoint {
                lat: Some(55.7),
                lon: Some(37.6),
            }),
            ..Message::default()
        };
        let text = format_message(&message, false);
        assert!(text.contains("alice"));
        assert!(text.contains("hello"));
        // Opaque status is shown verbatim.
        assert!(text.contains("status: seen-by-2"));
        assert!(text.contains("deleted"));
        assert!(text.contains("at: 55.7,37.6"));
    }

    #[test]
    fn test_format_guard_result_with_empty_matches() {
        let result = GuardResult {
            category: "S10".to_string(),
            count: 0,
            matches: Vec::new(),
        };
        let text = format_guard_result(&result, false);
        assert!(text.contains("S10 (Hate speech)"));
        assert!(text.contains("No messages matched"));
    }

    #[test]
    fn test_format_analysis_caps_top_lists_only() {
        let payload: AnalysisPayload = serde_json::from_value(serde_json::json!({
            "messages_by_receiver": {
                "index": ["a", "b", "c", "d", "e", "f", "g"],
                "count": [7, 6, 5, 4, 3, 2, 1]
            }
        }))
        .unwrap();
        let text = format_analysis(&payload, false);
        assert!(text.contains("Top 5 receivers"));
        assert!(text.contains("  e  3"));
        assert!(!text.contains("  f  2"));
    }

    #[test]
    fn test_format_analysis_without_series() {
        let payload = AnalysisPayload::default();
        assert!(format_analysis(&payload, false).contains("no renderable series"));
    }
}
