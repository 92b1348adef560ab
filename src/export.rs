//! Export sink for success envelopes.
//!
//! Every successful search/analyze/guard-category payload is offered to the
//! sink as a pretty-printed JSON artifact. The sink is a best-effort side
//! channel: a failed write is logged and reported, but it never rolls back
//! or invalidates the result already on screen.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExportSink {
    dir: Option<PathBuf>,
}

impl ExportSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir: Some(dir) }
    }

    /// A sink that drops everything (`--no-export`).
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    /// Mirrors the browser-download behavior this tool replaces: artifacts
    /// land in the platform download directory when there is one.
    pub fn default_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// Write `{stem}.json`. Returns the path written, or `None` when the
    /// sink is disabled.
    pub fn save_json(&self, payload: &Value, stem: &str) -> Result<Option<PathBuf>> {
        let Some(dir) = &self.dir else {
            return Ok(None);
        };
        let path = dir.join(format!("{}.json", sanitize_stem(stem)));
        let text = serde_json::to_string_pretty(payload)
            .context("failed to serialize export payload")?;
        fs::write(&path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "exported payload");
        Ok(Some(path))
    }
}

/// Stems embed backend-reported category names; keep them filename-safe.
fn sanitize_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_json_writes_pretty_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::new(dir.path().to_path_buf());

        let payload = json!({"results": [{"message_content": "hi"}]});
        let path = sink.save_json(&payload, "search_result").unwrap().unwrap();

        assert_eq!(path, dir.path().join("search_result.json"));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&written).unwrap(), payload);
        // Pretty-printed, not a single line.
        assert!(written.contains('\n'));
    }

    #[test]
    fn test_disabled_sink_writes_nothing() {
        let sink = ExportSink::disabled();
        assert_eq!(sink.save_json(&json!({}), "search_result").unwrap(), None);
    }

    #[test]
    fn test_unwritable_dir_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let sink = ExportSink::new(missing);
        assert!(sink.save_json(&json!({}), "analyze_result").is_err());
    }

    #[test]
    fn test_stems_are_sanitized() {
        assert_eq!(sanitize_stem("guard_result_S10"), "guard_result_S10");
        assert_eq!(sanitize_stem("guard_result_../x"), "guard_result____x");
    }
}
