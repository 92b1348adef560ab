use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, Response};
use serde_json::Value;

/// Blocking client for the corpus backend. One instance per process; all
/// four operations go through it and return the raw JSON envelope, which
/// callers decode into typed payloads and keep around for export.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("mcx/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET /api/search with the filtered wire parameters.
    pub fn search(&self, params: &[(&'static str, String)]) -> Result<Value> {
        tracing::debug!(count = params.len(), "issuing search");
        let response = self
            .http
            .get(self.url("/api/search"))
            .query(params)
            .send()
            .context("search request failed")?;
        decode_envelope(response, "search")
    }

    /// GET /api/analyze; the full-dataset aggregation takes no parameters.
    pub fn analyze(&self) -> Result<Value> {
        tracing::debug!("issuing analyze");
        let response = self
            .http
            .get(self.url("/api/analyze"))
            .send()
            .context("analyze request failed")?;
        decode_envelope(response, "analyze")
    }

    /// POST /api/guard/category.
    pub fn guard_category(&self, category: &str, limit: u32) -> Result<Value> {
        tracing::debug!(category, limit, "issuing guard category check");
        let response = self
            .http
            .post(self.url("/api/guard/category"))
            .json(&serde_json::json!({ "category": category, "limit": limit }))
            .send()
            .context("guard category request failed")?;
        decode_envelope(response, "guard category")
    }

    /// POST /api/guard with a single probe text.
    pub fn guard_text(&self, text: &str) -> Result<Value> {
        tracing::debug!(chars = text.len(), "issuing guard text check");
        let response = self
            .http
            .post(self.url("/api/guard"))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .context("guard text request failed")?;
        decode_envelope(response, "guard text")
    }
}

fn decode_envelope(response: Response, operation: &str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        bail!("{operation} request returned {status}");
    }
    response
        .json()
        .with_context(|| format!("{operation} response is not valid JSON"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/api/search"), "http://localhost:8000/api/search");
    }
}
