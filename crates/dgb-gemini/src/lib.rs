//! Gemini adapter (text generation).
//!
//! Wraps the `generateContent` REST endpoint. One request per call, no
//! retries; every failure shape collapses into `Error::Generation` so the
//! core never has to distinguish transport from provider errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use dgb_core::{errors::Error, model::GenerativeClient, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct GeminiClient {
    api_key: String,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("gemini http client build failed: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            http,
        })
    }

    fn endpoint(model: &str) -> String {
        format!("{API_BASE}/models/{model}:generateContent")
    }
}

/// Concatenate the text parts of the first candidate.
fn response_text(resp: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(Error::Generation(
            "gemini returned no candidates".to_string(),
        ));
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::Generation(
            "gemini returned empty text".to_string(),
        ));
    }

    Ok(text)
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .http
            .post(Self::endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("gemini request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "gemini request failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| Error::Generation(format!("gemini json error: {e}")))?;

        response_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(v: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn extracts_first_candidate_text() {
        let resp = parse(serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Hello " }, { "text": "world" } ] } },
                { "content": { "parts": [ { "text": "second candidate" } ] } }
            ]
        }));
        assert_eq!(response_text(resp).unwrap(), "Hello world");
    }

    #[test]
    fn no_candidates_is_a_generation_error() {
        let resp = parse(serde_json::json!({}));
        assert!(matches!(
            response_text(resp),
            Err(Error::Generation(_))
        ));
    }

    #[test]
    fn empty_candidate_text_is_a_generation_error() {
        let resp = parse(serde_json::json!({
            "candidates": [ { "content": { "parts": [] } } ]
        }));
        assert!(matches!(
            response_text(resp),
            Err(Error::Generation(_))
        ));
    }

    #[test]
    fn request_body_matches_wire_format() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi" }],
            }],
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(
            v,
            serde_json::json!({ "contents": [ { "parts": [ { "text": "hi" } ] } ] })
        );
    }

    #[test]
    fn endpoint_includes_model_name() {
        assert_eq!(
            GeminiClient::endpoint("gemini-2.5-pro"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }
}
