//! Generative fallback against the Gemini API.
//!
//! Single-turn: each prompt is sent without any conversation history,
//! and the first candidate's text parts form the reply.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::router::Generator;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// -- Wire format --

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
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

// -- Client --

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, LookupError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        extract_text(payload)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn complete(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Generative fallback failed");
                failure_text(&e)
            }
        }
    }
}

/// Join the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, LookupError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::Shape("no candidates in response".to_string()))?;

    let text: Vec<String> = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(LookupError::Shape("candidate has no text parts".to_string()));
    }
    Ok(text.join(""))
}

/// Map a generation failure onto the apologetic user-facing message.
pub fn failure_text(err: &LookupError) -> String {
    format!("Sorry, I encountered an error: {}", err)
}
