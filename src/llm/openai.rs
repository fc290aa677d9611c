//! OpenAI-compatible chat completions client.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex_lite::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GenerationError;

use super::prompt::{MAX_DIFF_LENGTH, build_system_prompt, truncate_diff};
use super::{GenerationRequest, Generator};

const MAX_TOKENS: u32 = 200;

static TRAILING_PERIOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)\.$").expect("trailing period pattern is valid"));

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    n: u8,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Generator that calls `{api_base}/chat/completions`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAiGenerator;

impl OpenAiGenerator {
    pub fn new() -> Self {
        Self
    }

    fn build_client(request: &GenerationRequest) -> Result<Client, GenerationError> {
        let mut builder = Client::builder().timeout(request.timeout);

        // The proxy comes from the resolved config only.
        builder = match request.proxy.as_deref() {
            Some(url) => {
                let proxy =
                    reqwest::Proxy::all(url).map_err(|source| GenerationError::InvalidProxy {
                        url: url.to_string(),
                        source,
                    })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        builder.build().map_err(GenerationError::ClientBuild)
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>, GenerationError> {
        let client = Self::build_client(request)?;
        let timeout_ms = request.timeout.as_millis() as u64;

        let system_prompt = build_system_prompt(
            &request.locale,
            request.max_length,
            request.commit_type,
            &request.instruction,
        );
        let diff = truncate_diff(&request.diff, MAX_DIFF_LENGTH);
        if diff.len() < request.diff.len() {
            warn!(
                "Diff truncated from {} to {} bytes before sending",
                request.diff.len(),
                diff.len()
            );
        }

        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: diff,
                },
            ],
            n: request.completions,
            temperature: 0.7,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let url = format!("{}/chat/completions", request.api_base.trim_end_matches('/'));
        debug!(
            "POST {} model={} n={} prompt={} chars",
            url,
            request.model,
            request.completions,
            system_prompt.len() + diff.len()
        );

        let map_transport = |e: reqwest::Error| {
            if e.is_timeout() {
                GenerationError::Timeout(timeout_ms)
            } else {
                GenerationError::Request(e)
            }
        };

        let response = client
            .post(&url)
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        status.canonical_reason().unwrap_or("Unknown error").to_string()
                    } else {
                        trimmed.to_string()
                    }
                });
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            let snippet: String = text.chars().take(200).collect();
            GenerationError::InvalidResponse(format!("{e}. Response: {snippet}"))
        })?;

        let candidates: Vec<String> = parsed
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.and_then(|m| m.content))
            .map(|content| sanitize_message(&content))
            .filter(|message| !message.is_empty())
            .collect();

        debug!("Received {} candidate message(s)", candidates.len());
        Ok(candidates)
    }
}

/// Normalize a raw completion into a single-line commit message.
///
/// Trims, drops line breaks, and removes a trailing period after a word.
pub fn sanitize_message(raw: &str) -> String {
    let flat: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();
    TRAILING_PERIOD.replace(&flat, "$1").into_owned()
}
