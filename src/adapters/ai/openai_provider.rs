//! OpenAI Provider - Implementation of AIProvider for OpenAI's chat API.
//!
//! Used to draft the justification paragraph. Requests are non-streaming;
//! transient failures are retried with exponential backoff.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Fallback wait when a 429 carries no usable hint.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: SecretString,
    /// Model to use (e.g., "gpt-4", "gpt-4o").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Upper bound for a single backoff wait.
    pub max_backoff: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: "gpt-4".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
            max_backoff: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the longest single backoff wait.
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(2);

        if let Some(ref instructions) = request.instructions {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: instructions.clone(),
            });
        }
        messages.push(OpenAIMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Sends a request and handles the response.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let header_retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => {
                let retry_after =
                    header_retry_after.unwrap_or_else(|| Self::parse_retry_after(&error_body));
                Err(AIError::rate_limited(retry_after))
            }
            400 => {
                if error_body.contains("maximum context length")
                    || error_body.contains("context_length_exceeded")
                {
                    let (max, tokens) = Self::parse_context_limits(&error_body);
                    Err(AIError::context_too_long(tokens, max))
                } else {
                    Err(AIError::InvalidRequest(error_body))
                }
            }
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from an error response body.
    fn parse_retry_after(error_body: &str) -> u32 {
        serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|parsed| {
                let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
                let rest = &message[message.find("try again in ")? + 13..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u32>().ok()
            })
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
    }

    /// Pulls `(max, requested)` token counts out of a context-length error.
    ///
    /// OpenAI phrases it as "maximum context length is 8192 tokens. However,
    /// your messages resulted in 9000 tokens". Missing numbers read as 0.
    fn parse_context_limits(error_body: &str) -> (u32, u32) {
        let mut numbers = error_body
            .split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<u32>().ok());
        let max = numbers.next().unwrap_or(0);
        let tokens = numbers.next().unwrap_or(0);
        (max, tokens)
    }

    /// Parses a non-streaming response.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Self::into_completion(openai_response)
    }

    fn into_completion(openai_response: OpenAIResponse) -> Result<CompletionResponse, AIError> {
        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        let finish_reason = FinishReason::from_wire(choice.finish_reason.as_deref());
        if finish_reason == FinishReason::ContentFilter {
            return Err(AIError::content_filtered("completion stopped by content filter"));
        }

        let usage = openai_response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content,
            usage,
            model: openai_response.model,
            finish_reason,
        })
    }

    /// Wait before retry number `retry_count` (0-based).
    ///
    /// Rate limits honor the provider's hint; everything else backs off
    /// exponentially (1s, 2s, 4s, ...). Both are capped by `max_backoff`.
    fn backoff_delay(&self, retry_count: u32, err: &AIError) -> Duration {
        let delay = match err {
            AIError::RateLimited { retry_after_secs } => {
                Duration::from_secs(u64::from(*retry_after_secs))
            }
            _ => Duration::from_secs(1u64 << retry_count.min(16)),
        };
        delay.min(self.config.max_backoff)
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            let err = match result {
                Ok(completion) => return Ok(completion),
                Err(err) => err,
            };

            if !err.is_retryable() || retry_count >= self.config.max_retries {
                return Err(err);
            }

            let delay = self.backoff_delay(retry_count, &err);
            tracing::warn!(
                trace_id = %request.trace_id,
                error = %err,
                retry = retry_count + 1,
                delay_ms = delay.as_millis() as u64,
                "Completion failed, retrying"
            );
            sleep(delay).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::new("test-key".to_string())
    }

    fn provider(config: OpenAIConfig) -> OpenAIProvider {
        OpenAIProvider::new(config).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new(key())
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5)
            .with_max_backoff(Duration::from_secs(8));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.max_backoff, Duration::from_secs(8));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_debug_redacts_key() {
        let config = OpenAIConfig::new(key());
        assert!(!format!("{:?}", config).contains("test-key"));
    }

    #[test]
    fn default_model_is_gpt4() {
        assert_eq!(OpenAIConfig::new(key()).model, "gpt-4");
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let p = provider(OpenAIConfig::new(key()).with_base_url("http://localhost:8080/v1/"));
        assert_eq!(p.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn request_puts_system_prompt_first() {
        let p = provider(OpenAIConfig::new(key()));
        let request = CompletionRequest::new("t", "Redija")
            .with_instructions("Você é um redator técnico")
            .with_max_tokens(1000)
            .with_temperature(0.4);

        let wire = serde_json::to_value(p.to_openai_request(&request)).unwrap();

        assert_eq!(wire["model"], "gpt-4");
        assert_eq!(wire["messages"][0]["role"], "system");
        assert_eq!(wire["messages"][1]["role"], "user");
        assert_eq!(wire["messages"][1]["content"], "Redija");
        assert_eq!(wire["max_tokens"], 1000);
    }

    #[test]
    fn request_omits_unset_options() {
        let p = provider(OpenAIConfig::new(key()));
        let request = CompletionRequest::new("t", "x");

        let wire = serde_json::to_value(p.to_openai_request(&request)).unwrap();

        assert!(wire.get("max_tokens").is_none());
        assert!(wire.get("temperature").is_none());
    }

    #[test]
    fn into_completion_reads_first_choice() {
        let body = r#"{"model":"gpt-4-0613","choices":[{"message":{"role":"assistant","content":"Justificativa."},"finish_reason":"stop"}],"usage":{"prompt_tokens":10,"completion_tokens":5}}"#;
        let response: OpenAIResponse = serde_json::from_str(body).unwrap();

        let completion = OpenAIProvider::into_completion(response).unwrap();

        assert_eq!(completion.content, "Justificativa.");
        assert_eq!(completion.model, "gpt-4-0613");
        assert_eq!(completion.usage.total(), 15);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn into_completion_rejects_empty_choices() {
        let response: OpenAIResponse =
            serde_json::from_str(r#"{"model":"gpt-4","choices":[]}"#).unwrap();
        assert!(matches!(
            OpenAIProvider::into_completion(response),
            Err(AIError::Parse(_))
        ));
    }

    #[test]
    fn into_completion_maps_content_filter() {
        let body = r#"{"model":"gpt-4","choices":[{"message":{"role":"assistant","content":""},"finish_reason":"content_filter"}]}"#;
        let response: OpenAIResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            OpenAIProvider::into_completion(response),
            Err(AIError::ContentFiltered { .. })
        ));
    }

    #[test]
    fn provider_info_gpt4() {
        let info = provider(OpenAIConfig::new(key())).provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4");
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 20 seconds."}}"#;
        assert_eq!(OpenAIProvider::parse_retry_after(error), 20);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(OpenAIProvider::parse_retry_after(error), 30);
        assert_eq!(OpenAIProvider::parse_retry_after("not json"), 30);
    }

    #[test]
    fn parse_context_limits_reads_both_numbers() {
        let error = r#"{"error":{"message":"This model's maximum context length is 8192 tokens. However, your messages resulted in 9000 tokens."}}"#;
        assert_eq!(OpenAIProvider::parse_context_limits(error), (8192, 9000));
    }

    #[test]
    fn backoff_is_exponential_and_capped() {
        let p = provider(OpenAIConfig::new(key()).with_max_backoff(Duration::from_secs(5)));
        let err = AIError::network("reset");
        assert_eq!(p.backoff_delay(0, &err), Duration::from_secs(1));
        assert_eq!(p.backoff_delay(1, &err), Duration::from_secs(2));
        assert_eq!(p.backoff_delay(2, &err), Duration::from_secs(4));
        assert_eq!(p.backoff_delay(3, &err), Duration::from_secs(5));
    }

    #[test]
    fn backoff_honors_rate_limit_hint() {
        let p = provider(OpenAIConfig::new(key()));
        assert_eq!(
            p.backoff_delay(0, &AIError::rate_limited(7)),
            Duration::from_secs(7)
        );
        assert_eq!(
            p.backoff_delay(0, &AIError::rate_limited(600)),
            Duration::from_secs(30)
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_without_retry_budget() {
        let p = provider(
            OpenAIConfig::new(key())
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(Duration::from_secs(2))
                .with_max_retries(0),
        );
        let request = CompletionRequest::new("t", "x");

        let result = p.complete(request).await;

        assert!(matches!(
            result,
            Err(AIError::Network(_)) | Err(AIError::Timeout { .. })
        ));
    }
}
