use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::types::{ApiErrorBody, ChatRequest, ChatResponse};
use super::DiaryGenerator;
use crate::config::{ProviderConfig, RequestConfig};
use crate::error::{GenerationError, GenerationResult};
use crate::prompts::{build_diary_prompt, VALIDATION_PROBE};
use crate::session::Answers;
use crate::templates::Template;

/// Client for a chat-completion provider.
///
/// Each call is exactly one round trip; retrying is left to the caller.
#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    base_url: String,
    provider: ProviderConfig,
    request_config: RequestConfig,
}

impl ProviderClient {
    /// Create a new provider client
    pub fn new(provider: &ProviderConfig, request_config: RequestConfig) -> GenerationResult<Self> {
        let client = Client::builder().build().map_err(GenerationError::from)?;

        Ok(Self {
            client,
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            provider: provider.clone(),
            request_config,
        })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Post a chat-completion request and return the raw response
    async fn send(
        &self,
        request: &ChatRequest,
        credential: &str,
        timeout: Duration,
    ) -> GenerationResult<reqwest::Response> {
        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            timeout_ms = timeout.as_millis(),
            "Calling chat-completion endpoint"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", credential))
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(request)
            .send()
            .await?;

        Ok(response)
    }

    /// Send one chat-completion request and decode the body
    async fn execute_request(
        &self,
        request: &ChatRequest,
        credential: &str,
        timeout: Duration,
    ) -> GenerationResult<ChatResponse> {
        let response = self.send(request, credential, timeout).await?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(
                status.as_u16(),
                ApiErrorBody::message_from(&error_body),
            ));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::Unknown {
                    message: format!("Failed to parse response: {}", e),
                }
            }
        })?;

        Ok(chat_response)
    }
}

#[async_trait]
impl DiaryGenerator for ProviderClient {
    async fn validate_credential(&self, credential: &str) -> bool {
        if credential.trim().is_empty() {
            return false;
        }

        let request = ChatRequest::new(&self.provider.model, VALIDATION_PROBE, 1);
        let timeout = Duration::from_millis(self.request_config.validate_timeout_ms);

        match self.send(&request, credential, timeout).await {
            Ok(response) if response.status() == StatusCode::OK => {
                info!("Credential validated");
                true
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "Credential rejected");
                false
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Credential validation failed");
                false
            }
        }
    }

    async fn generate(
        &self,
        template: &Template,
        answers: &Answers,
        credential: &str,
    ) -> GenerationResult<String> {
        if credential.trim().is_empty() {
            return Err(GenerationError::MissingCredential);
        }

        let prompt = build_diary_prompt(template, answers);
        let request = ChatRequest::new(&self.provider.model, prompt, self.provider.max_tokens)
            .with_temperature(self.provider.temperature)
            .with_stream(false);
        let timeout = Duration::from_millis(self.request_config.generate_timeout_ms);

        let start = Instant::now();
        let result = self.execute_request(&request, credential, timeout).await;
        let latency = start.elapsed();

        match result {
            Ok(response) => match response.first_content() {
                Some(content) => {
                    info!(
                        template = %template.id,
                        latency_ms = latency.as_millis(),
                        chars = content.chars().count(),
                        "Diary generation succeeded"
                    );
                    Ok(content.to_string())
                }
                None => {
                    error!(
                        template = %template.id,
                        latency_ms = latency.as_millis(),
                        "Provider returned no usable content"
                    );
                    Err(GenerationError::Unknown {
                        message: "Provider returned an empty response".to_string(),
                    })
                }
            },
            Err(e) => {
                error!(
                    template = %template.id,
                    kind = e.kind(),
                    error = %e,
                    latency_ms = latency.as_millis(),
                    "Diary generation failed"
                );
                Err(e)
            }
        }
    }
}
