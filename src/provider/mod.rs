//! Remote text-generation provider.
//!
//! Talks to an OpenAI-style chat-completion endpoint (DeepSeek by default)
//! and maps transport and API failures into
//! [`GenerationError`](crate::error::GenerationError).

mod client;
mod types;

pub use client::ProviderClient;
pub use types::{
    ApiErrorBody, ApiErrorDetail, ChatMessage, ChatRequest, ChatResponse, Choice, ChoiceMessage,
    MessageRole, Usage,
};

use async_trait::async_trait;

use crate::error::GenerationResult;
use crate::session::Answers;
use crate::templates::Template;

/// Turns answered templates into prose.
#[async_trait]
pub trait DiaryGenerator: Send + Sync {
    /// Probe the provider with `credential`.
    ///
    /// Never fails: any transport error, timeout or non-200 status is `false`.
    async fn validate_credential(&self, credential: &str) -> bool;

    /// Generate a diary entry from the answers, in template question order.
    async fn generate(
        &self,
        template: &Template,
        answers: &Answers,
        credential: &str,
    ) -> GenerationResult<String>;
}
