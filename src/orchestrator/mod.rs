//! Diary generation flow.
//!
//! Sequences credential lookup, the remote generation attempt and the local
//! fallback as an explicit state machine:
//!
//! ```text
//! Idle ──▶ Generating ──▶ Succeeded
//!              │
//!              └────────▶ Degraded (fallback document + advisory)
//! ```
//!
//! Both terminal states can be re-entered by generating again. `generate`
//! takes `&mut self`, so a second generation cannot start while one is in
//! flight.

use std::sync::Arc;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::credentials::CredentialManager;
use crate::error::GenerationError;
use crate::fallback;
use crate::provider::DiaryGenerator;
use crate::session::Answers;
use crate::templates::Template;

/// How an advisory should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorySeverity {
    /// Nothing failed; remote generation is simply not configured.
    Neutral,
    /// Remote generation was configured but failed.
    Error,
}

/// Why the fallback document was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    /// Failure kind.
    pub error: GenerationError,
}

impl Advisory {
    /// Presentation severity.
    pub fn severity(&self) -> AdvisorySeverity {
        match self.error {
            GenerationError::MissingCredential => AdvisorySeverity::Neutral,
            _ => AdvisorySeverity::Error,
        }
    }

    /// User-facing text.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Generation flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState {
    /// Nothing generated yet.
    Idle,
    /// A generation is in progress.
    Generating,
    /// The provider produced the document.
    Succeeded {
        /// Polished diary text.
        document: String,
    },
    /// The local formatter produced the document.
    Degraded {
        /// Fallback diary text.
        document: String,
        /// Reason the fallback was used.
        advisory: Advisory,
    },
}

impl GenerationState {
    fn as_str(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::Generating => "generating",
            GenerationState::Succeeded { .. } => "succeeded",
            GenerationState::Degraded { .. } => "degraded",
        }
    }

    /// The generated document, once in a terminal state.
    pub fn document(&self) -> Option<&str> {
        match self {
            GenerationState::Succeeded { document } | GenerationState::Degraded { document, .. } => {
                Some(document.as_str())
            }
            GenerationState::Idle | GenerationState::Generating => None,
        }
    }

    /// The advisory, if the fallback was used.
    pub fn advisory(&self) -> Option<&Advisory> {
        match self {
            GenerationState::Degraded { advisory, .. } => Some(advisory),
            _ => None,
        }
    }
}

/// Runs diary generation with graceful degradation.
pub struct Orchestrator {
    credentials: CredentialManager,
    generator: Arc<dyn DiaryGenerator>,
    clock: Arc<dyn Clock>,
    state: GenerationState,
}

impl Orchestrator {
    /// Create an orchestrator in the `Idle` state.
    pub fn new(
        credentials: CredentialManager,
        generator: Arc<dyn DiaryGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            generator,
            clock,
            state: GenerationState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Generate a diary for completed `answers`.
    ///
    /// Completion is the caller's precondition. Always ends in `Succeeded`
    /// or `Degraded`.
    pub async fn generate(&mut self, template: &Template, answers: &Answers) -> &GenerationState {
        self.transition_to(GenerationState::Generating);

        let next = match self.credentials.get().await {
            None => self.degrade(template, answers, GenerationError::MissingCredential),
            Some(credential) => match self.generator.generate(template, answers, &credential).await
            {
                Ok(document) => GenerationState::Succeeded { document },
                Err(error) => self.degrade(template, answers, error),
            },
        };

        self.transition_to(next);
        &self.state
    }

    fn degrade(
        &self,
        template: &Template,
        answers: &Answers,
        error: GenerationError,
    ) -> GenerationState {
        warn!(
            template = %template.id,
            kind = error.kind(),
            "Falling back to local formatting"
        );
        GenerationState::Degraded {
            document: fallback::format(template, answers, self.clock.now()),
            advisory: Advisory { error },
        }
    }

    fn transition_to(&mut self, next: GenerationState) {
        info!(
            from = self.state.as_str(),
            to = next.as_str(),
            "Generation state transition"
        );
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_severity() {
        let neutral = Advisory {
            error: GenerationError::MissingCredential,
        };
        assert_eq!(neutral.severity(), AdvisorySeverity::Neutral);

        let failed = Advisory {
            error: GenerationError::Timeout,
        };
        assert_eq!(failed.severity(), AdvisorySeverity::Error);
        assert!(failed.message().contains("timed out"));
    }

    #[test]
    fn test_state_accessors() {
        assert_eq!(GenerationState::Idle.document(), None);
        assert_eq!(GenerationState::Generating.advisory(), None);

        let done = GenerationState::Succeeded {
            document: "text".to_string(),
        };
        assert_eq!(done.document(), Some("text"));
        assert_eq!(done.advisory(), None);

        let degraded = GenerationState::Degraded {
            document: "doc".to_string(),
            advisory: Advisory {
                error: GenerationError::RateLimited,
            },
        };
        assert_eq!(degraded.document(), Some("doc"));
        assert_eq!(
            degraded.advisory().map(|a| a.error.clone()),
            Some(GenerationError::RateLimited)
        );
    }
}
