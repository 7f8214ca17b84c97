//! Answer-session persistence.
//!
//! One session is kept per template under `askdiary_session_<templateId>`.
//! Loads fail soft: anything that cannot be read back as a session is
//! treated as "no session".

mod debounce;
mod editor;

pub use debounce::Debouncer;
pub use editor::SessionEditor;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::{StorageError, StorageResult};
use crate::storage::KeyValueStore;

/// Key prefix for persisted sessions.
pub const SESSION_KEY_PREFIX: &str = "askdiary_session_";

/// Question id to answer text.
pub type Answers = BTreeMap<String, String>;

/// Persisted in-progress answers for one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSession {
    /// Template this session belongs to.
    pub template_id: String,
    /// Answers keyed by question id; need not cover every question.
    pub answers: Answers,
    /// When the session was last written.
    pub last_updated: DateTime<Utc>,
    /// Whether every question had a non-blank answer at write time.
    pub is_completed: bool,
}

/// Storage key for a template's session.
pub fn storage_key(template_id: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, template_id)
}

/// The answer for `question_id`, unless it is missing or blank.
pub fn answer_for<'a>(answers: &'a Answers, question_id: &str) -> Option<&'a str> {
    answers
        .get(question_id)
        .map(String::as_str)
        .filter(|a| !a.trim().is_empty())
}

/// Number of answers with non-blank text.
pub fn answered_count(answers: &Answers) -> usize {
    answers.values().filter(|a| !a.trim().is_empty()).count()
}

/// Completion depends only on the answers and the question count.
pub fn is_completed(answers: &Answers, total_questions: usize) -> bool {
    answered_count(answers) == total_questions
}

/// Percentage of questions answered, clamped to 100.
pub fn progress_percent(answers: &Answers, total_questions: usize) -> u8 {
    if total_questions == 0 {
        return 0;
    }
    let pct = answered_count(answers) * 100 / total_questions;
    pct.min(100) as u8
}

/// New mapping with `question_id` set to `text`.
pub fn record_answer(answers: &Answers, question_id: &str, text: &str) -> Answers {
    let mut updated = answers.clone();
    updated.insert(question_id.to_string(), text.to_string());
    updated
}

/// Reads and writes answer sessions.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Create a session store over an injected key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Load the session for `template_id`.
    ///
    /// Missing, unreadable or malformed data all yield `None`.
    pub async fn load(&self, template_id: &str) -> Option<AnswerSession> {
        let key = storage_key(template_id);
        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(template = %template_id, error = %e, "Failed to read session");
                return None;
            }
        };

        match decode_session(&key, &raw) {
            Ok(session) => {
                debug!(
                    template = %template_id,
                    answers = session.answers.len(),
                    "Session restored"
                );
                Some(session)
            }
            Err(e) => {
                warn!(template = %template_id, error = %e, "Discarding malformed session");
                None
            }
        }
    }

    /// Stamp, serialize and write a session, replacing any previous one.
    pub async fn persist(
        &self,
        template_id: &str,
        answers: &Answers,
        total_questions: usize,
    ) -> StorageResult<AnswerSession> {
        let session = AnswerSession {
            template_id: template_id.to_string(),
            answers: answers.clone(),
            last_updated: self.clock.now(),
            is_completed: is_completed(answers, total_questions),
        };

        let json = serde_json::to_string(&session).map_err(|e| StorageError::Query {
            message: format!("Failed to serialize session: {}", e),
        })?;
        self.store.set(&storage_key(template_id), &json).await?;

        debug!(
            template = %template_id,
            answered = answered_count(answers),
            total = total_questions,
            completed = session.is_completed,
            "Session persisted"
        );
        Ok(session)
    }

    /// Template ids that have a stored session.
    pub async fn template_ids(&self) -> StorageResult<Vec<String>> {
        let keys = self.store.keys_with_prefix(SESSION_KEY_PREFIX).await?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(SESSION_KEY_PREFIX).map(str::to_string))
            .collect())
    }
}

fn decode_session(key: &str, raw: &str) -> StorageResult<AnswerSession> {
    serde_json::from_str(raw).map_err(|e| StorageError::Deserialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}
