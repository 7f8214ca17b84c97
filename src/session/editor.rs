use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{
    answered_count, is_completed, progress_percent, record_answer, Answers, Debouncer,
    SessionStore,
};
use crate::clock::Clock;
use crate::error::{AppError, AppResult, StorageResult};
use crate::templates::Template;

/// Interactive editing of one template's answers with debounced autosave.
///
/// Each edit schedules a write for its question; once a question has been
/// quiet for the debounce delay, [`SessionEditor::tick`] persists the current
/// answers. [`SessionEditor::close`] flushes anything still pending, so
/// leaving a template never drops recent edits.
pub struct SessionEditor {
    template: Template,
    answers: Answers,
    sessions: SessionStore,
    pending: Debouncer<String, ()>,
}

impl SessionEditor {
    /// Open `template`, resuming its stored session if one exists.
    pub async fn open(
        sessions: SessionStore,
        template: Template,
        debounce_ms: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let answers = sessions
            .load(&template.id)
            .await
            .map(|s| s.answers)
            .unwrap_or_default();

        info!(
            template = %template.id,
            answered = answered_count(&answers),
            total = template.question_count(),
            "Session opened"
        );

        Self {
            template,
            answers,
            sessions,
            pending: Debouncer::new(debounce_ms, clock),
        }
    }

    /// Template being edited.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Current answers, including unflushed edits.
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Whether every question has a non-blank answer.
    pub fn is_completed(&self) -> bool {
        is_completed(&self.answers, self.template.question_count())
    }

    /// Answered questions as a percentage.
    pub fn progress_percent(&self) -> u8 {
        progress_percent(&self.answers, self.template.question_count())
    }

    /// Whether any edit is waiting to be written.
    pub fn has_pending_writes(&self) -> bool {
        self.pending.pending_count() > 0
    }

    /// Replace the answer to `question_id` and schedule an autosave.
    pub fn edit(&mut self, question_id: &str, text: &str) -> AppResult<()> {
        if self.template.question(question_id).is_none() {
            return Err(AppError::QuestionNotFound {
                template_id: self.template.id.clone(),
                question_id: question_id.to_string(),
            });
        }

        self.answers = record_answer(&self.answers, question_id, text);
        self.pending.schedule(question_id.to_string(), ());

        debug!(
            template = %self.template.id,
            question = %question_id,
            "Answer edited"
        );
        Ok(())
    }

    /// Persist the current answers once any edit's debounce delay has elapsed.
    ///
    /// Returns whether a write happened. Questions still inside their delay
    /// stay pending and are written again when they come due.
    pub async fn tick(&mut self) -> StorageResult<bool> {
        if self.pending.take_due().is_empty() {
            return Ok(false);
        }
        let answers = self.answers.clone();
        self.write(&answers).await?;
        Ok(true)
    }

    /// Persist every pending edit immediately.
    pub async fn flush(&mut self) -> StorageResult<bool> {
        if self.pending.drain().is_empty() {
            return Ok(false);
        }
        let answers = self.answers.clone();
        self.write(&answers).await?;
        Ok(true)
    }

    /// Flush pending edits and hand back the final answers.
    pub async fn close(mut self) -> StorageResult<Answers> {
        if let Err(e) = self.flush().await {
            warn!(template = %self.template.id, error = %e, "Failed to flush session on close");
            return Err(e);
        }
        Ok(self.answers)
    }

    async fn write(&self, answers: &Answers) -> StorageResult<()> {
        self.sessions
            .persist(&self.template.id, answers, self.template.question_count())
            .await?;
        Ok(())
    }
}
