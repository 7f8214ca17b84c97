//! Local diary formatting.
//!
//! Renders answers as plain markdown without any network access. This path
//! backs every generation failure, so it must not fail for any template.

use chrono::{DateTime, Utc};

use crate::session::{answer_for, Answers};
use crate::templates::Template;

/// Rendered in place of a blank answer.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content";

/// Format of the generation timestamp line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render `answers` as a markdown document in template question order.
pub fn format(template: &Template, answers: &Answers, generated_at: DateTime<Utc>) -> String {
    let sections = template
        .questions
        .iter()
        .map(|q| {
            let answer = answer_for(answers, &q.id).unwrap_or(NO_CONTENT_PLACEHOLDER);
            format!("## {}\n\n{}\n", q.question, answer)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# {}\n\n*Generated: {}*\n\n{}",
        template.name,
        generated_at.format(TIMESTAMP_FORMAT),
        sections
    )
}
