//! Prompt construction for diary generation.
//!
//! The provider receives a single user message: the polishing instruction
//! followed by every question and its answer in template order.

use crate::session::{answer_for, Answers};
use crate::templates::Template;

/// Instruction that precedes the question/answer content.
pub const DIARY_POLISH_PROMPT: &str = r#"You are an assistant who is good at light copy-editing. Lightly polish the diary entry the user filled in below. Keep the user's meaning and do not embellish. Only do the following:
1. Fix obvious grammatical errors;
2. Improve the flow of ideas so the language reads naturally;
3. Keep the user's colloquial expressions and personal style;
4. Do not add anything the user did not mention, and do not add evaluations;
5. Stay concise and avoid filler or repetition;
6. Drop the questions and weave the answers together into a single diary entry.

Return only the polished version, with no explanations or other text.

The user's content is as follows:"#;

/// Rendered in place of an answer the user left blank.
pub const UNANSWERED_MARKER: &str = "(unanswered)";

/// Minimal message sent when probing whether a credential works.
pub const VALIDATION_PROBE: &str = "ping";

/// Render the question/answer blocks in template order.
pub fn build_qa_content(template: &Template, answers: &Answers) -> String {
    template
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answer = answer_for(answers, &question.id).unwrap_or(UNANSWERED_MARKER);
            format!(
                "Question {}: {}\nAnswer: {}",
                index + 1,
                question.question,
                answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full prompt for the diary generation request.
pub fn build_diary_prompt(template: &Template, answers: &Answers) -> String {
    format!(
        "{}\n\n{}\n",
        DIARY_POLISH_PROMPT,
        build_qa_content(template, answers)
    )
}
