//! Static question templates.
//!
//! Templates are defined at build time and never mutated; the catalog only
//! offers lookup, search and category filtering over the built-ins.

mod builtins;

use serde::{Deserialize, Serialize};

/// Category filter value that matches every template.
pub const ALL_CATEGORIES: &str = "All";

/// A single prompt within a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the owning template.
    pub id: String,
    /// Prompt text shown to the user.
    pub question: String,
    /// Hint shown in an empty answer field.
    pub placeholder: String,
}

/// A named, ordered set of prompts used to elicit a diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Unique template identifier.
    pub id: String,
    /// Display name, also used as the document title.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Questions in display order.
    pub questions: Vec<Question>,
}

impl Question {
    /// Create a question.
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            placeholder: placeholder.into(),
        }
    }
}

impl Template {
    /// Number of questions.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }

    fn matches_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.category == category
    }
}

/// Read-only catalog of templates.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Catalog with the built-in templates.
    pub fn builtin() -> Self {
        Self::from_templates(builtins::all())
    }

    /// Catalog over an explicit template list.
    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Get a template by id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates in definition order.
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    /// Templates matching a case-insensitive search over name and description
    /// and a category filter (`None` or [`ALL_CATEGORIES`] match everything).
    pub fn filter(&self, search: Option<&str>, category: Option<&str>) -> Vec<&Template> {
        let search = search.unwrap_or("");
        let category = category.unwrap_or(ALL_CATEGORIES);
        self.templates
            .iter()
            .filter(|t| t.matches_search(search) && t.matches_category(category))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut cats: Vec<&str> = Vec::new();
        for t in &self.templates {
            if !cats.contains(&t.category.as_str()) {
                cats.push(&t.category);
            }
        }
        cats
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
