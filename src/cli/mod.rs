//! Command-line interface.
//!
//! Each subcommand is executed against an [`AppContext`] and reports back a
//! [`CliResult`]; `main` prints the message and exits with the code.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::clock::Clock;
use crate::config::Config;
use crate::credentials::{CredentialManager, CredentialOutcome};
use crate::error::{AppError, AppResult};
use crate::export;
use crate::orchestrator::{AdvisorySeverity, GenerationState, Orchestrator};
use crate::provider::DiaryGenerator;
use crate::session::{answer_for, answered_count, is_completed, SessionEditor, SessionStore};
use crate::storage::KeyValueStore;
use crate::templates::{Template, TemplateCatalog, ALL_CATEGORIES};

/// Template-driven journaling assistant.
#[derive(Parser, Debug)]
#[command(name = "askdiary", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List templates
    Templates {
        /// Case-insensitive search over name and description
        #[arg(long)]
        search: Option<String>,

        /// Only templates in this category ("All" for every category)
        #[arg(long)]
        category: Option<String>,
    },

    /// List template categories
    Categories,

    /// Show a template's questions and the saved answers
    Show {
        /// Template identifier
        template_id: String,
    },

    /// List templates with a saved session
    Sessions,

    /// Set one answer and save it immediately
    Answer {
        /// Template identifier
        template_id: String,
        /// Question identifier
        question_id: String,
        /// Answer text
        text: String,
    },

    /// Answer a template's questions interactively, with autosave
    Fill {
        /// Template identifier
        template_id: String,
    },

    /// Generate the diary for a completed template
    Generate {
        /// Template identifier
        template_id: String,

        /// Also save the document as markdown into this directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Manage the provider API key
    #[command(subcommand)]
    Key(KeyCommands),
}

/// API key subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum KeyCommands {
    /// Validate and save an API key
    Set {
        /// The API key
        key: String,

        /// Save without contacting the provider
        #[arg(long)]
        no_validate: bool,
    },

    /// Check an API key (the saved one if omitted) against the provider
    Test {
        /// The API key to test
        key: Option<String>,
    },

    /// Remove the saved API key
    Clear,

    /// Show whether an API key is configured
    Status,
}

/// Result of CLI command execution.
pub struct CliResult {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Output message
    pub message: String,
}

impl CliResult {
    /// Create a success result with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            message: message.into(),
        }
    }

    /// Create an error result with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            message: message.into(),
        }
    }
}

impl From<AppError> for CliResult {
    fn from(err: AppError) -> Self {
        CliResult::error(err.to_string())
    }
}

/// Shared dependencies for command execution.
pub struct AppContext {
    /// Application configuration.
    pub config: Config,
    /// Durable key-value store.
    pub store: Arc<dyn KeyValueStore>,
    /// Template catalog.
    pub catalog: TemplateCatalog,
    /// Remote generation provider.
    pub generator: Arc<dyn DiaryGenerator>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Session store over the shared key-value store.
    pub fn sessions(&self) -> SessionStore {
        SessionStore::new(self.store.clone(), self.clock.clone())
    }

    /// Credential manager over the shared key-value store.
    pub fn credentials(&self) -> CredentialManager {
        CredentialManager::new(self.store.clone())
    }

    /// Look up a template or fail with `TemplateNotFound`.
    pub fn template(&self, id: &str) -> AppResult<&Template> {
        self.catalog.get(id).ok_or_else(|| AppError::TemplateNotFound {
            template_id: id.to_string(),
        })
    }
}

/// Execute a CLI command.
pub async fn execute_command(command: Commands, ctx: &AppContext) -> CliResult {
    match command {
        Commands::Templates { search, category } => {
            execute_templates(ctx, search.as_deref(), category.as_deref())
        }
        Commands::Categories => execute_categories(ctx),
        Commands::Show { template_id } => execute_show(ctx, &template_id).await,
        Commands::Sessions => execute_sessions(ctx).await,
        Commands::Answer {
            template_id,
            question_id,
            text,
        } => execute_answer(ctx, &template_id, &question_id, &text).await,
        Commands::Fill { template_id } => execute_fill(ctx, &template_id).await,
        Commands::Generate {
            template_id,
            output_dir,
        } => execute_generate(ctx, &template_id, output_dir).await,
        Commands::Key(command) => execute_key(ctx, command).await,
    }
}

fn execute_templates(ctx: &AppContext, search: Option<&str>, category: Option<&str>) -> CliResult {
    let templates = ctx.catalog.filter(search, category);
    if templates.is_empty() {
        return CliResult::success("No templates match.");
    }

    let mut output = String::new();
    for t in templates {
        output.push_str(&format!(
            "{:<28} {} [{}]\n    {}\n",
            t.id, t.name, t.category, t.description
        ));
        for (i, q) in t.questions.iter().take(2).enumerate() {
            output.push_str(&format!("    {}. {}\n", i + 1, q.question));
        }
    }
    CliResult::success(output.trim_end())
}

fn execute_categories(ctx: &AppContext) -> CliResult {
    let mut output = format!("{}\n", ALL_CATEGORIES);
    for category in ctx.catalog.categories() {
        output.push_str(category);
        output.push('\n');
    }
    CliResult::success(output.trim_end())
}

async fn execute_show(ctx: &AppContext, template_id: &str) -> CliResult {
    let template = match ctx.template(template_id) {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    let answers = ctx
        .sessions()
        .load(template_id)
        .await
        .map(|s| s.answers)
        .unwrap_or_default();

    let total = template.question_count();
    let mut output = format!(
        "{}\n{}\n\n{} questions, {} answered\n\n",
        template.name,
        template.description,
        total,
        answered_count(&answers)
    );
    for q in &template.questions {
        let mark = if answer_for(&answers, &q.id).is_some() {
            "x"
        } else {
            " "
        };
        output.push_str(&format!("[{}] {} {}\n", mark, q.id, q.question));
        match answer_for(&answers, &q.id) {
            Some(answer) => output.push_str(&format!("      {}\n", answer)),
            None => output.push_str(&format!("      ({})\n", q.placeholder)),
        }
    }
    CliResult::success(output.trim_end())
}

async fn execute_sessions(ctx: &AppContext) -> CliResult {
    let sessions = ctx.sessions();
    let ids = match sessions.template_ids().await {
        Ok(ids) => ids,
        Err(e) => return CliResult::error(format!("Failed to list sessions: {}", e)),
    };

    let mut output = String::new();
    for id in ids {
        let Some(session) = sessions.load(&id).await else {
            continue;
        };
        let name = ctx
            .catalog
            .get(&id)
            .map(|t| t.name.as_str())
            .unwrap_or("(unknown template)");
        output.push_str(&format!(
            "{:<28} {:<32} {} answered, {}, updated {}\n",
            id,
            name,
            answered_count(&session.answers),
            if session.is_completed {
                "complete"
            } else {
                "in progress"
            },
            session.last_updated.format("%Y-%m-%d %H:%M")
        ));
    }

    if output.is_empty() {
        return CliResult::success("No saved sessions.");
    }
    CliResult::success(output.trim_end())
}

async fn execute_answer(
    ctx: &AppContext,
    template_id: &str,
    question_id: &str,
    text: &str,
) -> CliResult {
    let template = match ctx.template(template_id) {
        Ok(t) => t.clone(),
        Err(e) => return e.into(),
    };

    // Non-interactive edit: skip the debounce and persist before exiting.
    let mut editor = SessionEditor::open(
        ctx.sessions(),
        template,
        ctx.config.session.debounce_ms,
        ctx.clock.clone(),
    )
    .await;
    if let Err(e) = editor.edit(question_id, text) {
        return e.into();
    }
    let total = editor.template().question_count();
    match editor.close().await {
        Ok(answers) => CliResult::success(format!(
            "Saved. {}/{} answered{}",
            answered_count(&answers),
            total,
            if is_completed(&answers, total) {
                "; ready to generate"
            } else {
                ""
            }
        )),
        Err(e) => CliResult::error(format!("Failed to save answer: {}", e)),
    }
}

async fn execute_fill(ctx: &AppContext, template_id: &str) -> CliResult {
    let template = match ctx.template(template_id) {
        Ok(t) => t.clone(),
        Err(e) => return e.into(),
    };
    let debounce_ms = ctx.config.session.debounce_ms;
    let mut editor =
        SessionEditor::open(ctx.sessions(), template.clone(), debounce_ms, ctx.clock.clone()).await;

    println!("{}", template.name);
    println!("Press Enter to keep an existing answer, type :q to stop.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut autosave = tokio::time::interval(Duration::from_millis(debounce_ms.max(50)));

    for (index, question) in template.questions.iter().enumerate() {
        println!("{}. {}", index + 1, question.question);
        match answer_for(editor.answers(), &question.id) {
            Some(existing) => println!("   current: {}", existing),
            None => println!("   hint: {}", question.placeholder),
        }
        print!("> ");
        if let Err(e) = std::io::stdout().flush() {
            warn!(error = %e, "Failed to flush prompt");
        }

        let line = loop {
            tokio::select! {
                line = lines.next_line() => break line,
                _ = autosave.tick() => {
                    if let Err(e) = editor.tick().await {
                        warn!(error = %e, "Autosave failed");
                    }
                }
            }
        };

        match line {
            Ok(Some(text)) => {
                let text = text.trim_end();
                if text == ":q" {
                    break;
                }
                if !text.is_empty() {
                    if let Err(e) = editor.edit(&question.id, text) {
                        return e.into();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                break;
            }
        }
    }

    let progress = editor.progress_percent();
    let completed = editor.is_completed();
    match editor.close().await {
        Ok(_) if completed => CliResult::success(format!(
            "All questions answered. Run `askdiary generate {}` to create the diary.",
            template.id
        )),
        Ok(_) => CliResult::success(format!("Progress saved ({}% answered).", progress)),
        Err(e) => CliResult::error(format!("Failed to save session: {}", e)),
    }
}

async fn execute_generate(
    ctx: &AppContext,
    template_id: &str,
    output_dir: Option<PathBuf>,
) -> CliResult {
    let template = match ctx.template(template_id) {
        Ok(t) => t,
        Err(e) => return e.into(),
    };
    let answers = ctx
        .sessions()
        .load(template_id)
        .await
        .map(|s| s.answers)
        .unwrap_or_default();

    let total = template.question_count();
    if !is_completed(&answers, total) {
        return AppError::SessionIncomplete {
            answered: answered_count(&answers),
            total,
        }
        .into();
    }

    let mut orchestrator =
        Orchestrator::new(ctx.credentials(), ctx.generator.clone(), ctx.clock.clone());
    let state = orchestrator.generate(template, &answers).await;

    if let Some(advisory) = state.advisory() {
        let label = match advisory.severity() {
            AdvisorySeverity::Neutral => "note",
            AdvisorySeverity::Error => "warning",
        };
        eprintln!("{}: {} (showing the basic format)", label, advisory.message());
    }

    let document = match state {
        GenerationState::Succeeded { document } | GenerationState::Degraded { document, .. } => {
            document.clone()
        }
        GenerationState::Idle | GenerationState::Generating => {
            return CliResult::error("Generation did not finish");
        }
    };

    if let Some(dir) = output_dir {
        match export::write_document(&dir, &template.name, &document, ctx.clock.now()) {
            Ok(path) => eprintln!("Saved to {}", path.display()),
            Err(e) => return CliResult::error(format!("Failed to export document: {}", e)),
        }
    }

    CliResult::success(document)
}

async fn execute_key(ctx: &AppContext, command: KeyCommands) -> CliResult {
    let credentials = ctx.credentials();
    match command {
        KeyCommands::Set { key, no_validate } => {
            if no_validate {
                if key.trim().is_empty() {
                    return CliResult::error("Enter an API key");
                }
                return match credentials.save(&key).await {
                    Ok(()) => CliResult::success("API key saved (not validated)"),
                    Err(e) => CliResult::error(format!("Failed to save API key: {}", e)),
                };
            }
            match credentials.configure(&key, ctx.generator.as_ref()).await {
                Ok(CredentialOutcome::Empty) => CliResult::error("Enter an API key"),
                Ok(CredentialOutcome::Saved) => {
                    CliResult::success("API key validated and saved")
                }
                Ok(CredentialOutcome::Rejected) => CliResult::error(
                    "API key validation failed; check the key and the network connection",
                ),
                Err(e) => CliResult::error(format!("Failed to save API key: {}", e)),
            }
        }
        KeyCommands::Test { key } => {
            let key = match key.filter(|k| !k.trim().is_empty()) {
                Some(k) => k.trim().to_string(),
                None => match credentials.get().await {
                    Some(k) => k,
                    None => return CliResult::error("No API key to test"),
                },
            };
            if ctx.generator.validate_credential(&key).await {
                CliResult::success("API key is valid")
            } else {
                CliResult::error("API key validation failed")
            }
        }
        KeyCommands::Clear => match credentials.remove().await {
            Ok(()) => CliResult::success("API key cleared"),
            Err(e) => CliResult::error(format!("Failed to clear API key: {}", e)),
        },
        KeyCommands::Status => match credentials.masked().await {
            Some(masked) => CliResult::success(format!("API key configured: {}", masked)),
            None => CliResult::success(
                "No API key configured; diaries will use the basic format",
            ),
        },
    }
}
