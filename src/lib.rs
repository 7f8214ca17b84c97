//! # AskDiary
//!
//! A template-driven journaling assistant: pick a question template, answer
//! its prompts, and get a diary entry back, optionally polished by a
//! chat-completion provider (DeepSeek by default).
//!
//! ## Features
//!
//! - **Durable sessions**: in-progress answers survive restarts, one session
//!   per template, with debounced autosave during interactive editing
//! - **Completion tracking**: a session is complete once every question has a
//!   non-blank answer
//! - **AI polishing**: one chat-completion call per diary, with a small error
//!   taxonomy for provider failures
//! - **Graceful degradation**: a local markdown formatter backs every failure
//!   mode, including an unconfigured API key
//!
//! ## Architecture
//!
//! ```text
//! CLI → Orchestrator → Provider (HTTP)
//!          ↓      ↘
//!   SessionStore   Fallback formatter
//!          ↓
//!   KeyValueStore (SQLite)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use askdiary::clock::SystemClock;
//! use askdiary::credentials::CredentialManager;
//! use askdiary::orchestrator::Orchestrator;
//! use askdiary::provider::ProviderClient;
//! use askdiary::session::SessionStore;
//! use askdiary::storage::SqliteStore;
//! use askdiary::templates::TemplateCatalog;
//! use askdiary::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(SqliteStore::new(&config.database).await?);
//!     let clock = Arc::new(SystemClock);
//!     let provider = Arc::new(ProviderClient::new(&config.provider, config.request.clone())?);
//!
//!     let catalog = TemplateCatalog::builtin();
//!     let template = catalog.get("template-progress-report").unwrap();
//!     let answers = SessionStore::new(store.clone(), clock.clone())
//!         .load(&template.id)
//!         .await
//!         .map(|s| s.answers)
//!         .unwrap_or_default();
//!
//!     let mut orchestrator = Orchestrator::new(CredentialManager::new(store), provider, clock);
//!     let state = orchestrator.generate(template, &answers).await;
//!     println!("{}", state.document().unwrap_or_default());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Command-line interface and command execution.
pub mod cli;
/// Wall-clock abstraction for timestamps and debouncing.
pub mod clock;
/// Configuration management.
pub mod config;
/// API credential storage.
pub mod credentials;
/// Error types and result aliases for the application.
pub mod error;
/// Exporting generated documents to disk.
pub mod export;
/// Local, network-free diary formatting.
pub mod fallback;
/// Diary generation state machine.
pub mod orchestrator;
/// Prompt construction for the generation provider.
pub mod prompts;
/// Chat-completion provider client and wire types.
pub mod provider;
/// Answer sessions, completion and debounced autosave.
pub mod session;
/// Key-value storage backends.
pub mod storage;
/// Static question templates.
pub mod templates;

pub use config::Config;
pub use error::{AppError, AppResult, GenerationError};
