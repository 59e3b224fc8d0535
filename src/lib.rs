//! transcript-chat - chat with an AI about meeting transcripts
//!
//! This library provides a private, per-device workspace for uploading
//! meeting transcripts to a remote chat backend and asking questions about
//! them, with sessions and chat transcripts kept in a local store.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `storage`: local identity, session index and chat transcripts over a
//!   key-value backend (SQLite or memory)
//! - `api`: the remote backend gateway with single-flight cancellation
//! - `workspace`: headless controller tying the store and gateway together
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: command-line interface and handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use transcript_chat::{ApiGateway, Config, SessionStore, Workspace};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let gateway = Arc::new(ApiGateway::new(&config.api)?);
//!     let mut workspace = Workspace::open(SessionStore::in_memory(), gateway, config.chat);
//!     if let Some(session) = workspace
//!         .upload_transcript("Team discussed Q3 roadmap and budget.")
//!         .await?
//!     {
//!         println!("Created {}", session.session_id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod storage;
pub mod workspace;

// Re-export commonly used types
pub use api::{ApiGateway, CallOutcome, TranscriptApi};
pub use config::Config;
pub use error::{Result, TranscriptChatError};
pub use storage::{ChatMessage, Sender, SessionStore, SessionSummary, UserProfile};
pub use workspace::{Workspace, WorkspaceStats};
