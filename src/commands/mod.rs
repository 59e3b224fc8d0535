/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `chat`     - interactive session
- `sessions` - local session listing, transcripts and deletion
- `remote`   - backend-side session inspection
- one-shot `upload`, `ask`, `health`, `clear` and `profile` handlers below

Handlers are small; the behavior lives in [`Workspace`] and the
[`ApiGateway`].
*/

use crate::api::ApiGateway;
use crate::cli::ProfileCommand;
use crate::config::{Config, StorageBackendKind, StorageConfig};
use crate::error::{Result, TranscriptChatError};
use crate::storage::{SessionStore, SqliteBackend};
use crate::workspace::Workspace;
use colored::Colorize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

pub mod chat;
pub mod remote;
pub mod sessions;
pub mod special_commands;

/// Open the configured session store
///
/// An unusable SQLite file is not fatal: data is kept in memory for this
/// run instead.
pub fn open_store(config: &StorageConfig) -> SessionStore {
    if config.backend == StorageBackendKind::Memory {
        tracing::info!("Using in-memory session store");
        return SessionStore::in_memory();
    }

    let backend = match &config.path {
        Some(path) => SqliteBackend::new_with_path(path),
        None => SqliteBackend::new(),
    };

    match backend {
        Ok(backend) => {
            tracing::debug!("Using session store at {}", backend.path().display());
            SessionStore::new(Box::new(backend))
        }
        Err(e) => {
            tracing::warn!(
                "Local store unavailable ({}), keeping data in memory for this run",
                e
            );
            SessionStore::in_memory()
        }
    }
}

/// Build the gateway and a workspace over the configured store
///
/// # Errors
///
/// Returns error if the gateway cannot be created from `config.api`
pub fn open_workspace(config: &Config) -> Result<(Workspace, Arc<ApiGateway>)> {
    let gateway = Arc::new(ApiGateway::new(&config.api)?);
    let store = open_store(&config.storage);
    let workspace = Workspace::open(store, gateway.clone(), config.chat.clone());
    Ok((workspace, gateway))
}

/// Print a failure notice: a red title and the user-facing message
pub fn print_failure(title: &str, err: &anyhow::Error) {
    match err.downcast_ref::<TranscriptChatError>() {
        Some(TranscriptChatError::Validation { title, message }) => {
            eprintln!("{}: {}", title.red().bold(), message);
        }
        Some(known) => eprintln!("{}: {}", title.red().bold(), known.user_message()),
        None => eprintln!("{}: {}", title.red().bold(), err),
    }
}

/// Read a transcript from inline text, a file, or stdin
///
/// # Errors
///
/// Returns error if the file or stdin cannot be read
pub fn read_transcript(file: Option<&Path>, text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path).map_err(|e| {
            TranscriptChatError::Command(format!("Cannot read {}: {}", path.display(), e)).into()
        });
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Upload a transcript and report the new session
///
/// # Errors
///
/// Returns the validation or API error when the upload is rejected
pub async fn upload(config: &Config, file: Option<&Path>, text: Option<String>) -> Result<()> {
    let transcript = read_transcript(file, text)?;
    let (mut workspace, _gateway) = open_workspace(config)?;

    match workspace.upload_transcript(&transcript).await? {
        Some(summary) => {
            println!(
                "{} Private session created: {}",
                "Upload successful.".green(),
                summary.session_id.cyan()
            );
            println!(
                "Ask about it with {}",
                format!("transcript-chat ask --session {} <question>", summary.session_id).cyan()
            );
        }
        None => println!("{}", "Upload was cancelled.".yellow()),
    }
    Ok(())
}

/// Send one message in a session and print the reply
///
/// # Errors
///
/// Returns error if the session is unknown or the request fails
pub async fn ask(config: &Config, session: &str, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        println!("{}", "Nothing to send.".yellow());
        return Ok(());
    }

    let (mut workspace, _gateway) = open_workspace(config)?;

    let session_id = workspace
        .resolve_session(session)
        .ok_or_else(|| TranscriptChatError::Command(format!("Unknown session: {}", session)))?;
    workspace.select_session(&session_id);

    match workspace.send_message(message).await? {
        Some(reply) => println!("{}", reply.content),
        None => println!("{}", "Request cancelled.".yellow()),
    }
    Ok(())
}

/// Probe the backend
///
/// # Errors
///
/// Returns error when the backend is unreachable, so scripts see a
/// non-zero exit status
pub async fn health(config: &Config) -> Result<()> {
    let (mut workspace, gateway) = open_workspace(config)?;
    if workspace.check_health().await {
        println!("{} {}", "Online".green().bold(), gateway.base_url());
        Ok(())
    } else {
        println!("{} {}", "Offline".red().bold(), gateway.base_url());
        Err(TranscriptChatError::Command(format!(
            "Backend unreachable at {}",
            gateway.base_url()
        ))
        .into())
    }
}

/// Wipe local data
///
/// # Errors
///
/// Returns error when `yes` is false
pub fn clear(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        return Err(TranscriptChatError::Command(
            "Refusing to delete local data without --yes".to_string(),
        )
        .into());
    }
    let (mut workspace, _gateway) = open_workspace(config)?;
    let profile = workspace.clear_all();
    println!(
        "{} New identity: {}",
        "All your data has been cleared from this device.".green(),
        profile.username.cyan()
    );
    Ok(())
}

/// Show or rename the profile
///
/// # Errors
///
/// Returns error if the workspace cannot be opened
pub fn profile(config: &Config, command: ProfileCommand) -> Result<()> {
    let (mut workspace, _gateway) = open_workspace(config)?;
    match command {
        ProfileCommand::Show => sessions::print_profile(workspace.profile()),
        ProfileCommand::Rename { name } => {
            let profile = workspace.rename(&name);
            println!("{} {}", "Username updated:".green(), profile.username);
        }
    }
    Ok(())
}
