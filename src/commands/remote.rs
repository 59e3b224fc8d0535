//! Backend-side session inspection
//!
//! These commands talk to the backend only; local sessions and chats are
//! never touched.

use crate::api::{ApiGateway, CallOutcome};
use crate::cli::RemoteCommand;
use crate::config::Config;
use crate::error::{Result, TranscriptChatError};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle remote session commands
pub async fn handle_remote(config: &Config, command: RemoteCommand) -> Result<()> {
    let gateway = ApiGateway::new(&config.api)?;

    match command {
        RemoteCommand::List => {
            let list = completed(gateway.remote_sessions().await?)?;
            if list.sessions.is_empty() {
                println!("{}", "The backend holds no sessions.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
            table.add_row(prettytable::row![
                "ID".bold(),
                "Chars".bold(),
                "Messages".bold(),
                "Created".bold(),
                "Last Activity".bold()
            ]);
            for session in &list.sessions {
                table.add_row(prettytable::row![
                    session.session_id.cyan(),
                    session.transcript_length,
                    session.message_count,
                    session.created_at.as_deref().unwrap_or("-"),
                    session.last_activity.as_deref().unwrap_or("-")
                ]);
            }

            println!("\nBackend sessions ({}):", list.total_sessions);
            table.printstd();
            println!();
        }
        RemoteCommand::Show { id } => {
            let session = completed(gateway.remote_session(&id).await?)?;
            println!("{:<15} {}", "Session:".bold(), session.session_id.cyan());
            println!("{:<15} {}", "Characters:".bold(), session.transcript_length);
            println!("{:<15} {}", "Messages:".bold(), session.message_count);
            println!(
                "{:<15} {}",
                "Created:".bold(),
                session.created_at.as_deref().unwrap_or("-")
            );
            println!(
                "{:<15} {}",
                "Last activity:".bold(),
                session.last_activity.as_deref().unwrap_or("-")
            );
        }
        RemoteCommand::History { id } => {
            let history = completed(gateway.remote_history(&id).await?)?;
            if history.chat_history.is_empty() {
                println!("{}", "No messages on the backend for this session.".yellow());
            }
            for entry in &history.chat_history {
                let label = if entry.sender == "user" {
                    "you:".blue().bold()
                } else {
                    "bot:".green().bold()
                };
                println!(
                    "{} {} {}",
                    entry.timestamp.as_deref().unwrap_or("").dimmed(),
                    label,
                    entry.content
                );
            }
        }
        RemoteCommand::Delete { id } => {
            let status = completed(gateway.delete_remote_session(&id).await?)?;
            println!(
                "{}",
                status
                    .message
                    .unwrap_or_else(|| format!("Deleted backend session {}", id))
                    .green()
            );
        }
        RemoteCommand::ClearAll { yes } => {
            if !yes {
                return Err(TranscriptChatError::Command(
                    "Refusing to clear backend sessions without --yes".to_string(),
                )
                .into());
            }
            let status = completed(gateway.clear_remote().await?)?;
            println!(
                "{}",
                status
                    .message
                    .unwrap_or_else(|| "Cleared all backend sessions".to_string())
                    .green()
            );
        }
    }

    Ok(())
}

fn completed<T>(outcome: CallOutcome<T>) -> Result<T> {
    outcome
        .completed()
        .ok_or_else(|| TranscriptChatError::Command("Request was cancelled".to_string()).into())
}
