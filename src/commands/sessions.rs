use crate::cli::SessionCommand;
use crate::config::Config;
use crate::error::{Result, TranscriptChatError};
use crate::storage::{ChatMessage, Sender, UserProfile};
use crate::workspace::Workspace;
use colored::Colorize;
use prettytable::{format, Table};

const PREVIEW_COLUMN_WIDTH: usize = 40;

/// Handle local session commands
pub fn handle_sessions(config: &Config, command: SessionCommand) -> Result<()> {
    let (mut workspace, _gateway) = super::open_workspace(config)?;

    match command {
        SessionCommand::List { search } => {
            print_sessions(&workspace, search.as_deref());
            if !workspace.sessions().is_empty() {
                println!(
                    "Use {} to continue a session.",
                    "transcript-chat chat --session <#|ID>".cyan()
                );
                println!();
            }
        }
        SessionCommand::Show { id } => {
            let session_id = resolve(&workspace, &id)?;
            workspace.select_session(&session_id);
            print_history(&workspace);
        }
        SessionCommand::Delete { id } => {
            let session_id = resolve(&workspace, &id)?;
            workspace.delete_session(&session_id);
            println!("{}", format!("Deleted session {}", session_id).green());
        }
    }

    Ok(())
}

fn resolve(workspace: &Workspace, key: &str) -> Result<String> {
    workspace
        .resolve_session(key)
        .ok_or_else(|| TranscriptChatError::Command(format!("Unknown session: {}", key)).into())
}

/// Collapse whitespace and cut to `width` characters
fn one_line(text: &str, width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > width {
        let cut: String = flat.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

/// Print the session table, optionally filtered
///
/// The `#` column is the position in the full list, so it can be passed to
/// `/open` or `--session` even when a filter is applied.
pub fn print_sessions(workspace: &Workspace, filter: Option<&str>) {
    let all = workspace.sessions();
    if all.is_empty() {
        println!("{}", "No sessions yet. Upload a transcript to start.".yellow());
        return;
    }

    let shown = workspace.search_sessions(filter.unwrap_or(""));
    if shown.is_empty() {
        println!(
            "{}",
            format!("No sessions match '{}'.", filter.unwrap_or_default()).yellow()
        );
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "#".bold(),
        "ID".bold(),
        "Preview".bold(),
        "Chars".bold(),
        "Messages".bold(),
        "Last Activity".bold()
    ]);

    for session in shown {
        let position = all
            .iter()
            .position(|s| s.session_id == session.session_id)
            .map(|i| i + 1)
            .unwrap_or_default();
        let marker = if workspace.current_session() == Some(session.session_id.as_str()) {
            format!("*{}", position)
        } else {
            position.to_string()
        };
        let preview = session
            .transcript_preview
            .as_deref()
            .map(|p| one_line(p, PREVIEW_COLUMN_WIDTH))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(prettytable::row![
            marker,
            session.short_id().cyan(),
            preview,
            session.transcript_length,
            session.message_count,
            session
                .last_activity
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        ]);
    }

    println!("\nSessions:");
    table.printstd();
    print_stats(workspace);
}

/// Print the one-line totals footer
pub fn print_stats(workspace: &Workspace) {
    let stats = workspace.stats();
    println!(
        "{} sessions, {} messages, {} transcript characters\n",
        stats.sessions, stats.messages, stats.characters
    );
}

/// Print one chat message
pub fn print_message(message: &ChatMessage) {
    let time = message
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M");
    let label = match message.sender {
        Sender::User => "you:".blue().bold(),
        Sender::Bot => "bot:".green().bold(),
    };
    println!("{} {} {}", time.to_string().dimmed(), label, message.content);
}

/// Print the open session's chat, or a hint when it is empty
pub fn print_history(workspace: &Workspace) {
    let Some(summary) = workspace.current_summary() else {
        println!("{}", "No session is open.".yellow());
        return;
    };

    println!(
        "\n{} {} ({} characters)",
        "Session".bold(),
        summary.session_id.cyan(),
        summary.transcript_length
    );
    if let Some(preview) = &summary.transcript_preview {
        println!("{}", one_line(preview, 80).dimmed());
    }
    println!();

    if workspace.chat_history().is_empty() {
        println!(
            "{}",
            "No messages yet. Ask a question about the transcript.".yellow()
        );
    }
    for message in workspace.chat_history() {
        print_message(message);
    }
    println!();
}

pub fn print_profile(profile: &UserProfile) {
    println!("{:<10} {}", "Name:".bold(), profile.username);
    println!("{:<10} {}", "User ID:".bold(), profile.user_id);
    println!(
        "{:<10} {}",
        "Since:".bold(),
        profile
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
    );
    println!("{:<10} {}", "Sessions:".bold(), profile.session_count);
}
