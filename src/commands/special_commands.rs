//! Special commands parser for interactive chat mode
//!
//! Lines starting with `/` are commands; anything else is a chat message
//! for the open session. Command names are case-insensitive, arguments are
//! kept as typed.

use colored::Colorize;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Upload the transcript in a file
    UploadFile(String),
    /// Read a multi-line transcript from the prompt
    Paste,
    /// List sessions, optionally filtered
    ListSessions(Option<String>),
    /// Open a session
    Open(String),
    /// Delete a session
    Delete(String),
    /// Reprint the open session's transcript
    History,
    /// Show the profile
    WhoAmI,
    /// Change the display name
    Rename(String),
    /// Probe the backend
    Health,
    /// Show aggregate counters
    Stats,
    /// Wipe local data
    Clear,
    /// Display help information
    Help,
    /// Exit the interactive session
    Exit,
    /// Not a special command
    None,
}

fn required(command: &str, usage: &str, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(arg.to_string())
    }
}

/// Parse a user input line into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for an unrecognised `/command`
/// and `CommandError::MissingArgument` when a required argument is absent.
///
/// # Examples
///
/// ```
/// use transcript_chat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(
///     parse_special_command("/open 2").unwrap(),
///     SpecialCommand::Open("2".to_string())
/// );
/// assert_eq!(
///     parse_special_command("What was decided?").unwrap(),
///     SpecialCommand::None
/// );
/// assert!(parse_special_command("/frobnicate").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, arg)) => (name.to_lowercase(), arg.trim()),
        None => (lower.clone(), ""),
    };

    match name.as_str() {
        "/upload" => required("/upload", "/upload <file>", arg).map(SpecialCommand::UploadFile),
        "/paste" => Ok(SpecialCommand::Paste),
        "/sessions" | "/list" | "/ls" => Ok(SpecialCommand::ListSessions(
            (!arg.is_empty()).then(|| arg.to_string()),
        )),
        "/open" | "/use" => required("/open", "/open <id|number>", arg).map(SpecialCommand::Open),
        "/delete" | "/rm" => {
            required("/delete", "/delete <id|number>", arg).map(SpecialCommand::Delete)
        }
        "/history" => Ok(SpecialCommand::History),
        "/whoami" | "/profile" => Ok(SpecialCommand::WhoAmI),
        "/rename" => required("/rename", "/rename <name>", arg).map(SpecialCommand::Rename),
        "/health" | "/status" => Ok(SpecialCommand::Health),
        "/stats" => Ok(SpecialCommand::Stats),
        "/clear" => Ok(SpecialCommand::Clear),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Print the list of interactive commands
pub fn print_help() {
    println!("\n{}", "Commands".bold());
    let rows = [
        ("/upload <file>", "Upload a transcript file and open the new session"),
        ("/paste", "Paste a transcript; finish with a line containing only '.'"),
        ("/sessions [text]", "List sessions, optionally filtered by id or preview"),
        ("/open <id|number>", "Open a session"),
        ("/delete <id|number>", "Delete a session and its chat"),
        ("/history", "Show the open session's chat"),
        ("/whoami", "Show your profile"),
        ("/rename <name>", "Change your display name"),
        ("/health", "Check whether the backend is reachable"),
        ("/stats", "Show totals across sessions"),
        ("/clear", "Delete all local data and start a new identity"),
        ("/help", "Show this help"),
        ("/exit", "Leave"),
    ];
    for (command, description) in rows {
        println!("  {:<22} {}", command.cyan(), description);
    }
    println!("\nAnything else is sent as a question about the open session.\n");
}
