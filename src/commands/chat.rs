//! Interactive chat loop
//!
//! A readline prompt over a [`Workspace`]. Lines starting with `/` are
//! handled by [`super::special_commands`]; anything else is a question for
//! the open session. Ctrl-C while a request is in flight cancels that
//! request instead of leaving the program.

use super::special_commands::{parse_special_command, print_help, SpecialCommand};
use super::{open_workspace, print_failure, read_transcript, sessions};
use crate::api::{ApiGateway, TranscriptApi};
use crate::config::Config;
use crate::error::Result;
use crate::workspace::Workspace;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

/// Line that ends a pasted transcript
const PASTE_TERMINATOR: &str = ".";

/// Run the interactive chat
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `session` - Session to open on start (id, list number or id prefix)
///
/// # Errors
///
/// Returns error if the gateway or the line editor cannot be created
pub async fn run_chat(config: &Config, session: Option<String>) -> Result<()> {
    let (mut workspace, gateway) = open_workspace(config)?;
    let mut rl = DefaultEditor::new()?;

    print_welcome_banner(&workspace, &gateway);

    if config.chat.check_health_on_start {
        report_health(&mut workspace, &gateway).await;
    }

    if let Some(key) = session {
        open_session(&mut workspace, &key);
    } else if !workspace.sessions().is_empty() {
        sessions::print_sessions(&workspace, None);
    }

    loop {
        let prompt = build_prompt(&workspace);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                let command = match parse_special_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}\n", e.to_string().red());
                        continue;
                    }
                };

                match command {
                    SpecialCommand::Exit => break,
                    SpecialCommand::None => ask(&mut workspace, &gateway, trimmed).await,
                    SpecialCommand::UploadFile(path) => {
                        match read_transcript(Some(Path::new(&path)), None) {
                            Ok(text) => upload(&mut workspace, &gateway, &text).await,
                            Err(e) => print_failure("Upload failed", &e),
                        }
                    }
                    SpecialCommand::Paste => {
                        if let Some(text) = read_paste(&mut rl)? {
                            upload(&mut workspace, &gateway, &text).await;
                        }
                    }
                    SpecialCommand::ListSessions(filter) => {
                        sessions::print_sessions(&workspace, filter.as_deref());
                    }
                    SpecialCommand::Open(key) => open_session(&mut workspace, &key),
                    SpecialCommand::Delete(key) => match workspace.resolve_session(&key) {
                        Some(id) => {
                            workspace.delete_session(&id);
                            println!("{}\n", format!("Deleted session {}", id).green());
                        }
                        None => eprintln!("{}\n", format!("Unknown session: {}", key).red()),
                    },
                    SpecialCommand::History => sessions::print_history(&workspace),
                    SpecialCommand::WhoAmI => {
                        sessions::print_profile(workspace.profile());
                        println!();
                    }
                    SpecialCommand::Rename(name) => {
                        let profile = workspace.rename(&name);
                        println!("{} {}\n", "Username updated:".green(), profile.username);
                    }
                    SpecialCommand::Health => report_health(&mut workspace, &gateway).await,
                    SpecialCommand::Stats => sessions::print_stats(&workspace),
                    SpecialCommand::Clear => {
                        if confirm(&mut rl, "Delete all local sessions and chats? Type 'yes': ")? {
                            let profile = workspace.clear_all();
                            println!(
                                "{} New identity: {}\n",
                                "All your data has been cleared from this device.".green(),
                                profile.username.cyan()
                            );
                        } else {
                            println!("Nothing was deleted.\n");
                        }
                    }
                    SpecialCommand::Help => print_help(),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_welcome_banner(workspace: &Workspace, gateway: &ApiGateway) {
    println!("{}", "Transcript Chat".bold().cyan());
    println!(
        "Signed in as {} ({} sessions). Backend: {}",
        workspace.profile().username.bold(),
        workspace.sessions().len(),
        gateway.base_url()
    );
    println!(
        "Type {} for commands. Your sessions stay on this device.\n",
        "/help".cyan()
    );
}

fn build_prompt(workspace: &Workspace) -> String {
    match workspace.current_summary() {
        Some(summary) => format!("[{}] >>> ", summary.short_id().cyan()),
        None => format!("[{}] >>> ", "no session".dimmed()),
    }
}

/// Await `work` while Ctrl-C cancels the in-flight request
async fn cancellable<F: Future>(gateway: &Arc<ApiGateway>, work: F) -> F::Output {
    let gateway = gateway.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Cancelling request on Ctrl-C");
            gateway.cancel_pending();
        }
    });
    let output = work.await;
    watcher.abort();
    output
}

async fn ask(workspace: &mut Workspace, gateway: &Arc<ApiGateway>, text: &str) {
    if workspace.current_session().is_none() {
        println!(
            "{}\n",
            "No session is open. Use /upload, /paste or /open first.".yellow()
        );
        return;
    }

    println!("{}", "Thinking...".dimmed());
    match cancellable(gateway, workspace.send_message(text)).await {
        Ok(Some(reply)) => {
            sessions::print_message(&reply);
            println!();
        }
        Ok(None) => println!("{}\n", "Request cancelled.".yellow()),
        Err(e) => {
            print_failure("Error", &e);
            println!();
        }
    }
}

async fn upload(workspace: &mut Workspace, gateway: &Arc<ApiGateway>, text: &str) {
    println!("{}", "Uploading...".dimmed());
    match cancellable(gateway, workspace.upload_transcript(text)).await {
        Ok(Some(summary)) => println!(
            "{} Private session created: {}\nAsk a question about the transcript.\n",
            "Upload successful.".green(),
            summary.short_id().cyan()
        ),
        Ok(None) => println!("{}\n", "Upload cancelled.".yellow()),
        Err(e) => {
            print_failure("Upload failed", &e);
            println!();
        }
    }
}

fn open_session(workspace: &mut Workspace, key: &str) {
    match workspace.resolve_session(key) {
        Some(id) => {
            workspace.select_session(&id);
            sessions::print_history(workspace);
        }
        None => eprintln!("{}\n", format!("Unknown session: {}", key).red()),
    }
}

async fn report_health(workspace: &mut Workspace, gateway: &ApiGateway) {
    if workspace.check_health().await {
        println!("{} {}\n", "Online".green().bold(), gateway.base_url());
    } else {
        println!(
            "{} {} is not reachable. Messages will fail until it is.\n",
            "Offline".red().bold(),
            gateway.base_url()
        );
    }
}

/// Read lines until the terminator; `None` when the paste is abandoned
fn read_paste(rl: &mut DefaultEditor) -> Result<Option<String>> {
    println!(
        "Paste the transcript, then enter a line with only '{}'.",
        PASTE_TERMINATOR
    );
    let mut lines = Vec::new();
    loop {
        match rl.readline("") {
            Ok(line) if line.trim() == PASTE_TERMINATOR => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Interrupted) => {
                println!("Paste cancelled.\n");
                return Ok(None);
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(Some(lines.join("\n")))
}

fn confirm(rl: &mut DefaultEditor, question: &str) -> Result<bool> {
    match rl.readline(question) {
        Ok(answer) => Ok(answer.trim().eq_ignore_ascii_case("yes")),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
