//! Command-line interface definition for transcript-chat
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// transcript-chat - chat with an AI about your meeting transcripts
///
/// Upload a transcript to the chat backend, then ask questions about it.
/// Sessions and chat transcripts are kept privately on this device.
#[derive(Parser, Debug, Clone)]
#[command(name = "transcript-chat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Override the backend base URL
    #[arg(long, env = "TRANSCRIPT_CHAT_API_BASE")]
    pub api_base: Option<String>,

    /// Override the local store database path
    #[arg(long, env = "TRANSCRIPT_CHAT_STORE_DB")]
    pub storage_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Session to open on start (id, list number or id prefix)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Upload a transcript and create a session
    Upload {
        /// File containing the transcript (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Transcript text given inline
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
    },

    /// Ask one question in a session
    Ask {
        /// Session (id, list number or id prefix)
        #[arg(short, long)]
        session: String,

        /// Question to send
        #[arg(trailing_var_arg = true, required = true)]
        message: Vec<String>,
    },

    /// Manage local sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Show or edit the local profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Delete all local data and start a new identity
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Check whether the backend is reachable
    Health,

    /// Inspect sessions held by the backend
    Remote {
        #[command(subcommand)]
        command: RemoteCommand,
    },
}

/// Local session subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List local sessions
    List {
        /// Only show sessions whose id or preview contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print the chat transcript of a session
    Show {
        /// Session (id, list number or id prefix)
        id: String,
    },

    /// Delete a local session and its transcript
    Delete {
        /// Session (id, list number or id prefix)
        id: String,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show the profile
    Show,

    /// Change the display name
    Rename {
        /// New display name
        name: String,
    },
}

/// Backend session subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum RemoteCommand {
    /// List sessions on the backend
    List,

    /// Show backend metadata for a session
    Show {
        /// Backend session id
        id: String,
    },

    /// Show the backend's chat history for a session
    History {
        /// Backend session id
        id: String,
    },

    /// Delete a session on the backend
    Delete {
        /// Backend session id
        id: String,
    },

    /// Delete every session on the backend
    ClearAll {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
