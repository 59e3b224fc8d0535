use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-device identity used to namespace sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque identifier, generated once and never changed
    pub user_id: String,
    /// Display name, editable by the user
    pub username: String,
    /// When the profile was created
    pub created_at: DateTime<Utc>,
    /// Cached length of the session list
    #[serde(default)]
    pub session_count: usize,
}

impl UserProfile {
    /// Create a fresh profile for the given identifier
    ///
    /// The default display name is `User ` followed by the last six
    /// characters of the identifier.
    pub fn new(user_id: String) -> Self {
        let username = default_username(&user_id);
        Self {
            user_id,
            username,
            created_at: Utc::now(),
            session_count: 0,
        }
    }

    /// Apply a partial update, leaving unset fields untouched
    ///
    /// `user_id` is not part of [`ProfileUpdate`] and can never change.
    pub fn merge(&mut self, update: ProfileUpdate) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(session_count) = update.session_count {
            self.session_count = session_count;
        }
    }
}

fn default_username(user_id: &str) -> String {
    let chars: Vec<char> = user_id.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(6)..].iter().collect();
    format!("User {}", tail)
}

/// Fields of a [`UserProfile`] that may be changed after creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name; any string is accepted, including the empty one
    pub username: Option<String>,
    /// New cached session count
    pub session_count: Option<usize>,
}

impl ProfileUpdate {
    /// Update that only renames the profile
    pub fn username(name: impl Into<String>) -> Self {
        Self {
            username: Some(name.into()),
            ..Self::default()
        }
    }

    /// Update that only sets the session count
    pub fn session_count(count: usize) -> Self {
        Self {
            session_count: Some(count),
            ..Self::default()
        }
    }
}

/// Local summary of one uploaded transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier (server-assigned when the server returned one)
    pub session_id: String,
    /// Transcript length in characters
    pub transcript_length: usize,
    /// Number of messages in the local chat transcript
    pub message_count: usize,
    /// When the session was uploaded
    pub created_at: DateTime<Utc>,
    /// Last chat exchange (or upload time)
    pub last_activity: DateTime<Utc>,
    /// Owning profile, not referentially enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Leading characters of the transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_preview: Option<String>,
}

impl SessionSummary {
    /// Short form of the id for tables and notices
    pub fn short_id(&self) -> String {
        self.session_id.chars().take(8).collect()
    }
}

/// Who sent a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The local user
    User,
    /// The AI assistant
    Bot,
}

impl Sender {
    /// Convert sender to its persisted string form
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn of a chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender of the message
    pub sender: Sender,
    /// Message text
    pub content: String,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message stamped with the current time
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message stamped with the current time
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
