//! Request and response bodies of the transcript chat backend

use serde::{Deserialize, Serialize};

/// Body of `POST /upload`
#[derive(Debug, Clone, Serialize)]
pub struct UploadRequest<'a> {
    pub transcript: &'a str,
    pub session_id: &'a str,
}

/// Success body of `POST /upload`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    /// Server-assigned session id, authoritative when present
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub transcript_length: Option<usize>,
}

impl UploadResponse {
    /// Id to record locally: the server's unless it is missing or blank
    pub fn resolved_session_id(&self, requested: &str) -> String {
        match self.session_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => requested.to_string(),
        }
    }
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

/// Success body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply
    pub response: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body of `GET /health`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub active_sessions: Option<usize>,
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// Session as the backend reports it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteSession {
    pub session_id: String,
    #[serde(default)]
    pub transcript_length: usize,
    #[serde(default)]
    pub message_count: usize,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
}

/// Body of `GET /sessions`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteSessionList {
    #[serde(default)]
    pub sessions: Vec<RemoteSession>,
    #[serde(default)]
    pub total_sessions: usize,
}

/// One entry of a backend-side chat history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteChatEntry {
    pub sender: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of `GET /session/{id}/history`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteHistory {
    pub session_id: String,
    #[serde(default)]
    pub chat_history: Vec<RemoteChatEntry>,
}

/// Body of the delete and clear endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusMessage {
    #[serde(default)]
    pub message: Option<String>,
}
