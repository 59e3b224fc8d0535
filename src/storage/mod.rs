//! Local session store
//!
//! Persists the device identity, session summaries and chat transcripts in
//! a [`KeyValueBackend`]. Every value is a JSON document under a fixed key:
//!
//! - `ai_assistant_user_id` - the raw identifier
//! - `ai_assistant_user_profile` - [`UserProfile`]
//! - `ai_assistant_user_sessions` - array of [`SessionSummary`]
//! - `ai_assistant_chat_<session id>` - array of [`ChatMessage`]
//!
//! The store never fails. Backend errors and unparsable JSON read as
//! "absent" and failed writes are dropped; both are logged at warn level.

use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod backend;
pub mod ids;
pub mod types;

pub use backend::{KeyValueBackend, MemoryBackend, SqliteBackend};
pub use types::{ChatMessage, ProfileUpdate, Sender, SessionSummary, UserProfile};

/// Key holding the raw device identifier
pub const USER_ID_KEY: &str = "ai_assistant_user_id";
/// Key holding the serialized profile
pub const PROFILE_KEY: &str = "ai_assistant_user_profile";
/// Key holding the serialized session list
pub const SESSIONS_KEY: &str = "ai_assistant_user_sessions";

/// Key holding the transcript of one session
pub fn chat_key(session_id: &str) -> String {
    format!("ai_assistant_chat_{}", session_id)
}

/// Session store over an injected backend
pub struct SessionStore {
    backend: Box<dyn KeyValueBackend>,
}

impl SessionStore {
    /// Create a store over the given backend
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Create a store over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Reading {} failed, treating as absent: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding malformed value under {}: {}", key, e);
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Could not serialize value for {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.backend.set(key, &json) {
            tracing::warn!("Writing {} failed, change not persisted: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            tracing::warn!("Removing {} failed: {}", key, e);
        }
    }

    /// Stored identifier, or a freshly generated and persisted one
    fn user_id(&self) -> String {
        match self.backend.get(USER_ID_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => return id,
            Ok(_) => {}
            Err(e) => tracing::warn!("Reading {} failed: {}", USER_ID_KEY, e),
        }

        let id = ids::new_user_id();
        if let Err(e) = self.backend.set(USER_ID_KEY, &id) {
            tracing::warn!("Writing {} failed: {}", USER_ID_KEY, e);
        }
        tracing::info!("Created new device identity {}", id);
        id
    }

    /// Read the profile, creating and persisting one when absent
    ///
    /// A corrupt profile is replaced; the separately stored identifier is
    /// reused when it is still readable.
    pub fn get_or_create_profile(&self) -> UserProfile {
        if let Some(profile) = self.read::<UserProfile>(PROFILE_KEY) {
            return profile;
        }

        let mut profile = UserProfile::new(self.user_id());
        profile.session_count = self.list_sessions().len();
        self.write(PROFILE_KEY, &profile);
        profile
    }

    /// Merge fields into the profile and persist the result
    pub fn update_profile(&self, update: ProfileUpdate) -> UserProfile {
        let mut profile = self.get_or_create_profile();
        profile.merge(update);
        self.write(PROFILE_KEY, &profile);
        profile
    }

    /// All sessions in insertion order
    pub fn list_sessions(&self) -> Vec<SessionSummary> {
        self.read(SESSIONS_KEY).unwrap_or_default()
    }

    fn write_sessions(&self, sessions: &[SessionSummary]) -> UserProfile {
        self.write(SESSIONS_KEY, sessions);
        self.update_profile(ProfileUpdate::session_count(sessions.len()))
    }

    /// Insert or replace a session by id
    ///
    /// Returns the session list and profile as persisted, so callers can
    /// mirror them in memory.
    pub fn save_session(&self, summary: SessionSummary) -> (Vec<SessionSummary>, UserProfile) {
        let mut sessions = self.list_sessions();
        match sessions
            .iter_mut()
            .find(|s| s.session_id == summary.session_id)
        {
            Some(existing) => *existing = summary,
            None => sessions.push(summary),
        }
        let profile = self.write_sessions(&sessions);
        (sessions, profile)
    }

    /// Remove a session and its transcript
    pub fn delete_session(&self, session_id: &str) -> (Vec<SessionSummary>, UserProfile) {
        let mut sessions = self.list_sessions();
        sessions.retain(|s| s.session_id != session_id);
        self.remove(&chat_key(session_id));
        let profile = self.write_sessions(&sessions);
        (sessions, profile)
    }

    /// Transcript of a session, empty when none is recorded
    pub fn get_chat_history(&self, session_id: &str) -> Vec<ChatMessage> {
        self.read(&chat_key(session_id)).unwrap_or_default()
    }

    /// Replace the transcript of a session
    pub fn save_chat_history(&self, session_id: &str, history: &[ChatMessage]) {
        self.write(&chat_key(session_id), history);
    }

    /// Wipe everything and start over with a new identity
    pub fn clear_all(&self) -> UserProfile {
        for session in self.list_sessions() {
            self.remove(&chat_key(&session.session_id));
        }
        self.remove(SESSIONS_KEY);
        self.remove(PROFILE_KEY);
        self.remove(USER_ID_KEY);
        tracing::info!("Cleared all local data");
        self.get_or_create_profile()
    }
}
