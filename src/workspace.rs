//! Headless chat workspace
//!
//! [`Workspace`] is what the terminal front end drives. It keeps an
//! in-memory view of the session store (profile, session list, active
//! session and its transcript) and updates it right after every store
//! write, so the two never diverge. Network calls go through a
//! [`TranscriptApi`]; a superseded call resolves to `Ok(None)` and leaves
//! state as it was at the time of the call.

use crate::api::{CallOutcome, TranscriptApi};
use crate::config::ChatConfig;
use crate::error::{Result, TranscriptChatError};
use crate::storage::{
    ids, ChatMessage, ProfileUpdate, SessionStore, SessionSummary, UserProfile,
};
use chrono::Utc;
use std::sync::Arc;

/// Aggregate counters over all local sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkspaceStats {
    pub sessions: usize,
    pub messages: usize,
    pub characters: usize,
}

/// Local sessions plus the remote API, as seen by one device
pub struct Workspace {
    store: SessionStore,
    api: Arc<dyn TranscriptApi>,
    settings: ChatConfig,
    profile: UserProfile,
    sessions: Vec<SessionSummary>,
    current_session: Option<String>,
    chat_history: Vec<ChatMessage>,
    online: bool,
}

impl Workspace {
    /// Load the profile and session list from the store
    pub fn open(store: SessionStore, api: Arc<dyn TranscriptApi>, settings: ChatConfig) -> Self {
        let profile = store.get_or_create_profile();
        let sessions = store.list_sessions();
        tracing::info!(
            "Opened workspace for {} with {} sessions",
            profile.user_id,
            sessions.len()
        );
        Self {
            store,
            api,
            settings,
            profile,
            sessions,
            current_session: None,
            chat_history: Vec::new(),
            online: true,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    /// Id of the open session, if any
    pub fn current_session(&self) -> Option<&str> {
        self.current_session.as_deref()
    }

    /// Summary of the open session, if any
    pub fn current_summary(&self) -> Option<&SessionSummary> {
        let id = self.current_session.as_deref()?;
        self.sessions.iter().find(|s| s.session_id == id)
    }

    /// Transcript of the open session
    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    /// Result of the last completed health check
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Resolve user input to a session id
    ///
    /// Accepts a full id, a 1-based position in the session list, or an
    /// unambiguous id prefix.
    pub fn resolve_session(&self, key: &str) -> Option<String> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        if let Some(s) = self.sessions.iter().find(|s| s.session_id == key) {
            return Some(s.session_id.clone());
        }
        if let Ok(index) = key.parse::<usize>() {
            if index >= 1 && index <= self.sessions.len() {
                return Some(self.sessions[index - 1].session_id.clone());
            }
        }
        let mut matches = self.sessions.iter().filter(|s| s.session_id.starts_with(key));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.session_id.clone()),
            _ => None,
        }
    }

    /// Open a session and load its transcript
    ///
    /// Returns false when no such session exists; state is unchanged then.
    pub fn select_session(&mut self, session_id: &str) -> bool {
        if !self.sessions.iter().any(|s| s.session_id == session_id) {
            return false;
        }
        self.chat_history = self.store.get_chat_history(session_id);
        self.current_session = Some(session_id.to_string());
        true
    }

    /// Validate and upload a transcript, then open the new session
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or too short transcript
    /// (no request is made), or the gateway error when the upload fails.
    pub async fn upload_transcript(&mut self, transcript: &str) -> Result<Option<SessionSummary>> {
        if transcript.trim().is_empty() {
            return Err(TranscriptChatError::validation(
                "No transcript provided",
                "Please paste your meeting transcript to continue.",
            )
            .into());
        }

        let transcript_length = transcript.chars().count();
        if transcript_length < self.settings.min_transcript_length {
            return Err(TranscriptChatError::validation(
                "Transcript too short",
                "Please provide a longer, valid meeting transcript.",
            )
            .into());
        }

        let requested_id = ids::new_session_id(&self.profile.user_id);
        let response = match self.api.upload(transcript, &requested_id).await? {
            CallOutcome::Completed(response) => response,
            CallOutcome::Aborted => {
                tracing::debug!("Upload superseded, ignoring");
                return Ok(None);
            }
        };

        let now = Utc::now();
        let summary = SessionSummary {
            session_id: response.resolved_session_id(&requested_id),
            transcript_length,
            message_count: 0,
            created_at: now,
            last_activity: now,
            user_id: Some(self.profile.user_id.clone()),
            transcript_preview: Some(
                transcript
                    .chars()
                    .take(self.settings.preview_length)
                    .collect(),
            ),
        };

        self.store_session(summary.clone());
        self.select_session(&summary.session_id);
        tracing::info!("Created session {}", summary.session_id);
        Ok(Some(summary))
    }

    /// Send a message in the open session
    ///
    /// The user's message is appended and persisted before the request is
    /// made. On failure the transcript is restored to what it was before
    /// the call. Returns `Ok(None)` when skipped (blank message or no open
    /// session) or superseded.
    ///
    /// # Errors
    ///
    /// Returns the gateway error after rolling back the optimistic append.
    pub async fn send_message(&mut self, text: &str) -> Result<Option<ChatMessage>> {
        let Some(session_id) = self.current_session.clone() else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        let previous = self.chat_history.clone();
        let mut pending = previous.clone();
        pending.push(ChatMessage::user(text));
        self.store_history(&session_id, pending);

        let reply = match self.api.chat(&session_id, text).await {
            Ok(CallOutcome::Completed(reply)) => reply,
            Ok(CallOutcome::Aborted) => {
                tracing::debug!("Chat request superseded, keeping the unanswered message");
                self.sync_message_count(&session_id);
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Chat request failed, reverting message: {}", e);
                self.store_history(&session_id, previous);
                return Err(e);
            }
        };

        let bot_message = ChatMessage::bot(reply.response);
        let mut history = self.chat_history.clone();
        history.push(bot_message.clone());
        self.store_history(&session_id, history);
        self.sync_message_count(&session_id);

        Ok(Some(bot_message))
    }

    /// Record the transcript length and activity time on the session summary
    fn sync_message_count(&mut self, session_id: &str) {
        if let Some(existing) = self
            .sessions
            .iter()
            .find(|s| s.session_id == session_id)
            .cloned()
        {
            self.store_session(SessionSummary {
                message_count: self.chat_history.len(),
                last_activity: Utc::now(),
                ..existing
            });
        }
    }

    /// Delete a local session and its transcript
    ///
    /// Closes it first when it is the open session. Returns whether the
    /// session existed.
    pub fn delete_session(&mut self, session_id: &str) -> bool {
        let existed = self.sessions.iter().any(|s| s.session_id == session_id);
        let (sessions, profile) = self.store.delete_session(session_id);
        self.sessions = sessions;
        self.profile = profile;

        if self.current_session.as_deref() == Some(session_id) {
            self.current_session = None;
            self.chat_history.clear();
        }
        existed
    }

    /// Change the display name
    pub fn rename(&mut self, username: &str) -> &UserProfile {
        self.profile = self.store.update_profile(ProfileUpdate::username(username));
        &self.profile
    }

    /// Remove all local data and switch to a fresh identity
    pub fn clear_all(&mut self) -> &UserProfile {
        self.profile = self.store.clear_all();
        self.sessions.clear();
        self.current_session = None;
        self.chat_history.clear();
        &self.profile
    }

    /// Probe the backend and record whether it is reachable
    ///
    /// A superseded probe leaves the previous status in place.
    pub async fn check_health(&mut self) -> bool {
        match self.api.health().await {
            Ok(CallOutcome::Completed(_)) => self.online = true,
            Ok(CallOutcome::Aborted) => {}
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                self.online = false;
            }
        }
        self.online
    }

    /// Sessions whose id or preview contains `query`, ignoring case
    pub fn search_sessions(&self, query: &str) -> Vec<&SessionSummary> {
        let needle = query.trim().to_lowercase();
        self.sessions
            .iter()
            .filter(|s| {
                needle.is_empty()
                    || s.session_id.to_lowercase().contains(&needle)
                    || s
                        .transcript_preview
                        .as_deref()
                        .is_some_and(|p| p.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn stats(&self) -> WorkspaceStats {
        WorkspaceStats {
            sessions: self.sessions.len(),
            messages: self.sessions.iter().map(|s| s.message_count).sum(),
            characters: self.sessions.iter().map(|s| s.transcript_length).sum(),
        }
    }

    fn store_session(&mut self, summary: SessionSummary) {
        let (sessions, profile) = self.store.save_session(summary);
        self.sessions = sessions;
        self.profile = profile;
    }

    fn store_history(&mut self, session_id: &str, history: Vec<ChatMessage>) {
        self.store.save_chat_history(session_id, &history);
        self.chat_history = history;
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.api.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChatResponse, HealthResponse, UploadResponse};
    use crate::storage::{chat_key, KeyValueBackend, MemoryBackend, Sender};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone)]
    enum Reply {
        Ok(String),
        Fail(u16, String),
        Abort,
    }

    fn reply_outcome<T>(reply: &Reply, ok: impl FnOnce(String) -> T) -> Result<CallOutcome<T>> {
        match reply {
            Reply::Ok(value) => Ok(CallOutcome::Completed(ok(value.clone()))),
            Reply::Fail(status, message) => Err(TranscriptChatError::Api {
                status: *status,
                message: message.clone(),
            }
            .into()),
            Reply::Abort => Ok(CallOutcome::Aborted),
        }
    }

    /// Scripted API that also records what the store held mid-request
    struct FakeApi {
        upload: Mutex<Reply>,
        chat: Mutex<Reply>,
        health: Mutex<Reply>,
        calls: AtomicUsize,
        cancels: AtomicUsize,
        observed: Option<MemoryBackend>,
        history_during_chat: Mutex<Vec<ChatMessage>>,
    }

    impl FakeApi {
        fn new(observed: Option<MemoryBackend>) -> Self {
            Self {
                upload: Mutex::new(Reply::Ok("abc123".to_string())),
                chat: Mutex::new(Reply::Ok("The budget was approved.".to_string())),
                health: Mutex::new(Reply::Ok(String::new())),
                calls: AtomicUsize::new(0),
                cancels: AtomicUsize::new(0),
                observed,
                history_during_chat: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TranscriptApi for FakeApi {
        async fn health(&self) -> Result<CallOutcome<HealthResponse>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            reply_outcome(&self.health.lock().unwrap(), |_| HealthResponse::default())
        }

        async fn upload(&self, _t: &str, _id: &str) -> Result<CallOutcome<UploadResponse>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            reply_outcome(&self.upload.lock().unwrap(), |id| UploadResponse {
                session_id: Some(id),
                ..Default::default()
            })
        }

        async fn chat(&self, session_id: &str, _m: &str) -> Result<CallOutcome<ChatResponse>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(backend) = &self.observed {
                let raw = backend.get(&chat_key(session_id)).unwrap().unwrap_or_default();
                *self.history_during_chat.lock().unwrap() =
                    serde_json::from_str(&raw).unwrap_or_default();
            }
            reply_outcome(&self.chat.lock().unwrap(), |response| ChatResponse {
                response,
                session_id: None,
            })
        }

        fn cancel_pending(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn workspace() -> (Workspace, Arc<FakeApi>, MemoryBackend) {
        let backend = MemoryBackend::new();
        let api = Arc::new(FakeApi::new(Some(backend.clone())));
        let store = SessionStore::new(Box::new(backend.clone()));
        let ws = Workspace::open(store, api.clone(), ChatConfig::default());
        (ws, api, backend)
    }

    const TRANSCRIPT: &str = "Team discussed Q3 roadmap and budget.";

    #[tokio::test]
    async fn test_short_transcript_rejected_without_request() {
        let (mut ws, api, _) = workspace();
        let err = ws.upload_transcript("hello").await.unwrap_err();
        match err.downcast_ref::<TranscriptChatError>() {
            Some(TranscriptChatError::Validation { title, .. }) => {
                assert_eq!(title, "Transcript too short")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(ws.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_blank_transcript_rejected_without_request() {
        let (mut ws, api, _) = workspace();
        let err = ws.upload_transcript("   \n\t  ").await.unwrap_err();
        assert!(err.to_string().starts_with("No transcript provided"));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upload_records_server_session() {
        let (mut ws, _, _) = workspace();
        let summary = ws.upload_transcript(TRANSCRIPT).await.unwrap().unwrap();

        assert_eq!(summary.session_id, "abc123");
        assert_eq!(summary.message_count, 0);
        assert_eq!(summary.transcript_length, 37);
        assert_eq!(summary.transcript_preview.as_deref(), Some(TRANSCRIPT));
        assert_eq!(summary.user_id.as_deref(), Some(ws.profile().user_id.as_str()));
        assert_eq!(ws.current_session(), Some("abc123"));
        assert_eq!(ws.profile().session_count, 1);
        assert_eq!(ws.sessions(), &[summary]);
    }

    #[tokio::test]
    async fn test_upload_preview_is_truncated() {
        let (mut ws, _, _) = workspace();
        let long = "x".repeat(250);
        let summary = ws.upload_transcript(&long).await.unwrap().unwrap();
        assert_eq!(summary.transcript_preview.unwrap().chars().count(), 100);
        assert_eq!(summary.transcript_length, 250);
    }

    #[tokio::test]
    async fn test_upload_falls_back_to_local_id() {
        let (mut ws, api, _) = workspace();
        *api.upload.lock().unwrap() = Reply::Ok(String::new());
        let summary = ws.upload_transcript(TRANSCRIPT).await.unwrap().unwrap();
        assert!(summary
            .session_id
            .starts_with(&format!("{}_", ws.profile().user_id)));
    }

    #[tokio::test]
    async fn test_failed_upload_creates_nothing() {
        let (mut ws, api, _) = workspace();
        *api.upload.lock().unwrap() = Reply::Fail(500, "Upload failed".to_string());
        let err = ws.upload_transcript(TRANSCRIPT).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<TranscriptChatError>().unwrap().user_message(),
            "Upload failed"
        );
        assert!(ws.sessions().is_empty());
        assert!(ws.current_session().is_none());
    }

    #[tokio::test]
    async fn test_aborted_upload_is_silent() {
        let (mut ws, api, _) = workspace();
        *api.upload.lock().unwrap() = Reply::Abort;
        assert!(ws.upload_transcript(TRANSCRIPT).await.unwrap().is_none());
        assert!(ws.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_send_message_appends_exchange() {
        let (mut ws, _, backend) = workspace();
        ws.upload_transcript(TRANSCRIPT).await.unwrap();

        let reply = ws.send_message("What was decided?").await.unwrap().unwrap();
        assert_eq!(reply.sender, Sender::Bot);

        let history = ws.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sender, Sender::User);
        assert_eq!(history[0].content, "What was decided?");
        assert_eq!(history[1].content, "The budget was approved.");

        let summary = ws.current_summary().unwrap();
        assert_eq!(summary.message_count, 2);
        assert!(summary.last_activity >= summary.created_at);

        let persisted: Vec<ChatMessage> =
            serde_json::from_str(&backend.get(&chat_key("abc123")).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, history);
    }

    #[tokio::test]
    async fn test_failed_message_is_rolled_back() {
        let (mut ws, api, backend) = workspace();
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        ws.send_message("First question").await.unwrap();
        let before = ws.chat_history().to_vec();

        *api.chat.lock().unwrap() = Reply::Fail(503, "Chat request failed".to_string());
        let err = ws.send_message("What was decided?").await.unwrap_err();
        assert!(err.to_string().contains("Chat request failed"));

        let during = api.history_during_chat.lock().unwrap().clone();
        assert_eq!(during.len(), before.len() + 1);
        assert_eq!(during.last().unwrap().content, "What was decided?");

        assert_eq!(ws.chat_history(), before.as_slice());
        let persisted: Vec<ChatMessage> =
            serde_json::from_str(&backend.get(&chat_key("abc123")).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, before);
        assert_eq!(ws.current_summary().unwrap().message_count, 2);
    }

    #[tokio::test]
    async fn test_send_skipped_without_session_or_text() {
        let (mut ws, api, _) = workspace();
        assert!(ws.send_message("hello").await.unwrap().is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);

        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        let calls = api.calls.load(Ordering::SeqCst);
        assert!(ws.send_message("   ").await.unwrap().is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), calls);
        assert!(ws.chat_history().is_empty());
    }

    #[tokio::test]
    async fn test_aborted_message_keeps_optimistic_append() {
        let (mut ws, api, _) = workspace();
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        *api.chat.lock().unwrap() = Reply::Abort;

        assert!(ws.send_message("Anyone there?").await.unwrap().is_none());
        assert_eq!(ws.chat_history().len(), 1);
        assert_eq!(ws.current_summary().unwrap().message_count, 1);
        assert_eq!(ws.stats().messages, 1);
    }

    #[tokio::test]
    async fn test_aborted_message_count_matches_persisted_history() {
        let (mut ws, api, backend) = workspace();
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        ws.send_message("First question").await.unwrap();
        *api.chat.lock().unwrap() = Reply::Abort;
        ws.send_message("Anyone there?").await.unwrap();
        drop(ws);

        let store = SessionStore::new(Box::new(backend));
        let persisted = store.get_chat_history("abc123");
        assert_eq!(persisted.len(), 3);
        assert_eq!(persisted.last().unwrap().content, "Anyone there?");
        assert_eq!(store.list_sessions()[0].message_count, persisted.len());
    }

    #[tokio::test]
    async fn test_deleting_other_session_keeps_active_one() {
        let (mut ws, api, _) = workspace();
        *api.upload.lock().unwrap() = Reply::Ok("A".to_string());
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        ws.send_message("about A").await.unwrap();

        *api.upload.lock().unwrap() = Reply::Ok("B".to_string());
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        ws.send_message("about B").await.unwrap();
        let b_history = ws.chat_history().to_vec();

        assert!(ws.delete_session("A"));
        assert_eq!(ws.current_session(), Some("B"));
        assert_eq!(ws.chat_history(), b_history.as_slice());
        assert_eq!(ws.sessions().len(), 1);
        assert_eq!(ws.profile().session_count, 1);
    }

    #[tokio::test]
    async fn test_deleting_active_session_clears_view() {
        let (mut ws, _, _) = workspace();
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        ws.send_message("q").await.unwrap();

        assert!(ws.delete_session("abc123"));
        assert!(ws.current_session().is_none());
        assert!(ws.chat_history().is_empty());
        assert!(!ws.delete_session("abc123"));
    }

    #[tokio::test]
    async fn test_select_session_loads_history() {
        let (mut ws, api, _) = workspace();
        *api.upload.lock().unwrap() = Reply::Ok("A".to_string());
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        ws.send_message("about A").await.unwrap();

        *api.upload.lock().unwrap() = Reply::Ok("B".to_string());
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        assert!(ws.chat_history().is_empty());

        assert!(ws.select_session("A"));
        assert_eq!(ws.chat_history()[0].content, "about A");
        assert!(!ws.select_session("missing"));
        assert_eq!(ws.current_session(), Some("A"));
    }

    #[tokio::test]
    async fn test_health_updates_online_flag() {
        let (mut ws, api, _) = workspace();
        *api.health.lock().unwrap() = Reply::Fail(503, "down".to_string());
        assert!(!ws.check_health().await);

        *api.health.lock().unwrap() = Reply::Abort;
        assert!(!ws.check_health().await);

        *api.health.lock().unwrap() = Reply::Ok(String::new());
        assert!(ws.check_health().await);
        assert!(ws.is_online());
    }

    #[tokio::test]
    async fn test_clear_all_resets_view_and_identity() {
        let (mut ws, _, _) = workspace();
        let old_id = ws.profile().user_id.clone();
        ws.upload_transcript(TRANSCRIPT).await.unwrap();

        let fresh = ws.clear_all().clone();
        assert_ne!(fresh.user_id, old_id);
        assert!(ws.sessions().is_empty());
        assert!(ws.current_session().is_none());
        assert!(ws.chat_history().is_empty());
    }

    #[tokio::test]
    async fn test_rename_persists() {
        let (mut ws, _, backend) = workspace();
        ws.rename("Ada");
        let reopened = SessionStore::new(Box::new(backend));
        assert_eq!(reopened.get_or_create_profile().username, "Ada");
    }

    #[tokio::test]
    async fn test_search_resolve_and_stats() {
        let (mut ws, api, _) = workspace();
        *api.upload.lock().unwrap() = Reply::Ok("alpha-1".to_string());
        ws.upload_transcript("Budget review with finance team").await.unwrap();
        *api.upload.lock().unwrap() = Reply::Ok("beta-2".to_string());
        ws.upload_transcript("Hiring plan for the platform group").await.unwrap();
        ws.send_message("Who is hiring?").await.unwrap();

        assert_eq!(ws.search_sessions("BUDGET").len(), 1);
        assert_eq!(ws.search_sessions("beta").len(), 1);
        assert_eq!(ws.search_sessions("").len(), 2);

        assert_eq!(ws.resolve_session("2").as_deref(), Some("beta-2"));
        assert_eq!(ws.resolve_session("alp").as_deref(), Some("alpha-1"));
        assert_eq!(ws.resolve_session("3"), None);

        let stats = ws.stats();
        assert_eq!(stats.sessions, 2);
        assert_eq!(stats.messages, 2);
        assert_eq!(stats.characters, 31 + 34);
    }

    #[tokio::test]
    async fn test_drop_cancels_pending_request() {
        let (ws, api, _) = workspace();
        drop(ws);
        assert_eq!(api.cancels.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reopen_restores_sessions() {
        let (mut ws, api, backend) = workspace();
        ws.upload_transcript(TRANSCRIPT).await.unwrap();
        let user_id = ws.profile().user_id.clone();
        drop(ws);

        let reopened = Workspace::open(
            SessionStore::new(Box::new(backend)),
            api,
            ChatConfig::default(),
        );
        assert_eq!(reopened.profile().user_id, user_id);
        assert_eq!(reopened.sessions().len(), 1);
        assert!(reopened.current_session().is_none());
    }
}
