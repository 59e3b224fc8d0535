//! HTTP gateway to the transcript chat backend
//!
//! All calls share one single-flight slot. Each call takes a new generation
//! number and cancellation token; starting a call cancels the token of the
//! previous one. A call whose generation is no longer current when it
//! finishes reports [`CallOutcome::Aborted`] even if the response arrived.

use crate::api::types::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, RemoteHistory, RemoteSession,
    RemoteSessionList, StatusMessage, UploadRequest, UploadResponse,
};
use crate::api::{CallOutcome, TranscriptApi};
use crate::config::ApiConfig;
use crate::error::{Result, TranscriptChatError};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

struct InFlight {
    generation: u64,
    token: CancellationToken,
}

/// Single-flight HTTP client for the backend
///
/// # Examples
///
/// ```no_run
/// use transcript_chat::api::{ApiGateway, CallOutcome, TranscriptApi};
/// use transcript_chat::config::ApiConfig;
///
/// # async fn example() -> transcript_chat::error::Result<()> {
/// let gateway = ApiGateway::new(&ApiConfig::default())?;
/// if let CallOutcome::Completed(reply) = gateway.chat("session-1", "What was decided?").await? {
///     println!("{}", reply.response);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ApiGateway {
    client: Client,
    base_url: Url,
    inflight: Mutex<InFlight>,
}

impl ApiGateway {
    /// Create a gateway for the configured backend
    ///
    /// # Errors
    ///
    /// Returns error if the base URL does not parse or the HTTP client
    /// cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(TranscriptChatError::Url)?;
        if base_url.cannot_be_a_base() {
            return Err(TranscriptChatError::Config(format!(
                "API base URL cannot have paths appended: {}",
                config.base_url
            ))
            .into());
        }

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(TranscriptChatError::Http)?;

        Ok(Self {
            client,
            base_url,
            inflight: Mutex::new(InFlight {
                generation: 0,
                token: CancellationToken::new(),
            }),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TranscriptChatError::Config("API base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn lock_inflight(&self) -> std::sync::MutexGuard<'_, InFlight> {
        self.inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim the single-flight slot, cancelling whoever held it
    fn begin(&self) -> (u64, CancellationToken) {
        let mut inflight = self.lock_inflight();
        inflight.token.cancel();
        inflight.generation += 1;
        inflight.token = CancellationToken::new();
        (inflight.generation, inflight.token.clone())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock_inflight().generation == generation
    }

    async fn dispatch(&self, request: RequestBuilder, fallback: &str) -> Result<CallOutcome<String>> {
        let (generation, token) = self.begin();

        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = execute(request, fallback) => Some(result),
        };

        match result {
            None => {
                tracing::debug!("Request {} superseded before completion", generation);
                Ok(CallOutcome::Aborted)
            }
            Some(_) if !self.is_current(generation) => {
                tracing::debug!("Discarding stale response of request {}", generation);
                Ok(CallOutcome::Aborted)
            }
            Some(result) => result.map(CallOutcome::Completed),
        }
    }

    async fn dispatch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<CallOutcome<T>> {
        match self.dispatch(request, fallback).await? {
            CallOutcome::Completed(body) => {
                let value = serde_json::from_str(&body).map_err(|e| {
                    tracing::error!("Failed to parse API response: {}", e);
                    TranscriptChatError::Serialization(e)
                })?;
                Ok(CallOutcome::Completed(value))
            }
            CallOutcome::Aborted => Ok(CallOutcome::Aborted),
        }
    }

    /// List sessions the backend knows about (`GET /sessions`)
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status
    pub async fn remote_sessions(&self) -> Result<CallOutcome<RemoteSessionList>> {
        let url = self.endpoint(&["sessions"])?;
        self.dispatch_json(self.client.get(url), "Failed to list sessions")
            .await
    }

    /// Backend metadata for one session (`GET /session/{id}`)
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status
    pub async fn remote_session(&self, session_id: &str) -> Result<CallOutcome<RemoteSession>> {
        let url = self.endpoint(&["session", session_id])?;
        self.dispatch_json(self.client.get(url), "Failed to load session")
            .await
    }

    /// Backend-side chat history (`GET /session/{id}/history`)
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status
    pub async fn remote_history(&self, session_id: &str) -> Result<CallOutcome<RemoteHistory>> {
        let url = self.endpoint(&["session", session_id, "history"])?;
        self.dispatch_json(self.client.get(url), "Failed to load history")
            .await
    }

    /// Drop a session on the backend (`DELETE /session/{id}`)
    ///
    /// Local data is untouched.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status
    pub async fn delete_remote_session(&self, session_id: &str) -> Result<CallOutcome<StatusMessage>> {
        let url = self.endpoint(&["session", session_id])?;
        self.dispatch_json(self.client.delete(url), "Failed to delete session")
            .await
    }

    /// Drop every backend session (`POST /clear-all`)
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status
    pub async fn clear_remote(&self) -> Result<CallOutcome<StatusMessage>> {
        let url = self.endpoint(&["clear-all"])?;
        self.dispatch_json(self.client.post(url), "Failed to clear sessions")
            .await
    }
}

/// Send a request and return the body of a successful response
async fn execute(request: RequestBuilder, fallback: &str) -> Result<String> {
    let response = request
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .map_err(|e| {
            tracing::error!("API request failed: {}", e);
            TranscriptChatError::Http(e)
        })?;

    let status = response.status();
    let body = response.text().await.map_err(TranscriptChatError::Http)?;

    if !status.is_success() {
        tracing::error!("API returned error {}: {}", status, body);
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(TranscriptChatError::Api {
            status: status.as_u16(),
            message,
        }
        .into());
    }

    Ok(body)
}

#[async_trait]
impl TranscriptApi for ApiGateway {
    async fn health(&self) -> Result<CallOutcome<HealthResponse>> {
        let url = self.endpoint(&["health"])?;
        let outcome = self.dispatch(self.client.get(url), "Health check failed").await?;
        // only the status matters; tolerate bodies that are not JSON
        Ok(outcome.map(|body| serde_json::from_str(&body).unwrap_or_default()))
    }

    async fn upload(
        &self,
        transcript: &str,
        session_id: &str,
    ) -> Result<CallOutcome<UploadResponse>> {
        let url = self.endpoint(&["upload"])?;
        tracing::debug!(
            "Uploading transcript ({} chars) as {}",
            transcript.chars().count(),
            session_id
        );
        let request = self.client.post(url).json(&UploadRequest {
            transcript,
            session_id,
        });
        self.dispatch_json(request, "Upload failed").await
    }

    async fn chat(&self, session_id: &str, message: &str) -> Result<CallOutcome<ChatResponse>> {
        let url = self.endpoint(&["chat"])?;
        tracing::debug!("Sending chat message to session {}", session_id);
        let request = self.client.post(url).json(&ChatRequest {
            session_id,
            message,
        });
        self.dispatch_json(request, "Chat request failed").await
    }

    fn cancel_pending(&self) {
        let mut inflight = self.lock_inflight();
        inflight.token.cancel();
        inflight.generation += 1;
    }
}

impl Drop for ApiGateway {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> ApiGateway {
        let config = ApiConfig {
            base_url: base.to_string(),
            ..ApiConfig::default()
        };
        ApiGateway::new(&config).expect("gateway")
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let gw = gateway("http://localhost:8000");
        assert_eq!(
            gw.endpoint(&["upload"]).unwrap().as_str(),
            "http://localhost:8000/upload"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_ids() {
        let gw = gateway("http://localhost:8000/api/");
        assert_eq!(
            gw.endpoint(&["session", "a b/c", "history"]).unwrap().as_str(),
            "http://localhost:8000/api/session/a%20b%2Fc/history"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(ApiGateway::new(&config).is_err());

        let config = ApiConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..ApiConfig::default()
        };
        assert!(ApiGateway::new(&config).is_err());
    }

    #[test]
    fn test_begin_cancels_previous_token() {
        let gw = gateway("http://localhost:8000");
        let (first, first_token) = gw.begin();
        let (second, second_token) = gw.begin();
        assert!(first_token.is_cancelled());
        assert!(!second_token.is_cancelled());
        assert!(!gw.is_current(first));
        assert!(gw.is_current(second));
    }

    #[test]
    fn test_cancel_pending_invalidates_current_call() {
        let gw = gateway("http://localhost:8000");
        let (generation, token) = gw.begin();
        gw.cancel_pending();
        assert!(token.is_cancelled());
        assert!(!gw.is_current(generation));
    }
}
