//! Remote API boundary
//!
//! The backend stores transcripts and runs inference; this client only
//! relays requests to it. [`TranscriptApi`] is the seam the workspace talks
//! to, [`ApiGateway`] the HTTP implementation.

use crate::error::Result;
use async_trait::async_trait;

pub mod gateway;
pub mod types;

pub use gateway::ApiGateway;
pub use types::{ChatResponse, HealthResponse, UploadResponse};

/// Result of a call that may be superseded by a newer one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    /// The request finished and was still the current one
    Completed(T),
    /// A newer request (or teardown) cancelled this one
    Aborted,
}

impl<T> CallOutcome<T> {
    /// The completed value, `None` when aborted
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Aborted => None,
        }
    }

    /// Whether the call was superseded
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Transform the completed value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> CallOutcome<U> {
        match self {
            Self::Completed(value) => CallOutcome::Completed(f(value)),
            Self::Aborted => CallOutcome::Aborted,
        }
    }
}

/// Operations the client needs from the transcript backend
///
/// Implementations keep at most one request in flight: starting a call
/// cancels the previous one, which then resolves to
/// [`CallOutcome::Aborted`].
#[async_trait]
pub trait TranscriptApi: Send + Sync {
    /// Probe `GET /health`
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status
    async fn health(&self) -> Result<CallOutcome<HealthResponse>>;

    /// Upload a transcript under a locally generated session id
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-success status
    async fn upload(&self, transcript: &str, session_id: &str)
        -> Result<CallOutcome<UploadResponse>>;

    /// Ask a question about an uploaded transcript
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or a body
    /// without a `response` field
    async fn chat(&self, session_id: &str, message: &str) -> Result<CallOutcome<ChatResponse>>;

    /// Cancel the in-flight request, if any
    fn cancel_pending(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_outcome_helpers() {
        let done: CallOutcome<u8> = CallOutcome::Completed(2);
        assert!(!done.is_aborted());
        assert_eq!(done.clone().map(|v| v * 2), CallOutcome::Completed(4));
        assert_eq!(done.completed(), Some(2));

        let aborted: CallOutcome<u8> = CallOutcome::Aborted;
        assert!(aborted.is_aborted());
        assert_eq!(aborted.map(|v| v + 1), CallOutcome::Aborted);
    }
}
