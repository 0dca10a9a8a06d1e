//! Display-ready workflow errors.
//!
//! Every failure that reaches the user (form submission, upload admission,
//! analysis) is converted to a `WorkflowError` at the workflow boundary.

use std::fmt;

use crate::service::{ApiError, ApiErrorKind};

/// Message shown when the service cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "Analysis service unreachable. Check that the backend is running.";

/// Message shown when the token is rejected and the session is torn down.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Where a workflow error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowErrorKind {
    /// Caught before any remote call (missing file, missing session, bad upload).
    LocalPrecondition,
    /// The service rejected the token.
    SessionInvalid,
    /// A non-auth failure response with a message payload.
    RemoteRejected,
    /// No response reachable.
    TransportFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowError {
    pub kind: WorkflowErrorKind,
    pub message: String,
}

impl WorkflowError {
    pub fn new(kind: WorkflowErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn local(message: impl Into<String>) -> Self {
        Self::new(WorkflowErrorKind::LocalPrecondition, message)
    }

    pub fn session_expired() -> Self {
        Self::new(WorkflowErrorKind::SessionInvalid, SESSION_EXPIRED_MESSAGE)
    }

    pub fn unreachable() -> Self {
        Self::new(WorkflowErrorKind::TransportFailure, UNREACHABLE_MESSAGE)
    }

    /// Converts a service error. Rejection messages are kept verbatim.
    pub fn from_api(err: &ApiError) -> Self {
        match err.kind {
            ApiErrorKind::Unauthorized => Self::session_expired(),
            ApiErrorKind::Rejected | ApiErrorKind::Parse => {
                Self::new(WorkflowErrorKind::RemoteRejected, err.message.clone())
            }
            ApiErrorKind::Transport => Self::unreachable(),
        }
    }

    /// Converts a failed credential submission.
    ///
    /// Unlike analysis, a 401 here is an ordinary rejection of the submitted
    /// credentials, so its message is surfaced verbatim as well.
    pub fn from_credentials(err: &ApiError) -> Self {
        match err.kind {
            ApiErrorKind::Transport => Self::unreachable(),
            _ => Self::new(WorkflowErrorKind::RemoteRejected, err.message.clone()),
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            WorkflowErrorKind::LocalPrecondition => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for WorkflowError {}
