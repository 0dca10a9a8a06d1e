//! UI event types.
//!
//! Everything that can change state arrives as a `UiEvent`: terminal input,
//! ticks, session notifications, and async task results.

use crossterm::event::Event;
use cvlens_core::analysis::AnalysisOutcome;
use cvlens_core::error::WorkflowError;
use cvlens_core::service::CredentialMode;
use cvlens_core::session::{SessionChange, Validation};
use cvlens_core::upload::{AdmissionSource, CandidateFile};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Why a session check was issued. Each purpose resolves differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPurpose {
    /// Startup restoration of a stored token.
    Restore,
    /// Re-validation after the success transition delay.
    PostLogin,
    /// Pre-flight check before an analysis submission.
    Preflight,
}

#[derive(Debug)]
pub enum UiEvent {
    Tick,
    Terminal(Event),

    /// The session context published a change.
    SessionChanged(SessionChange),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Login or registration finished. `Ok` holds the granted token.
    CredentialsSubmitted {
        mode: CredentialMode,
        result: Result<String, WorkflowError>,
    },
    SuccessDelayFinished {
        cancelled: bool,
    },
    SessionChecked {
        purpose: CheckPurpose,
        validation: Validation,
    },
    /// A candidate file was inspected on disk.
    CandidateLoaded {
        source: AdmissionSource,
        result: Result<CandidateFile, String>,
    },
    AnalysisCompleted {
        outcome: AnalysisOutcome,
    },
}
