//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O itself.

use std::path::PathBuf;
use std::time::Duration;

use cvlens_core::service::CredentialMode;
use cvlens_core::upload::{AdmissionSource, PendingFile};
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};
use crate::events::CheckPurpose;

#[derive(Debug)]
pub enum UiEffect {
    Quit,

    /// `POST /login` or `POST /register`.
    SubmitCredentials {
        task: TaskId,
        mode: CredentialMode,
        email: String,
        password: String,
    },

    /// Cancellable pause on the success screen.
    StartSuccessDelay { task: TaskId, delay: Duration },

    /// `GET /me` with the given token.
    CheckSession {
        task: TaskId,
        purpose: CheckPurpose,
        token: String,
    },

    /// Inspect a file on disk before admission.
    LoadCandidate {
        task: TaskId,
        source: AdmissionSource,
        path: PathBuf,
    },

    /// `POST /api/analyze-resume` with the admitted file.
    SubmitAnalysis {
        task: TaskId,
        token: String,
        file: PendingFile,
    },

    /// Save the token to the credential store.
    PersistToken { token: String },

    /// Remove the token from the credential store.
    ClearCredentials,

    /// Cancel an in-progress task via its token, if it has one.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
