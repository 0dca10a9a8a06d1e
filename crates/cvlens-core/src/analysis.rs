//! Analysis outcome reduction.
//!
//! One attempt runs `Validating -> Submitting -> {Succeeded | Failed}`.
//! Pre-flight validation strictly precedes submission. A rejected token at
//! either step tears the session down; nothing is retried.

use crate::credentials::CredentialStore;
use crate::error::WorkflowError;
use crate::service::{AnalysisResult, ApiResult, ServiceClient};
use crate::session::{self, Validation};
use crate::upload::PendingFile;

pub const NO_FILE_MESSAGE: &str = "Please select a file first";
pub const NO_SESSION_MESSAGE: &str = "No session found. Please log in first.";

/// Reduced result of one analysis attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Succeeded(AnalysisResult),
    /// The token was rejected; the caller must tear down the session.
    SessionInvalid(WorkflowError),
    Failed(WorkflowError),
}

/// Reduces the service response to an outcome.
pub fn classify(response: ApiResult<AnalysisResult>) -> AnalysisOutcome {
    match response {
        Ok(result) => AnalysisOutcome::Succeeded(result),
        Err(e) if e.is_unauthorized() => AnalysisOutcome::SessionInvalid(WorkflowError::from_api(&e)),
        Err(e) => AnalysisOutcome::Failed(WorkflowError::from_api(&e)),
    }
}

/// Checks the local preconditions for starting an attempt.
///
/// # Errors
/// A `LocalPrecondition` error naming what is missing (file is checked first).
pub fn check_preconditions<'a>(
    file: Option<&'a PendingFile>,
    token: Option<&'a str>,
) -> Result<(&'a PendingFile, &'a str), WorkflowError> {
    let file = file.ok_or_else(|| WorkflowError::local(NO_FILE_MESSAGE))?;
    let token = token.ok_or_else(|| WorkflowError::local(NO_SESSION_MESSAGE))?;
    Ok((file, token))
}

/// Runs a complete attempt sequentially (used by non-interactive surfaces).
///
/// On session rejection the credential store is cleared before returning.
pub async fn run_attempt(
    client: &ServiceClient,
    store: &dyn CredentialStore,
    file: Option<&PendingFile>,
) -> AnalysisOutcome {
    let token = match store.load() {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load stored session");
            None
        }
    };
    let (file, token) = match check_preconditions(file, token.as_deref()) {
        Ok(pair) => pair,
        Err(e) => return AnalysisOutcome::Failed(e),
    };

    tracing::debug!("analysis: validating");
    if session::validate(client, token).await == Validation::Invalid {
        return invalidate(store);
    }

    let payload = match file.read_payload().await {
        Ok(payload) => payload,
        Err(e) => return AnalysisOutcome::Failed(WorkflowError::local(format!("{e:#}"))),
    };

    tracing::debug!(file = %file.name, "analysis: submitting");
    match classify(client.analyze(token, payload).await) {
        AnalysisOutcome::SessionInvalid(_) => invalidate(store),
        outcome => outcome,
    }
}

fn invalidate(store: &dyn CredentialStore) -> AnalysisOutcome {
    if let Err(e) = store.clear() {
        tracing::warn!(error = %e, "failed to clear stored session");
    }
    AnalysisOutcome::SessionInvalid(WorkflowError::session_expired())
}

/// Coarse banding of the score for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Strong,
    Fair,
    Weak,
}

impl ScoreTier {
    pub fn of(score: u8) -> Self {
        match score {
            80.. => ScoreTier::Strong,
            60..=79 => ScoreTier::Fair,
            _ => ScoreTier::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Strong => "strong",
            ScoreTier::Fair => "fair",
            ScoreTier::Weak => "weak",
        }
    }
}
