//! Analysis feature reducer.
//!
//! `Idle → Validating → Submitting → {Succeeded | Failed}`. Submission is
//! only issued from the pre-flight result, so it can never precede a
//! successful validation for the same attempt.

use cvlens_core::analysis::{AnalysisOutcome, NO_FILE_MESSAGE, check_preconditions};
use cvlens_core::error::WorkflowError;
use cvlens_core::session::Validation;

use super::AnalysisPhase;
use crate::auth;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::CheckPurpose;
use crate::state::AppState;

/// Starts an attempt on explicit user action.
///
/// Ignored while an attempt is in flight. Missing file or session fails
/// locally without any remote call.
pub fn start(app: &mut AppState) -> Vec<UiEffect> {
    if app.analysis.is_in_flight() {
        return vec![];
    }

    let token = match check_preconditions(app.upload.slot.pending(), app.auth.session.token()) {
        Ok((_, token)) => token.to_string(),
        Err(err) => {
            app.analysis.fail(err);
            return vec![];
        }
    };

    tracing::info!("starting analysis attempt");
    app.analysis.phase = AnalysisPhase::Validating;
    vec![app.check_session(CheckPurpose::Preflight, token)]
}

/// Resolves the pre-flight validation.
pub fn handle_preflight_checked(app: &mut AppState, validation: &Validation) -> Vec<UiEffect> {
    if app.analysis.phase != AnalysisPhase::Validating {
        return vec![];
    }

    if *validation == Validation::Invalid {
        return session_invalid(app, WorkflowError::session_expired());
    }

    let (Some(file), Some(token)) = (app.upload.slot.pending(), app.auth.session.token()) else {
        app.analysis.fail(WorkflowError::local(NO_FILE_MESSAGE));
        return vec![];
    };
    let file = file.clone();
    let token = token.to_string();

    app.analysis.phase = AnalysisPhase::Submitting;
    let task = app.task_seq.next_id();
    app.tasks.state_mut(TaskKind::Analysis).begin(task);
    vec![UiEffect::SubmitAnalysis { task, token, file }]
}

/// Reduces the submission outcome into a result or an error.
pub fn handle_completed(app: &mut AppState, outcome: AnalysisOutcome) -> Vec<UiEffect> {
    match outcome {
        AnalysisOutcome::Succeeded(result) => {
            tracing::info!(score = result.score, "analysis succeeded");
            app.analysis.phase = AnalysisPhase::Succeeded(result);
            vec![]
        }
        AnalysisOutcome::Failed(err) => {
            tracing::warn!(error = %err, "analysis failed");
            app.analysis.fail(err);
            vec![]
        }
        AnalysisOutcome::SessionInvalid(err) => session_invalid(app, err),
    }
}

/// Hard termination: the attempt fails and the session is torn down.
fn session_invalid(app: &mut AppState, err: WorkflowError) -> Vec<UiEffect> {
    tracing::warn!("session rejected during analysis");
    app.analysis.fail(err.clone());
    auth::end_session(app, Some(err))
}
