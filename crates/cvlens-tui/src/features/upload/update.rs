//! Upload feature reducer.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use cvlens_core::error::WorkflowError;
use cvlens_core::session::SessionChange;
use cvlens_core::upload::{AdmissionSource, CandidateFile, normalize_dropped_path};

use crate::common::{TaskKind, TextField};
use crate::effects::UiEffect;
use crate::state::AppState;

pub fn open_prompt(app: &mut AppState) {
    if app.analysis.is_in_flight() {
        return;
    }
    app.upload.prompt = Some(TextField::default());
}

/// Handles a key while the file prompt is open.
pub fn handle_prompt_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(prompt) = app.upload.prompt.as_mut() else {
        return vec![];
    };

    match key.code {
        KeyCode::Esc => {
            app.upload.prompt = None;
            vec![]
        }
        KeyCode::Enter => {
            let path = prompt.value().trim().to_string();
            if path.is_empty() {
                return vec![];
            }
            app.upload.prompt = None;
            request_load(app, AdmissionSource::Picker, PathBuf::from(path))
        }
        _ => {
            prompt.handle_key(key);
            vec![]
        }
    }
}

/// A paste on the dashboard is a drop, unless the prompt is open.
pub fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    if let Some(prompt) = app.upload.prompt.as_mut() {
        prompt.insert_str(text.trim());
        return vec![];
    }

    match normalize_dropped_path(text) {
        Some(path) => request_load(app, AdmissionSource::Drop, path),
        None => vec![],
    }
}

/// Asks the runtime to inspect `path`. A newer request supersedes an older one.
pub fn request_load(app: &mut AppState, source: AdmissionSource, path: PathBuf) -> Vec<UiEffect> {
    if app.analysis.is_in_flight() {
        tracing::debug!(path = %path.display(), "ignoring file while analysis is in flight");
        return vec![];
    }

    let task = app.task_seq.next_id();
    app.tasks.state_mut(TaskKind::FileLoad).begin(task);
    vec![UiEffect::LoadCandidate { task, source, path }]
}

/// Runs the admission gate on an inspected candidate.
///
/// Acceptance replaces the held file and clears any previous result or
/// error. Rejection leaves the slot untouched and raises an error.
pub fn handle_candidate_loaded(
    app: &mut AppState,
    source: AdmissionSource,
    result: Result<CandidateFile, String>,
) -> Vec<UiEffect> {
    if app.analysis.is_in_flight() {
        return vec![];
    }

    let candidate = match result {
        Ok(candidate) => candidate,
        Err(message) => {
            tracing::warn!(error = %message, "failed to inspect candidate file");
            app.analysis.fail(WorkflowError::local(message));
            return vec![];
        }
    };

    match app.upload.slot.offer(candidate, source) {
        Ok(file) => {
            tracing::info!(name = %file.name, bytes = file.byte_size, "file admitted");
            app.analysis.reset();
        }
        Err(rejection) => {
            tracing::info!(reason = ?rejection.reason, "file rejected");
            app.analysis.fail(rejection.to_workflow_error());
        }
    }
    vec![]
}

/// Empties the slot and resets the result/error. Repeating it changes nothing.
pub fn clear(app: &mut AppState) {
    if app.analysis.is_in_flight() {
        return;
    }
    app.upload.slot.clear();
    app.upload.prompt = None;
    app.analysis.reset();
}

/// Reacts to session notifications from the auth flow.
///
/// A cleared session drops the held file. A newly established session
/// starts from an empty workspace.
pub fn handle_session_changed(app: &mut AppState, change: &SessionChange) {
    match change {
        SessionChange::Cleared => {
            app.upload.slot.clear();
            app.upload.prompt = None;
            if app.analysis.is_in_flight() {
                app.analysis.reset();
            }
        }
        SessionChange::Established(_) => {
            app.upload.slot.clear();
            app.upload.prompt = None;
            app.analysis.reset();
        }
        SessionChange::Initial | SessionChange::Pending => {}
    }
}
