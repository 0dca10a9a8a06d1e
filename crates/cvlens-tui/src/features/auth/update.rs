//! Auth feature reducer.
//!
//! Form editing, credential submission, the timed success transition,
//! and session restoration/teardown.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cvlens_core::error::WorkflowError;
use cvlens_core::service::CredentialMode;
use cvlens_core::session::Validation;

use super::ViewState;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::CheckPurpose;
use crate::state::AppState;

pub const EMPTY_FIELDS_MESSAGE: &str = "Email and password are required";

/// Handles a key press on the login or register form.
pub fn handle_form_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        _ if app.auth.submitting || app.auth.restoring => vec![],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.auth.form.cycle_focus();
            vec![]
        }
        KeyCode::Enter => submit(app),
        KeyCode::Char('r') if ctrl => {
            toggle_mode(app);
            vec![]
        }
        _ => {
            app.auth.form.focused_mut().handle_key(key);
            vec![]
        }
    }
}

/// Pasted text goes into the focused field.
pub fn handle_form_paste(app: &mut AppState, text: &str) {
    if app.auth.submitting || app.auth.restoring {
        return;
    }
    app.auth.form.focused_mut().insert_str(text.trim());
}

/// Switches between the login and register forms. No side effects.
pub fn toggle_mode(app: &mut AppState) {
    app.auth.view = match app.auth.view {
        ViewState::LoggingIn => ViewState::Registering,
        ViewState::Registering => ViewState::LoggingIn,
        _ => return,
    };
    app.auth.error = None;
}

/// Submits the form for the current mode.
///
/// Empty fields fail locally without a remote call.
pub fn submit(app: &mut AppState) -> Vec<UiEffect> {
    let Some(mode) = app.auth.view.form_mode() else {
        return vec![];
    };
    if app.auth.submitting {
        return vec![];
    }

    let email = app.auth.form.email.value().trim().to_string();
    let password = app.auth.form.password.value().to_string();
    if email.is_empty() || password.is_empty() {
        app.auth.error = Some(WorkflowError::local(EMPTY_FIELDS_MESSAGE));
        return vec![];
    }

    app.auth.error = None;
    app.auth.submitting = true;
    let task = app.task_seq.next_id();
    app.tasks.state_mut(TaskKind::Credentials).begin(task);
    vec![UiEffect::SubmitCredentials {
        task,
        mode,
        email,
        password,
    }]
}

/// Applies the outcome of a login or registration call.
///
/// On success the token is persisted and the success screen starts its
/// timer. On failure the form stays put with the service's message.
pub fn handle_credentials_result(
    app: &mut AppState,
    mode: CredentialMode,
    result: Result<String, WorkflowError>,
) -> Vec<UiEffect> {
    app.auth.submitting = false;

    match result {
        Ok(token) => {
            tracing::info!(mode = mode.label(), "credentials accepted");
            app.auth.session.begin(token.clone());
            app.auth.form.reset();
            app.auth.error = None;
            app.auth.view = ViewState::SuccessTransition {
                message: mode.success_message().to_string(),
            };

            let task = app.task_seq.next_id();
            app.tasks.state_mut(TaskKind::SuccessDelay).begin(task);
            vec![
                UiEffect::PersistToken { token },
                UiEffect::StartSuccessDelay {
                    task,
                    delay: app.success_delay,
                },
            ]
        }
        Err(err) => {
            tracing::warn!(mode = mode.label(), error = %err, "credentials rejected");
            app.auth.error = Some(err);
            vec![]
        }
    }
}

/// The success screen timer elapsed: re-validate before entering the dashboard.
pub fn handle_delay_finished(app: &mut AppState, cancelled: bool) -> Vec<UiEffect> {
    if cancelled || !matches!(app.auth.view, ViewState::SuccessTransition { .. }) {
        return vec![];
    }

    match app.auth.session.token().map(str::to_string) {
        Some(token) => vec![app.check_session(CheckPurpose::PostLogin, token)],
        None => end_session(app, Some(WorkflowError::session_expired())),
    }
}

/// Resolves the startup validation of a stored token.
pub fn handle_restore_checked(app: &mut AppState, validation: Validation) -> Vec<UiEffect> {
    app.auth.restoring = false;

    match validation {
        Validation::Valid(user) => {
            tracing::info!(user_id = user.id, "session restored");
            if app.auth.session.establish(user) {
                app.auth.view = ViewState::Dashboard;
            }
            vec![]
        }
        Validation::Invalid => {
            tracing::info!("stored session is no longer valid");
            app.auth.session.clear();
            vec![UiEffect::ClearCredentials]
        }
    }
}

/// Resolves the re-validation that follows a successful submission.
///
/// A token that fails here never reaches the dashboard.
pub fn handle_post_login_checked(app: &mut AppState, validation: Validation) -> Vec<UiEffect> {
    match validation {
        Validation::Valid(user) => {
            tracing::info!(user_id = user.id, "session established");
            if app.auth.session.establish(user) {
                app.auth.view = ViewState::Dashboard;
                return vec![];
            }
            end_session(app, Some(WorkflowError::session_expired()))
        }
        Validation::Invalid => {
            tracing::info!("new session failed validation");
            end_session(app, Some(WorkflowError::session_expired()))
        }
    }
}

/// Tears the session down and returns to the login form.
///
/// Used by logout (`error` is `None`) and by every session invalidation.
/// Outstanding tasks are abandoned so their late results are ignored.
pub fn end_session(app: &mut AppState, error: Option<WorkflowError>) -> Vec<UiEffect> {
    let mut effects = app.abandon_tasks();
    effects.push(UiEffect::ClearCredentials);

    app.auth.session.clear();
    app.auth.view = ViewState::LoggingIn;
    app.auth.form.reset();
    app.auth.submitting = false;
    app.auth.restoring = false;
    app.auth.error = error;
    effects
}
