//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::auth::ViewState;
use crate::effects::UiEffect;
use crate::events::{CheckPurpose, UiEvent};
use crate::state::AppState;
use crate::{analysis, auth, upload};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::SessionChanged(change) => {
            upload::handle_session_changed(app, &change);
            vec![]
        }
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::CredentialsSubmitted { mode, result } => {
            auth::handle_credentials_result(app, mode, result)
        }
        UiEvent::SuccessDelayFinished { cancelled } => auth::handle_delay_finished(app, cancelled),
        UiEvent::SessionChecked {
            purpose,
            validation,
        } => match purpose {
            CheckPurpose::Restore => auth::handle_restore_checked(app, validation),
            CheckPurpose::PostLogin => auth::handle_post_login_checked(app, validation),
            CheckPurpose::Preflight => analysis::handle_preflight_checked(app, &validation),
        },
        UiEvent::CandidateLoaded { source, result } => {
            upload::handle_candidate_loaded(app, source, result)
        }
        UiEvent::AnalysisCompleted { outcome } => analysis::handle_completed(app, outcome),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => handle_paste(app, &text),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return quit(app);
    }

    if app.auth.restoring {
        return match key.code {
            KeyCode::Esc => quit(app),
            _ => vec![],
        };
    }

    match app.auth.view {
        ViewState::LoggingIn | ViewState::Registering => {
            let effects = auth::handle_form_key(app, key);
            if effects.iter().any(|e| matches!(e, UiEffect::Quit)) {
                return quit(app);
            }
            effects
        }
        ViewState::SuccessTransition { .. } => match key.code {
            KeyCode::Esc => quit(app),
            _ => vec![],
        },
        ViewState::Dashboard => handle_dashboard_key(app, key),
    }
}

fn handle_dashboard_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if app.upload.is_prompt_open() {
        return upload::handle_prompt_key(app, key);
    }

    match key.code {
        KeyCode::Char('o') => {
            upload::open_prompt(app);
            vec![]
        }
        KeyCode::Char('a') | KeyCode::Enter => analysis::start(app),
        KeyCode::Char('c') => {
            upload::clear(app);
            vec![]
        }
        KeyCode::Char('l') => {
            tracing::info!("logging out");
            app.analysis.reset();
            auth::end_session(app, None)
        }
        KeyCode::Char('q') | KeyCode::Esc => quit(app),
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    if app.auth.restoring {
        return vec![];
    }
    match app.auth.view {
        ViewState::LoggingIn | ViewState::Registering => {
            auth::handle_form_paste(app, text);
            vec![]
        }
        ViewState::Dashboard => upload::handle_paste(app, text),
        ViewState::SuccessTransition { .. } => vec![],
    }
}

/// Cancels outstanding timers before quitting.
fn quit(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = app.abandon_tasks();
    effects.push(UiEffect::Quit);
    effects
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use cvlens_core::analysis::{AnalysisOutcome, NO_FILE_MESSAGE};
    use cvlens_core::error::{SESSION_EXPIRED_MESSAGE, WorkflowError};
    use cvlens_core::service::{AnalysisResult, ApiError, CredentialMode, User};
    use cvlens_core::session::{SessionChange, Validation};
    use cvlens_core::upload::{ACCEPTED_MIME_TYPE, AdmissionSource, CandidateFile};
    use tokio::sync::watch;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::analysis::AnalysisPhase;
    use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};

    /// Drives the reducer the way the runtime does, forwarding session
    /// notifications after each step.
    struct Harness {
        app: AppState,
        session_rx: watch::Receiver<SessionChange>,
    }

    impl Harness {
        fn new() -> Self {
            let app = AppState::new(Duration::from_millis(5));
            let session_rx = app.auth.session.subscribe();
            Self { app, session_rx }
        }

        fn send(&mut self, event: UiEvent) -> Vec<UiEffect> {
            let mut effects = update(&mut self.app, event);
            while self.session_rx.has_changed().unwrap_or(false) {
                let change = self.session_rx.borrow_and_update().clone();
                effects.extend(update(&mut self.app, UiEvent::SessionChanged(change)));
            }
            effects
        }

        fn complete(&mut self, kind: TaskKind, id: TaskId, result: UiEvent) -> Vec<UiEffect> {
            self.send(UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(result),
                },
            })
        }

        fn key(&mut self, code: KeyCode) -> Vec<UiEffect> {
            self.send(UiEvent::Terminal(Event::Key(KeyEvent::new(
                code,
                KeyModifiers::NONE,
            ))))
        }

        fn ctrl(&mut self, c: char) -> Vec<UiEffect> {
            self.send(UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::CONTROL,
            ))))
        }

        /// Restores a valid session so the dashboard is active.
        fn signed_in(&mut self) {
            let effects = self.app.start(Some("tok".to_string()));
            let id = check_task(&effects, CheckPurpose::Restore);
            self.complete(
                TaskKind::SessionCheck,
                id,
                UiEvent::SessionChecked {
                    purpose: CheckPurpose::Restore,
                    validation: Validation::Valid(user()),
                },
            );
            assert_eq!(self.app.auth.view, ViewState::Dashboard);
        }

        fn admit(&mut self, candidate: CandidateFile, source: AdmissionSource) {
            let effects = upload::request_load(&mut self.app, source, candidate.path.clone());
            let id = match effects.as_slice() {
                [UiEffect::LoadCandidate { task, .. }] => *task,
                other => panic!("expected LoadCandidate, got {other:?}"),
            };
            self.complete(
                TaskKind::FileLoad,
                id,
                UiEvent::CandidateLoaded {
                    source,
                    result: Ok(candidate),
                },
            );
        }

        /// Starts an attempt and passes pre-flight; returns the submission task.
        fn submit_analysis(&mut self) -> TaskId {
            let effects = self.key(KeyCode::Char('a'));
            let id = check_task(&effects, CheckPurpose::Preflight);
            assert_eq!(self.app.analysis.phase, AnalysisPhase::Validating);

            let effects = self.complete(
                TaskKind::SessionCheck,
                id,
                UiEvent::SessionChecked {
                    purpose: CheckPurpose::Preflight,
                    validation: Validation::Valid(user()),
                },
            );
            match effects.as_slice() {
                [UiEffect::SubmitAnalysis { task, token, file }] => {
                    assert_eq!(token, "tok");
                    assert_eq!(file.name, "cv.pdf");
                    *task
                }
                other => panic!("expected SubmitAnalysis, got {other:?}"),
            }
        }
    }

    fn user() -> User {
        User {
            id: 1,
            email: "a@b.com".to_string(),
            active: true,
        }
    }

    fn pdf(size: u64) -> CandidateFile {
        CandidateFile {
            name: "cv.pdf".to_string(),
            byte_size: size,
            mime_type: ACCEPTED_MIME_TYPE.to_string(),
            path: PathBuf::from("/tmp/cv.pdf"),
        }
    }

    fn result(score: u8) -> AnalysisResult {
        AnalysisResult {
            score,
            strengths: vec!["X".to_string()],
            improvements: vec![],
            skills: vec!["Y".to_string()],
            experience_summary: "5y".to_string(),
            recommendation: "Strong".to_string(),
            ready: true,
        }
    }

    fn check_task(effects: &[UiEffect], expected: CheckPurpose) -> TaskId {
        effects
            .iter()
            .find_map(|e| match e {
                UiEffect::CheckSession { task, purpose, .. } if *purpose == expected => {
                    Some(*task)
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("expected CheckSession({expected:?}) in {effects:?}"))
    }

    fn has_clear_credentials(effects: &[UiEffect]) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, UiEffect::ClearCredentials))
    }

    #[test]
    fn test_restore_valid_token_enters_dashboard() {
        let mut h = Harness::new();
        let effects = h.app.start(Some("tok".to_string()));
        let id = check_task(&effects, CheckPurpose::Restore);

        // While validating, the restoring screen is shown instead of the form.
        assert!(h.app.auth.restoring);

        h.complete(
            TaskKind::SessionCheck,
            id,
            UiEvent::SessionChecked {
                purpose: CheckPurpose::Restore,
                validation: Validation::Valid(user()),
            },
        );

        assert!(!h.app.auth.restoring);
        assert_eq!(h.app.auth.view, ViewState::Dashboard);
        assert_eq!(h.app.auth.session.user(), Some(&user()));
    }

    #[test]
    fn test_restore_invalid_token_clears_store() {
        let mut h = Harness::new();
        let effects = h.app.start(Some("stale".to_string()));
        let id = check_task(&effects, CheckPurpose::Restore);

        let effects = h.complete(
            TaskKind::SessionCheck,
            id,
            UiEvent::SessionChecked {
                purpose: CheckPurpose::Restore,
                validation: Validation::Invalid,
            },
        );

        assert!(has_clear_credentials(&effects));
        assert_eq!(h.app.auth.view, ViewState::LoggingIn);
        assert_eq!(h.app.auth.session.token(), None);
        assert!(h.app.auth.error.is_none());
    }

    #[test]
    fn test_start_without_token_stays_on_login() {
        let mut h = Harness::new();
        assert!(h.app.start(None).is_empty());
        assert_eq!(h.app.auth.view, ViewState::LoggingIn);
        assert!(!h.app.auth.restoring);
    }

    #[test]
    fn test_login_rejection_surfaces_detail_verbatim() {
        let mut h = Harness::new();
        h.app.auth.form.email.set("a@b.com");
        h.app.auth.form.password.set("wrong");

        let effects = h.key(KeyCode::Enter);
        let id = match effects.as_slice() {
            [
                UiEffect::SubmitCredentials {
                    task,
                    mode: CredentialMode::Login,
                    email,
                    password,
                },
            ] => {
                assert_eq!(email, "a@b.com");
                assert_eq!(password, "wrong");
                *task
            }
            other => panic!("expected SubmitCredentials, got {other:?}"),
        };
        assert!(h.app.auth.submitting);

        let api = ApiError::from_status(400, r#"{"detail":"Invalid credentials"}"#);
        h.complete(
            TaskKind::Credentials,
            id,
            UiEvent::CredentialsSubmitted {
                mode: CredentialMode::Login,
                result: Err(WorkflowError::from_credentials(&api)),
            },
        );

        assert_eq!(h.app.auth.view, ViewState::LoggingIn);
        assert!(!h.app.auth.submitting);
        assert_eq!(
            h.app.auth.error.as_ref().map(|e| e.message.as_str()),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn test_empty_form_fails_locally() {
        let mut h = Harness::new();
        h.app.auth.form.email.set("a@b.com");

        let effects = h.key(KeyCode::Enter);
        assert!(effects.is_empty());
        assert_eq!(
            h.app.auth.error.as_ref().map(|e| e.message.as_str()),
            Some(auth::EMPTY_FIELDS_MESSAGE)
        );
    }

    #[test]
    fn test_ctrl_r_toggles_forms() {
        let mut h = Harness::new();
        h.ctrl('r');
        assert_eq!(h.app.auth.view, ViewState::Registering);
        assert_eq!(h.app.auth.view.form_mode(), Some(CredentialMode::Register));
        h.ctrl('r');
        assert_eq!(h.app.auth.view, ViewState::LoggingIn);
    }

    #[test]
    fn test_successful_login_persists_then_validates_after_delay() {
        let mut h = Harness::new();
        h.app.auth.form.email.set("a@b.com");
        h.app.auth.form.password.set("pw");
        let effects = h.key(KeyCode::Enter);
        let [UiEffect::SubmitCredentials { task, .. }] = effects.as_slice() else {
            panic!("expected SubmitCredentials, got {effects:?}");
        };

        let effects = h.complete(
            TaskKind::Credentials,
            *task,
            UiEvent::CredentialsSubmitted {
                mode: CredentialMode::Login,
                result: Ok("tok".to_string()),
            },
        );
        let delay_task = match effects.as_slice() {
            [
                UiEffect::PersistToken { token },
                UiEffect::StartSuccessDelay { task, delay },
            ] => {
                assert_eq!(token, "tok");
                assert_eq!(*delay, Duration::from_millis(5));
                *task
            }
            other => panic!("unexpected effects {other:?}"),
        };
        assert_eq!(
            h.app.auth.view,
            ViewState::SuccessTransition {
                message: "Login successful! Redirecting...".to_string()
            }
        );

        let effects = h.complete(
            TaskKind::SuccessDelay,
            delay_task,
            UiEvent::SuccessDelayFinished { cancelled: false },
        );
        let check = check_task(&effects, CheckPurpose::PostLogin);

        h.complete(
            TaskKind::SessionCheck,
            check,
            UiEvent::SessionChecked {
                purpose: CheckPurpose::PostLogin,
                validation: Validation::Valid(user()),
            },
        );
        assert_eq!(h.app.auth.view, ViewState::Dashboard);
        assert_eq!(h.app.auth.session.user(), Some(&user()));
    }

    #[test]
    fn test_post_login_validation_failure_returns_to_login() {
        let mut h = Harness::new();
        let effects = auth::handle_credentials_result(
            &mut h.app,
            CredentialMode::Register,
            Ok("tok".to_string()),
        );
        let [_, UiEffect::StartSuccessDelay { task, .. }] = effects.as_slice() else {
            panic!("expected delay, got {effects:?}");
        };
        let effects = h.complete(
            TaskKind::SuccessDelay,
            *task,
            UiEvent::SuccessDelayFinished { cancelled: false },
        );
        let check = check_task(&effects, CheckPurpose::PostLogin);

        let effects = h.complete(
            TaskKind::SessionCheck,
            check,
            UiEvent::SessionChecked {
                purpose: CheckPurpose::PostLogin,
                validation: Validation::Invalid,
            },
        );

        assert!(has_clear_credentials(&effects));
        assert_eq!(h.app.auth.view, ViewState::LoggingIn);
        assert_eq!(h.app.auth.session.token(), None);
        assert_eq!(
            h.app.auth.error.as_ref().map(|e| e.message.as_str()),
            Some(SESSION_EXPIRED_MESSAGE)
        );
    }

    #[test]
    fn test_post_login_user_without_token_never_reaches_dashboard() {
        let mut h = Harness::new();
        h.app.auth.view = ViewState::SuccessTransition {
            message: "Login successful! Redirecting...".to_string(),
        };

        let effects = auth::handle_post_login_checked(&mut h.app, Validation::Valid(user()));

        assert!(has_clear_credentials(&effects));
        assert_eq!(h.app.auth.view, ViewState::LoggingIn);
        assert_eq!(h.app.auth.session.user(), None);
        assert_eq!(
            h.app.auth.error.as_ref().map(|e| e.message.as_str()),
            Some(SESSION_EXPIRED_MESSAGE)
        );
    }

    #[test]
    fn test_quit_during_success_delay_cancels_timer() {
        let mut h = Harness::new();
        let effects = auth::handle_credentials_result(
            &mut h.app,
            CredentialMode::Login,
            Ok("tok".to_string()),
        );
        let [_, UiEffect::StartSuccessDelay { task, .. }] = effects.as_slice() else {
            panic!("expected delay, got {effects:?}");
        };
        let cancel = CancellationToken::new();
        h.send(UiEvent::TaskStarted {
            kind: TaskKind::SuccessDelay,
            started: TaskStarted {
                id: *task,
                cancel: Some(cancel.clone()),
            },
        });

        let effects = h.key(KeyCode::Esc);
        assert!(effects.iter().any(|e| matches!(
            e,
            UiEffect::CancelTask {
                kind: TaskKind::SuccessDelay,
                token: Some(_)
            }
        )));
        assert!(matches!(effects.last(), Some(UiEffect::Quit)));
        assert!(!h.app.tasks.is_any_running());
    }

    #[test]
    fn test_oversized_file_is_rejected_and_slot_stays_empty() {
        let mut h = Harness::new();
        h.signed_in();

        h.admit(pdf(11_000_000), AdmissionSource::Picker);

        assert!(h.app.upload.slot.pending().is_none());
        assert_eq!(
            h.app.analysis.error().map(|e| e.message.as_str()),
            Some("Please select a PDF file under 10MB (file is 10.5 MB)")
        );
    }

    #[test]
    fn test_rejection_keeps_previous_file() {
        let mut h = Harness::new();
        h.signed_in();
        h.admit(pdf(1024), AdmissionSource::Picker);

        let mut text = pdf(10);
        text.name = "notes.txt".to_string();
        text.mime_type = "text/plain".to_string();
        h.admit(text, AdmissionSource::Drop);

        assert_eq!(h.app.upload.slot.pending().map(|f| f.byte_size), Some(1024));
        assert_eq!(
            h.app.analysis.error().map(|e| e.message.as_str()),
            Some("Please drop a PDF file under 10MB")
        );

        // A subsequent accepted file clears the stale error.
        h.admit(pdf(2048), AdmissionSource::Drop);
        assert_eq!(h.app.analysis.phase, AnalysisPhase::Idle);
        assert_eq!(h.app.upload.slot.pending().map(|f| f.byte_size), Some(2048));
    }

    #[test]
    fn test_paste_on_dashboard_requests_drop_load() {
        let mut h = Harness::new();
        h.signed_in();

        let effects = h.send(UiEvent::Terminal(Event::Paste(
            "'/home/me/My CV.pdf'".to_string(),
        )));
        match effects.as_slice() {
            [UiEffect::LoadCandidate { source, path, .. }] => {
                assert_eq!(*source, AdmissionSource::Drop);
                assert_eq!(path, &PathBuf::from("/home/me/My CV.pdf"));
            }
            other => panic!("expected LoadCandidate, got {other:?}"),
        }
    }

    #[test]
    fn test_file_prompt_is_picker_source() {
        let mut h = Harness::new();
        h.signed_in();

        h.key(KeyCode::Char('o'));
        assert!(h.app.upload.is_prompt_open());
        for c in "/tmp/cv.pdf".chars() {
            h.key(KeyCode::Char(c));
        }
        let effects = h.key(KeyCode::Enter);

        assert!(!h.app.upload.is_prompt_open());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::LoadCandidate {
                source: AdmissionSource::Picker,
                ..
            }]
        ));
    }

    #[test]
    fn test_analysis_without_file_fails_locally() {
        let mut h = Harness::new();
        h.signed_in();

        let effects = h.key(KeyCode::Char('a'));
        assert!(effects.is_empty());
        assert_eq!(
            h.app.analysis.error().map(|e| e.message.as_str()),
            Some(NO_FILE_MESSAGE)
        );
    }

    #[test]
    fn test_analysis_success_populates_result() {
        let mut h = Harness::new();
        h.signed_in();
        h.admit(pdf(1024), AdmissionSource::Picker);

        let id = h.submit_analysis();
        assert_eq!(h.app.analysis.phase, AnalysisPhase::Submitting);

        h.complete(
            TaskKind::Analysis,
            id,
            UiEvent::AnalysisCompleted {
                outcome: AnalysisOutcome::Succeeded(result(92)),
            },
        );

        assert_eq!(h.app.analysis.result().map(|r| r.score), Some(92));
        assert!(h.app.analysis.error().is_none());
    }

    #[test]
    fn test_analysis_unauthorized_tears_session_down() {
        let mut h = Harness::new();
        h.signed_in();
        h.admit(pdf(1024), AdmissionSource::Picker);
        let id = h.submit_analysis();

        let effects = h.complete(
            TaskKind::Analysis,
            id,
            UiEvent::AnalysisCompleted {
                outcome: AnalysisOutcome::SessionInvalid(WorkflowError::session_expired()),
            },
        );

        assert!(has_clear_credentials(&effects));
        assert_eq!(h.app.auth.session.token(), None);
        assert_eq!(h.app.auth.session.user(), None);
        assert_eq!(h.app.auth.view, ViewState::LoggingIn);
        assert_eq!(
            h.app.auth.error.as_ref().map(|e| e.message.as_str()),
            Some(SESSION_EXPIRED_MESSAGE)
        );
        assert!(h.app.upload.slot.pending().is_none());
        assert!(h.app.analysis.result().is_none());
    }

    #[test]
    fn test_preflight_invalid_never_submits() {
        let mut h = Harness::new();
        h.signed_in();
        h.admit(pdf(1024), AdmissionSource::Picker);

        let effects = h.key(KeyCode::Char('a'));
        let id = check_task(&effects, CheckPurpose::Preflight);
        let effects = h.complete(
            TaskKind::SessionCheck,
            id,
            UiEvent::SessionChecked {
                purpose: CheckPurpose::Preflight,
                validation: Validation::Invalid,
            },
        );

        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, UiEffect::SubmitAnalysis { .. }))
        );
        assert!(has_clear_credentials(&effects));
        assert_eq!(h.app.auth.view, ViewState::LoggingIn);
    }

    #[test]
    fn test_in_flight_attempt_locks_workspace() {
        let mut h = Harness::new();
        h.signed_in();
        h.admit(pdf(1024), AdmissionSource::Picker);
        h.submit_analysis();

        assert!(h.key(KeyCode::Char('a')).is_empty());
        assert!(h.key(KeyCode::Enter).is_empty());
        h.key(KeyCode::Char('c'));
        assert!(h.app.upload.slot.pending().is_some());
        assert!(
            h.send(UiEvent::Terminal(Event::Paste("/tmp/other.pdf".to_string())))
                .is_empty()
        );
        assert_eq!(h.app.analysis.phase, AnalysisPhase::Submitting);
    }

    #[test]
    fn test_late_result_after_logout_is_ignored() {
        let mut h = Harness::new();
        h.signed_in();
        h.admit(pdf(1024), AdmissionSource::Picker);
        let id = h.submit_analysis();

        let effects = h.key(KeyCode::Char('l'));
        assert!(has_clear_credentials(&effects));
        assert_eq!(h.app.auth.view, ViewState::LoggingIn);

        let effects = h.complete(
            TaskKind::Analysis,
            id,
            UiEvent::AnalysisCompleted {
                outcome: AnalysisOutcome::Succeeded(result(70)),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(h.app.analysis.phase, AnalysisPhase::Idle);
        assert!(h.app.upload.slot.pending().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut h = Harness::new();
        h.signed_in();
        h.admit(pdf(1024), AdmissionSource::Picker);
        h.app.analysis.fail(WorkflowError::local("boom"));

        h.key(KeyCode::Char('c'));
        assert!(h.app.upload.slot.pending().is_none());
        assert_eq!(h.app.analysis.phase, AnalysisPhase::Idle);

        h.key(KeyCode::Char('c'));
        assert!(h.app.upload.slot.pending().is_none());
        assert_eq!(h.app.analysis.phase, AnalysisPhase::Idle);
    }

    #[test]
    fn test_new_session_starts_with_empty_workspace() {
        let mut h = Harness::new();
        h.signed_in();
        h.admit(pdf(1024), AdmissionSource::Picker);
        h.app.analysis.fail(WorkflowError::local("old"));

        h.send(UiEvent::SessionChanged(SessionChange::Established(user())));

        assert!(h.app.upload.slot.pending().is_none());
        assert_eq!(h.app.analysis.phase, AnalysisPhase::Idle);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut h = Harness::new();
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        h.send(UiEvent::Terminal(Event::Key(key)));
        assert_eq!(h.app.auth.form.email.value(), "");
    }
}
