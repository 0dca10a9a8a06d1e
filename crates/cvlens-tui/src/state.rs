//! Application state composition.
//!
//! ```text
//! AppState
//! ├── task_seq: TaskSeq   (async task id generator)
//! ├── tasks: Tasks        (task lifecycle state)
//! ├── auth: AuthState     (view state, session context, credential form)
//! ├── upload: UploadState (pending file slot, file prompt)
//! └── analysis: AnalysisState (attempt phase)
//! ```

use std::time::Duration;

use crate::analysis::AnalysisState;
use crate::auth::AuthState;
use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::events::CheckPurpose;
use crate::upload::UploadState;

pub struct AppState {
    pub should_quit: bool,
    /// Pause on the success screen before the dashboard.
    pub success_delay: Duration,
    /// Advances on every tick; drives the busy spinner.
    pub spinner_frame: usize,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub auth: AuthState,
    pub upload: UploadState,
    pub analysis: AnalysisState,
}

impl AppState {
    pub fn new(success_delay: Duration) -> Self {
        Self {
            should_quit: false,
            success_delay,
            spinner_frame: 0,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            auth: AuthState::default(),
            upload: UploadState::default(),
            analysis: AnalysisState::default(),
        }
    }

    /// Startup: restores a stored token by validating it first.
    ///
    /// Without a token the app stays on the login form.
    pub fn start(&mut self, stored_token: Option<String>) -> Vec<UiEffect> {
        let Some(token) = stored_token else {
            return vec![];
        };

        tracing::info!("restoring stored session");
        self.auth.session.begin(token.clone());
        self.auth.restoring = true;
        vec![self.check_session(CheckPurpose::Restore, token)]
    }

    /// Marks a session check active and builds its effect.
    pub(crate) fn check_session(&mut self, purpose: CheckPurpose, token: String) -> UiEffect {
        let task = self.task_seq.next_id();
        self.tasks.state_mut(TaskKind::SessionCheck).begin(task);
        UiEffect::CheckSession {
            task,
            purpose,
            token,
        }
    }

    /// Drops every active task so late results are ignored.
    ///
    /// Returns cancel effects for tasks that registered a token.
    pub(crate) fn abandon_tasks(&mut self) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        for kind in TaskKind::ALL {
            let state = self.tasks.state_mut(kind);
            if let Some(token) = state.cancel.take() {
                effects.push(UiEffect::CancelTask {
                    kind,
                    token: Some(token),
                });
            }
            state.clear();
        }
        effects
    }
}
