//! Auth flow: login/register forms, success transition, session ownership.

mod render;
mod update;

use cvlens_core::error::WorkflowError;
use cvlens_core::service::CredentialMode;
use cvlens_core::session::SessionContext;
pub use render::render_auth;
pub use update::*;

use crate::common::TextField;

/// Which screen is active. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    LoggingIn,
    Registering,
    SuccessTransition { message: String },
    Dashboard,
}

impl ViewState {
    /// The submission mode of a form view, `None` elsewhere.
    pub fn form_mode(&self) -> Option<CredentialMode> {
        match self {
            ViewState::LoggingIn => Some(CredentialMode::Login),
            ViewState::Registering => Some(CredentialMode::Register),
            ViewState::SuccessTransition { .. } | ViewState::Dashboard => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct CredentialForm {
    pub email: TextField,
    pub password: TextField,
    pub focus: FormField,
}

impl Default for CredentialForm {
    fn default() -> Self {
        Self {
            email: TextField::default(),
            password: TextField::masked(),
            focus: FormField::Email,
        }
    }
}

impl CredentialForm {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Email => FormField::Password,
            FormField::Password => FormField::Email,
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Auth flow controller state. Sole owner of the session context.
#[derive(Debug)]
pub struct AuthState {
    pub view: ViewState,
    pub session: SessionContext,
    pub form: CredentialForm,
    /// Last submission or session error, shown on the form.
    pub error: Option<WorkflowError>,
    /// A credential submission is in flight.
    pub submitting: bool,
    /// A stored token is being validated at startup.
    pub restoring: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            view: ViewState::LoggingIn,
            session: SessionContext::new(),
            form: CredentialForm::default(),
            error: None,
            submitting: false,
            restoring: false,
        }
    }
}
