//! Analysis workflow: one attempt at a time, from pre-flight to outcome.

mod render;
mod update;

use cvlens_core::error::WorkflowError;
use cvlens_core::service::AnalysisResult;
pub use render::render_analysis;
pub use update::*;

/// Phase of the current attempt.
///
/// `Succeeded` and `Failed` are terminal. A result and an error are never
/// live at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(WorkflowError),
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisState {
    pub phase: AnalysisPhase,
}

impl AnalysisState {
    /// Re-entry guard: true while validating or submitting.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.phase,
            AnalysisPhase::Validating | AnalysisPhase::Submitting
        )
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            AnalysisPhase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match &self.phase {
            AnalysisPhase::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.phase = AnalysisPhase::Idle;
    }

    pub fn fail(&mut self, error: WorkflowError) {
        self.phase = AnalysisPhase::Failed(error);
    }
}
