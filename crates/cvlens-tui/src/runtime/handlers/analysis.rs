use cvlens_core::analysis::{AnalysisOutcome, classify};
use cvlens_core::error::WorkflowError;
use cvlens_core::service::ServiceClient;
use cvlens_core::upload::PendingFile;

use crate::events::UiEvent;

/// Reads the admitted file and submits it for analysis.
pub async fn submit_analysis(client: ServiceClient, token: String, file: PendingFile) -> UiEvent {
    let outcome = match file.read_payload().await {
        Ok(payload) => classify(client.analyze(&token, payload).await),
        Err(e) => AnalysisOutcome::Failed(WorkflowError::local(format!("{e:#}"))),
    };
    UiEvent::AnalysisCompleted { outcome }
}
