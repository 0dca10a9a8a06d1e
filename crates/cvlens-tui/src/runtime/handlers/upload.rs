use std::path::PathBuf;

use cvlens_core::upload::{AdmissionSource, CandidateFile};

use crate::events::UiEvent;

/// Inspects a file on disk (size and sniffed type) off the async runtime.
pub async fn load_candidate(source: AdmissionSource, path: PathBuf) -> UiEvent {
    let result = match tokio::task::spawn_blocking(move || CandidateFile::from_path(&path)).await {
        Ok(Ok(candidate)) => Ok(candidate),
        Ok(Err(e)) => Err(format!("{e:#}")),
        Err(e) => Err(format!("File inspection failed: {e}")),
    };
    UiEvent::CandidateLoaded { source, result }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use cvlens_core::upload::ACCEPTED_MIME_TYPE;
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn test_load_candidate_sniffs_pdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.bin");
        fs::write(&path, b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n").unwrap();

        let event = load_candidate(AdmissionSource::Drop, path).await;

        let UiEvent::CandidateLoaded { source, result } = event else {
            panic!("unexpected event {event:?}");
        };
        assert_eq!(source, AdmissionSource::Drop);
        let candidate = result.unwrap();
        assert_eq!(candidate.name, "resume.bin");
        assert_eq!(candidate.mime_type, ACCEPTED_MIME_TYPE);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let event = load_candidate(AdmissionSource::Picker, dir.path().join("nope.pdf")).await;

        let UiEvent::CandidateLoaded { result, .. } = event else {
            panic!("unexpected event {event:?}");
        };
        assert!(result.is_err());
    }
}
