//! Upload admission gate.
//!
//! Holds at most one pending file. Candidates from both admission sources
//! (drop and picker) go through the same predicate: the accepted document
//! type and a fixed size ceiling.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::WorkflowError;
use crate::service::UploadPayload;

/// The only accepted document type.
pub const ACCEPTED_MIME_TYPE: &str = "application/pdf";

/// Size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// How a candidate reached the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionSource {
    /// Drag-release (bracketed paste of a path in the terminal).
    Drop,
    /// Explicit selection (file prompt or command-line argument).
    Picker,
}

/// A file offered for upload, not yet admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

impl CandidateFile {
    /// Inspects a file on disk: name, size from metadata, MIME type sniffed from content.
    ///
    /// # Errors
    /// Returns an error if the path is not a readable regular file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        if !metadata.is_file() {
            anyhow::bail!("{} is not a file", path.display());
        }

        let mime_type = infer::get_from_path(path)
            .with_context(|| format!("Cannot read {}", path.display()))?
            .map_or(FALLBACK_MIME_TYPE, |kind| kind.mime_type())
            .to_string();

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());

        Ok(Self {
            name,
            byte_size: metadata.len(),
            mime_type,
            path: path.to_path_buf(),
        })
    }
}

/// A file that passed admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

impl PendingFile {
    /// Size in megabytes with one decimal, e.g. `"2.4 MB"`.
    pub fn display_size(&self) -> String {
        megabytes(self.byte_size)
    }

    /// Reads the file into a multipart payload.
    ///
    /// The size ceiling is enforced again on the bytes actually read.
    ///
    /// # Errors
    /// Returns an error if the file can no longer be read or has grown past
    /// the ceiling since admission.
    pub async fn read_payload(&self) -> Result<UploadPayload> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Cannot read {}", self.path.display()))?;
        let read = bytes.len() as u64;
        if read > MAX_UPLOAD_BYTES {
            anyhow::bail!(
                "{} is now {}, over the 10MB limit. Select it again.",
                self.name,
                megabytes(read)
            );
        }
        Ok(UploadPayload {
            file_name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            bytes,
        })
    }
}

/// Which admission constraint a candidate violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    WrongType,
    TooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectionReason,
    pub source: AdmissionSource,
    /// Size of the rejected candidate.
    pub byte_size: u64,
}

impl Rejection {
    pub fn to_workflow_error(&self) -> WorkflowError {
        WorkflowError::local(self.to_string())
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            AdmissionSource::Drop => write!(f, "Please drop a PDF file under 10MB")?,
            AdmissionSource::Picker => write!(f, "Please select a PDF file under 10MB")?,
        }
        match self.reason {
            RejectionReason::WrongType => Ok(()),
            RejectionReason::TooLarge => write!(f, " (file is {})", megabytes(self.byte_size)),
        }
    }
}

fn megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// The admission predicate. Pure; identical for both sources.
///
/// # Errors
/// Returns the violated constraint (type is checked before size).
pub fn admit(candidate: CandidateFile, source: AdmissionSource) -> Result<PendingFile, Rejection> {
    let reason = if candidate.mime_type != ACCEPTED_MIME_TYPE {
        Some(RejectionReason::WrongType)
    } else if candidate.byte_size > MAX_UPLOAD_BYTES {
        Some(RejectionReason::TooLarge)
    } else {
        None
    };

    if let Some(reason) = reason {
        tracing::debug!(
            file = %candidate.name,
            bytes = candidate.byte_size,
            mime = %candidate.mime_type,
            ?reason,
            ?source,
            "upload rejected"
        );
        return Err(Rejection {
            reason,
            source,
            byte_size: candidate.byte_size,
        });
    }

    Ok(PendingFile {
        name: candidate.name,
        byte_size: candidate.byte_size,
        mime_type: candidate.mime_type,
        path: candidate.path,
    })
}

/// Single-slot holder for the pending file.
#[derive(Debug, Clone, Default)]
pub struct UploadSlot {
    pending: Option<PendingFile>,
}

impl UploadSlot {
    pub fn pending(&self) -> Option<&PendingFile> {
        self.pending.as_ref()
    }

    /// Offers a candidate. On acceptance the held file is replaced; on
    /// rejection the slot is left untouched.
    ///
    /// # Errors
    /// Returns the rejection when the candidate fails admission.
    pub fn offer(
        &mut self,
        candidate: CandidateFile,
        source: AdmissionSource,
    ) -> Result<&PendingFile, Rejection> {
        let admitted = admit(candidate, source)?;
        Ok(self.pending.insert(admitted))
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Normalizes a path delivered by a terminal drag-and-drop paste.
///
/// Terminals paste dropped files as quoted paths, `file://` URLs, or with
/// backslash-escaped spaces. Returns `None` for empty input.
pub fn normalize_dropped_path(raw: &str) -> Option<PathBuf> {
    let mut text = raw.trim();
    // Multi-file drops paste several paths; only the first is offered.
    if let Some(first) = text.lines().next() {
        text = first.trim();
    }
    if text.len() >= 2
        && ((text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('"') && text.ends_with('"')))
    {
        text = &text[1..text.len() - 1];
    }

    if let Ok(url) = url::Url::parse(text)
        && url.scheme() == "file"
    {
        return url.to_file_path().ok();
    }

    let unescaped = text.replace("\\ ", " ");
    if unescaped.is_empty() {
        None
    } else {
        Some(PathBuf::from(unescaped))
    }
}
