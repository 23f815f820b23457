//! Import pipelines for the legacy export files.
//!
//! Each pipeline reads rows from a CSV export, turns them into API
//! payloads, and submits them. Failures are caught at the row or group
//! boundary and recorded; a failed row never aborts the run.

pub mod shortcuts;
pub mod templates;

/// An error recorded against one row or one space group.
#[derive(Debug)]
pub struct ImportError {
    /// What failed: a 1-based row number or a space key.
    pub subject: String,
    /// Description of the failure.
    pub message: String,
}

impl ImportError {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}
