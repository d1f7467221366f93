//! Error types for the docprep library.

use std::io;
use thiserror::Error;

/// Failures surfaced while a single rule resolves an output path.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The rule's regex has a different number of capture groups than the
    /// rule declares. This is a defect in the rule definition itself, not a
    /// property of the input path.
    #[error(
        "rule '{rule}' declares {expected} capture groups but its pattern has {found} (path: '{path}')"
    )]
    CaptureContract {
        rule: &'static str,
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("rule '{rule}' does not match '{path}'")]
    NoMatch { rule: &'static str, path: String },
}

impl ClassifyError {
    /// Name of the rule that produced this error.
    pub fn rule(&self) -> &'static str {
        match self {
            ClassifyError::CaptureContract { rule, .. } => rule,
            ClassifyError::NoMatch { rule, .. } => rule,
        }
    }
}

/// docprep error type
#[derive(Error, Debug)]
pub enum DocprepError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Invalid pattern for rule '{rule}': {reason}")]
    Rule { rule: &'static str, reason: String },

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Failed to copy '{src}' to '{dest}' (rule '{rule}'): {source}")]
    Copy {
        rule: &'static str,
        src: String,
        dest: String,
        #[source]
        source: io::Error,
    },

    #[error("Input root is not a directory: {0}")]
    InputNotADirectory(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DocprepError>;
