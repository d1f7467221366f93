//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    // === Common error constructors ===

    /// Path does not exist
    pub fn path_not_found(path: &Path) -> Self {
        Self::new(format!("Path not found: {}", path.display()))
            .with_context("The specified path does not exist on the filesystem")
            .with_suggestion(format!(
                "TRY: Check that the path exists: ls -la {}",
                path.display()
            ))
            .with_suggestion("TRY: Check for typos in the path")
    }

    /// Path exists but is not a directory
    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("The process command expects a directory of documentation sources")
            .with_suggestion(format!(
                "TRY: Pass the documentation root: docprep process --input {} --output out/",
                path.parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string())
            ))
    }

    /// An exclude pattern failed to compile
    pub fn invalid_exclude_pattern(pattern: &str, reason: &str) -> Self {
        Self::new(format!("Invalid exclude pattern: '{}'", pattern))
            .with_context(reason.to_string())
            .with_suggestion(
                "TRY: Segments are separated by '/': a literal, '*' (one segment), or '**' (any subpath)",
            )
            .with_suggestion("TRY: Examples: packages/*/modules/_docs/**, **/README.md")
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}
