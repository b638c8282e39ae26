//! Error handling for depgraph
//!
//! This module provides the error types and user-friendly error reporting for depgraph.
//! The error system is built around two pieces:
//! 1. **Strongly-typed errors** ([`DepGraphError`]) raised by the lock file reader and the
//!    projection engine
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Arguments**: [`DepGraphError::InvalidArgument`]
//! - **Input files**: [`DepGraphError::FileNotFound`], [`DepGraphError::LockFileParse`]
//! - **Lock content**: [`DepGraphError::MissingTarget`], [`DepGraphError::MissingFramework`]
//! - **System**: [`DepGraphError::Io`]
//!
//! Errors are raised where they are detected and propagate unmodified to the caller. The
//! CLI converts whatever reaches it with [`user_friendly_error`] and exits non-zero.
//!
//! # Examples
//!
//! ```rust,no_run
//! use depgraph::core::{DepGraphError, user_friendly_error};
//!
//! let error = anyhow::Error::from(DepGraphError::MissingTarget);
//! let context = user_friendly_error(error);
//! context.display(); // Prints a colored error with a suggestion to stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for depgraph operations.
///
/// Each variant names one failure mode. The projection engine only ever raises
/// [`MissingTarget`](Self::MissingTarget) and [`MissingFramework`](Self::MissingFramework);
/// the remaining variants belong to the reader and the command-line front end.
#[derive(Error, Debug)]
pub enum DepGraphError {
    /// A required argument or collaborator was missing or unusable.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        name: String,
        /// Why the argument was rejected
        reason: String,
    },

    /// The source path does not reference an existing file.
    #[error("Could not find file '{path}'")]
    FileNotFound {
        /// The path exactly as it was supplied
        path: String,
    },

    /// The lock file has no resolution targets but the projection needs one.
    #[error("Lock file does not contain any resolution targets")]
    MissingTarget,

    /// The package spec declares no target frameworks but the projection needs one.
    #[error("Package spec does not declare any target frameworks")]
    MissingFramework,

    /// The lock file could not be parsed.
    #[error("Invalid lock file {file}: {reason}")]
    LockFileParse {
        /// Path of the lock file
        file: String,
        /// Parser message
        reason: String,
    },

    /// IO error from [`std::io::Error`]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else, carried as a message.
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for DepGraphError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidArgument {
                name,
                reason,
            } => Self::InvalidArgument {
                name: name.clone(),
                reason: reason.clone(),
            },
            Self::FileNotFound {
                path,
            } => Self::FileNotFound {
                path: path.clone(),
            },
            Self::MissingTarget => Self::MissingTarget,
            Self::MissingFramework => Self::MissingFramework,
            Self::LockFileParse {
                file,
                reason,
            } => Self::LockFileParse {
                file: file.clone(),
                reason: reason.clone(),
            },
            // io::Error is not Clone; keep kind and message
            Self::Io(e) => Self::Io(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that adds user-friendly details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DepGraphError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DepGraphError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// [`DepGraphError`] values anywhere in the chain get tailored suggestions, bare
/// [`std::io::Error`]s get filesystem guidance, and everything else is reported with its
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(depgraph_error) = error.chain().find_map(|e| e.downcast_ref::<DepGraphError>()) {
        let mut context = create_error_context(depgraph_error.clone());
        // Keep the outer context message when the typed error was wrapped
        if error.downcast_ref::<DepGraphError>().is_none() && context.details.is_none() {
            context.details = Some(error.to_string());
        }
        return context;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DepGraphError::Io(std::io::Error::new(
                    io_error.kind(),
                    io_error.to_string(),
                )))
                .with_suggestion("Check the permissions of the destination directory")
                .with_details("depgraph could not read or write one of its files");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DepGraphError::Io(std::io::Error::new(
                    io_error.kind(),
                    io_error.to_string(),
                )))
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DepGraphError::Other {
        message,
    })
}

fn create_error_context(error: DepGraphError) -> ErrorContext {
    match &error {
        DepGraphError::FileNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Point depgraph at a restored project.assets.json (usually under obj/)")
            .with_details("The lock file is produced by 'dotnet restore'"),

        DepGraphError::InvalidArgument { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'depgraph --help' to see the accepted arguments"),

        DepGraphError::MissingTarget => ErrorContext::new(error)
            .with_suggestion("Run 'dotnet restore' so the lock file records resolved targets")
            .with_details("Full, immediate, per-target and map output all read the resolved targets"),

        DepGraphError::MissingFramework => ErrorContext::new(error)
            .with_suggestion("Check the project declares at least one target framework")
            .with_details("Immediate and per-framework output read the declared frameworks"),

        DepGraphError::LockFileParse { .. } => ErrorContext::new(error)
            .with_suggestion("Delete the lock file and run 'dotnet restore' to regenerate it")
            .with_details("Only version 3 project.assets.json files are supported"),

        DepGraphError::Io(_) | DepGraphError::Other { .. } => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DepGraphError::FileNotFound {
            path: "missing.json".to_string(),
        };
        assert_eq!(error.to_string(), "Could not find file 'missing.json'");

        let error = DepGraphError::InvalidArgument {
            name: "sink".to_string(),
            reason: "a log sink is required".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid argument 'sink': a log sink is required");
    }

    #[test]
    fn test_error_clone_keeps_io_kind() {
        let error = DepGraphError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        match error.clone() {
            DepGraphError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("unexpected clone: {other:?}"),
        }
    }

    #[test]
    fn test_error_context_display() {
        let context = ErrorContext::new(DepGraphError::MissingTarget)
            .with_details("some details")
            .with_suggestion("do something");

        let display = format!("{context}");
        assert!(display.contains("resolution targets"));
        assert!(display.contains("Details: some details"));
        assert!(display.contains("Suggestion: do something"));
    }

    #[test]
    fn test_user_friendly_error_typed() {
        let context = user_friendly_error(anyhow::Error::from(DepGraphError::MissingFramework));
        assert!(matches!(context.error, DepGraphError::MissingFramework));
        assert!(context.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_finds_wrapped_error() {
        let error = anyhow::Error::from(DepGraphError::MissingTarget)
            .context("Failed to build the dependency graph");
        let context = user_friendly_error(error);
        assert!(matches!(context.error, DepGraphError::MissingTarget));
    }

    #[test]
    fn test_user_friendly_error_generic_includes_chain() {
        let error = anyhow::anyhow!("root cause").context("outer");
        let context = user_friendly_error(error);
        let display = context.to_string();
        assert!(display.contains("outer"));
        assert!(display.contains("Caused by:"));
        assert!(display.contains("root cause"));
    }
}
