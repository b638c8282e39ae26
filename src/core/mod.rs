//! Core types for depgraph
//!
//! Holds the error vocabulary shared by the reader, the projection engine and the CLI.
//!
//! - [`DepGraphError`] - enumerated failure modes
//! - [`ErrorContext`] - user-facing wrapper with details and a suggestion
//! - [`user_friendly_error`] - convert any [`anyhow::Error`] for display

pub mod error;

pub use error::{DepGraphError, ErrorContext, user_friendly_error};
