//! Filesystem helpers shared by the writers and the CLI.

pub mod fs;

pub use fs::{atomic_write, ensure_dir};
