/// Configuration and shared error types for plantprep.
///
/// This crate contains the configuration logic used by both the
/// folder renamer and the background stripper.

pub mod config;
pub mod error;

pub use config::{EmptyPolicy, PrepConfig, RenameConfig, StripConfig};
pub use error::CoreError;
