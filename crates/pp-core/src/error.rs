use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Index range with `first` after `last`.
    #[error("Plage d'index invalide : {first}..={last}")]
    InvalidRange {
        /// First index requested.
        first: u32,
        /// Last index requested.
        last: u32,
    },
}
