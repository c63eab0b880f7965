use thiserror::Error;

/// Errors originating from the background stripper.
#[derive(Error, Debug)]
pub enum StripError {
    /// Keying left no visible pixel, there is nothing to crop to.
    #[error("Aucun contenu visible après détourage ({width}×{height})")]
    NoContent {
        /// Width of the keyed image.
        width: u32,
        /// Height of the keyed image.
        height: u32,
    },
}
