use thiserror::Error;

/// Errors that may occur when evaluating leaf biochemistry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhotosynthesisError {
    /// A parameter or driver is non-finite or outside its physical domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
