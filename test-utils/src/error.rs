use thiserror::Error;

/// Errors that can occur while preparing a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Temporary directory or document file could not be written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Seeded document could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
