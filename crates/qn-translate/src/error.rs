//! Error type for ensemble reshaping.

/// Error type for flattening and conversion.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    Core(#[from] qn_core::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("nested column not found: {0}")]
    MissingNestedColumn(String),

    #[error("object {index} out of range for table with {n_objects} objects")]
    ObjectOutOfRange { index: usize, n_objects: usize },
}

pub type Result<T> = std::result::Result<T, TranslateError>;
