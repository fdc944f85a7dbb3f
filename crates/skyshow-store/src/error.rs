//! Error types for the show storage layer.
//!
//! All errors are propagated via [`StoreError`], which wraps JSON and
//! timeline errors with context about which storage operation failed.

use skyshow_types::ShowId;

/// Errors that can occur in the show storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Imported records failed timeline validation.
    #[error("Timeline error: {0}")]
    Timeline(#[from] skyshow_timeline::TimelineError),

    /// A show document was not found in the repository.
    #[error("Show not found: {0}")]
    ShowNotFound(ShowId),
}
