use thiserror::Error;

/// Domain-level errors
///
/// Constraint violations (`Duplicate*`, `ConflictingUniqueValue`) are expected
/// outcomes of idempotent re-submission. `StorageUnavailable` is the only
/// kind worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Referenced row not found: {0}")]
    ReferenceNotFound(String),

    #[error("Conflicting unique value: {0}")]
    ConflictingUniqueValue(String),

    #[error("Duplicate tag: {0}")]
    DuplicateTag(String),

    #[error("Duplicate tag label: {0}")]
    DuplicateLabel(String),

    #[error("Duplicate position: {0}")]
    DuplicatePosition(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Still referenced: {0}")]
    ReferenceInUse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// True for constraint violations a caller may ignore on re-submission
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateTag(_)
                | DomainError::DuplicateLabel(_)
                | DomainError::DuplicatePosition(_)
                | DomainError::ConflictingUniqueValue(_)
        )
    }

    /// True for transient storage failures that are safe to retry with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::StorageUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
