use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store is full: maximum of {limit} documents reached")]
    CapacityExceeded { limit: usize },

    /// Document map and vector index disagree. Always a bug in the store.
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    /// Failures raised by an embedding or generation backend, as opposed to
    /// bad input or a broken store.
    pub fn is_capability_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Embedding(_) | DomainError::Generation(_) | DomainError::Parse(_)
        )
    }
}
