use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with id {id} not found.")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DomainError::NotFound { entity, id }
    }
}
