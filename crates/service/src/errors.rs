use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: impl Display) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 1003,
            ServiceError::Db(_) => 1200,
            ServiceError::Model(_) => 1201,
        }
    }
}
