use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("connection error: {0}")]
    Connect(String),
    #[error("database error: {0}")]
    Db(String),
}
