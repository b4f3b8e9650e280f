use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("cannot convert document: {0}")]
    Conversion(String),
    #[error("database error: {0}")]
    Db(String),
}
