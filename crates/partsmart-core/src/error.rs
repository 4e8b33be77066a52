//! Error types for PartSmart

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketError>;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{entity} does not exist: {id}")]
    MissingReference { entity: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Internal(String),
}

impl MarketError {
    pub fn validation(message: impl Into<String>) -> Self {
        MarketError::Validation(message.into())
    }

    pub fn missing(entity: &'static str, id: impl Into<String>) -> Self {
        MarketError::MissingReference {
            entity,
            id: id.into(),
        }
    }

    /// Errors caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MarketError::Validation(_)
                | MarketError::MissingReference { .. }
                | MarketError::Conflict(_)
                | MarketError::Upload(_)
        )
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(e: serde_json::Error) -> Self {
        MarketError::Serialization(e.to_string())
    }
}

impl From<partsmart_types::ParseEnumError> for MarketError {
    fn from(e: partsmart_types::ParseEnumError) -> Self {
        MarketError::Database(e.to_string())
    }
}
