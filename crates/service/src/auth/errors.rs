use thiserror::Error;

/// Failures while minting or checking a token
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token payload must be a JSON object")]
    InvalidPayload,
    #[error("signing failed: {0}")]
    Sign(String),
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token expired")]
    Expired,
}

impl TokenError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            TokenError::InvalidPayload => 1001,
            TokenError::Sign(_) => 1101,
            TokenError::Invalid(_) => 1102,
            TokenError::Expired => 1103,
        }
    }
}
