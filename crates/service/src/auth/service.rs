use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use tracing::{debug, instrument};

use super::domain::Claims;
use super::errors::TokenError;

/// Signs and verifies HS256 tokens with the shared access secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs.min(i64::MAX as u64 / 1_000) as i64),
        }
    }

    /// Sign an arbitrary JSON object. `iat` and `exp` are always set by the server.
    ///
    /// # Examples
    /// ```
    /// use service::auth::TokenService;
    /// let tokens = TokenService::new("secret", 60);
    /// let token = tokens.sign(serde_json::json!({ "email": "a@b.com" })).unwrap();
    /// let claims = tokens.verify(&token).unwrap();
    /// assert_eq!(claims.email(), Some("a@b.com"));
    /// ```
    #[instrument(skip_all)]
    pub fn sign(&self, payload: Value) -> Result<String, TokenError> {
        let Value::Object(mut claims) = payload else {
            return Err(TokenError::InvalidPayload);
        };
        let now = Utc::now();
        claims.insert("iat".into(), Value::from(now.timestamp()));
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Sign("token lifetime overflows the clock".into()))?;
        claims.insert("exp".into(), Value::from(exp.timestamp()));
        let token = encode(&Header::default(), &Claims(claims), &self.encoding)
            .map_err(|e| TokenError::Sign(e.to_string()))?;
        debug!("token_signed");
        Ok(token)
    }

    /// Check signature and expiry, returning the decoded claims.
    ///
    /// Expiry is exact (no leeway). `aud` is client payload and is not checked.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.validate_aud = false;
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(TokenError::Expired),
            Err(e) => Err(TokenError::Invalid(e.to_string())),
        }
    }
}
