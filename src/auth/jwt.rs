use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::TokenVerifier;
use crate::error::{EngineError, Result};

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Employee identifier.
    pub sub: String,
    pub exp: usize,
    pub jti: String,
}

/// HS256 bearer-token verifier for the hosted identity service's tokens.
pub struct JwtVerifier {
    secret: String,
}

impl JwtVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Mints a token for `employee_id`, valid for `ttl` seconds. Used by the
    /// composition root's seed path and by tests.
    pub fn issue(&self, employee_id: &str, ttl: usize) -> Result<String> {
        let claims = Claims {
            sub: employee_id.to_owned(),
            exp: now() + ttl,
            jti: Uuid::new_v4().to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|_| EngineError::InvalidToken)
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<String> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims.sub)
        .map_err(|_| EngineError::InvalidToken)
    }
}
