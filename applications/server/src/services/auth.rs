//! Authentication service: password hashing and JWT issuing/verification

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mixtape_core::UserId;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};

/// JWT claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Access or refresh
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
}

impl AuthService {
    pub fn new(jwt_secret: &str, access_token_hours: i64, refresh_token_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_lifetime: Duration::hours(access_token_hours),
            refresh_token_lifetime: Duration::days(refresh_token_days),
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        Ok(hash(password, DEFAULT_COST)?)
    }

    pub fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        Ok(verify(password, password_hash)?)
    }

    pub fn create_access_token(&self, user_id: &UserId) -> Result<String> {
        self.create_token(user_id, TokenType::Access, self.access_token_lifetime)
    }

    pub fn create_refresh_token(&self, user_id: &UserId) -> Result<String> {
        self.create_token(user_id, TokenType::Refresh, self.refresh_token_lifetime)
    }

    fn create_token(
        &self,
        user_id: &UserId,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify a token's signature and expiry and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }

    /// Verify an access token and return the authenticated user id.
    ///
    /// Refresh tokens are rejected here; they are only good for `/api/auth/refresh`.
    pub fn authenticate(&self, token: &str) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(ServerError::Auth(
                "Refresh token cannot be used for authentication".to_string(),
            ));
        }
        Ok(UserId::new(claims.sub))
    }

    /// Verify a refresh token and return the user id it was issued to
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(ServerError::Auth("Refresh token required".to_string()));
        }
        Ok(UserId::new(claims.sub))
    }
}
