//! Session token handling

use crate::config::JwtConfig;
use crate::domain::Role;
use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Audience stamped on every session token
const SESSION_AUDIENCE: &str = "bookstore";

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user email)
    pub sub: String,
    /// Role at issue time. Informational only: access checks use the stored role.
    pub role: Role,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.config.token_ttl_secs
    }

    /// Leeway of 5 seconds instead of the default 60 so tokens expire promptly.
    fn strict_validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.leeway = 5;
        v.set_audience(&[SESSION_AUDIENCE]);
        v.set_issuer(&[&self.config.issuer]);
        v
    }

    /// Create a session token for `email`, valid for the configured TTL
    pub fn create_session_token(&self, email: &str, role: Role) -> Result<String> {
        self.create_session_token_at(email, role, Utc::now())
    }

    /// Create a session token as if issued at `issued_at`
    pub fn create_session_token_at(
        &self,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String> {
        let exp = issued_at + Duration::seconds(self.config.token_ttl_secs);

        let claims = SessionClaims {
            sub: email.to_string(),
            role,
            iss: self.config.issuer.clone(),
            aud: SESSION_AUDIENCE.to_string(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify and decode a session token.
    ///
    /// Older clients send `<jwt>;<role>`; the unsigned suffix is dropped and never read.
    pub fn verify_session_token(&self, token: &str) -> Result<SessionClaims> {
        let token = strip_role_suffix(token);
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.strict_validation())?;
        Ok(token_data.claims)
    }
}

fn strip_role_suffix(token: &str) -> &str {
    token.split_once(';').map_or(token, |(jwt, _)| jwt).trim()
}
