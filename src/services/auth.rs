//! Authentication service implementation
//!
//! Verifies bearer tokens handed through by the routing layer and resolves
//! them to the owning uid. Token issuance lives outside this backend; only
//! verification is in scope here.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::settings::Settings;
use crate::utils::errors::{EventForgeError, Result};

/// Verified token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID
    pub sub: String,
    /// Expiration timestamp (seconds since epoch)
    pub exp: usize,
}

/// Authenticated caller identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
}

/// Bearer token verifier
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(settings: &Settings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &settings.auth.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(settings.auth.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verify a bearer token and resolve the caller's uid
    pub fn verify(&self, bearer: &str) -> Result<AuthUser> {
        if bearer.is_empty() {
            return Err(EventForgeError::Authentication(
                "missing bearer token".to_string(),
            ));
        }

        let token = decode::<Claims>(bearer, &self.decoding_key, &self.validation)?;
        debug!(uid = %token.claims.sub, "Bearer token verified");

        Ok(AuthUser {
            uid: token.claims.sub,
        })
    }
}
