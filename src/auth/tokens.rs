// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token service: issues and verifies HS256-signed identity tokens.
//!
//! The service owns the signing secret for the whole process lifetime and
//! holds no mutable state, so one instance is shared across all requests.

use std::{fmt, time::Duration};

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::{claims::TokenClaims, AuthError, AuthenticatedUser};

/// Opaque signed token handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against an explicit clock.
        validation.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id`, valid for the configured TTL from now.
    pub fn issue(&self, user_id: &str) -> Result<SignedToken, AuthError> {
        self.issue_at(user_id, now_unix())
    }

    pub fn issue_at(&self, user_id: &str, issued_at: i64) -> Result<SignedToken, AuthError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims::new(user_id, issued_at, ttl_secs);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(SignedToken)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.verify_at(token, now_unix())
    }

    /// Verify a token as of `now` (Unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            },
        )?;

        if data.claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        Ok(AuthenticatedUser::from_claims(data.claims))
    }
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
