// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity carried inside a token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserClaim {
    pub id: String,
}

/// Signed token payload: `{"user": {"id": ...}, "iat": ..., "exp": ...}`.
///
/// Never persisted; it exists only inside the signed token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub user: UserClaim,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(user_id: impl Into<String>, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            user: UserClaim { id: user_id.into() },
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
        }
    }

    /// A claim is expired once `now` reaches `exp`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Authenticated user resolved from a verified token.
///
/// This is the primary type used throughout the application to represent
/// the caller of a private endpoint. Handlers trust it once present.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identity ID (the token's `user.id` claim)
    pub user_id: String,

    /// Token expiration (Unix timestamp, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user.id,
            expires_at: claims.exp,
        }
    }
}
