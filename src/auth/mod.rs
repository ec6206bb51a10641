// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the DevConnect API.
//!
//! ## Auth Flow
//!
//! 1. Client registers or logs in with email and password
//! 2. Server issues an HS256-signed token carrying `{"user": {"id"}}`
//! 3. Client resends the raw token in the `x-auth-token` header
//! 4. The auth gate verifies signature and expiry, then injects the
//!    resolved `AuthenticatedUser` into request extensions
//!
//! ## Security
//!
//! - The signing secret is read once from configuration and never rotated
//! - Every verification failure (malformed, bad signature, expired) is
//!   reported to the client with the same 401 body
//! - Passwords are stored as bcrypt hashes only

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod tokens;

pub use claims::{AuthenticatedUser, TokenClaims, UserClaim};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::{auth_middleware, authenticate};
pub use password::{hash_password, verify_password, PasswordError};
pub use tokens::{SignedToken, TokenService};
