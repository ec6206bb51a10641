// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! Internally each failure keeps its own kind for logging. Externally every
//! verification failure collapses into one 401 `"Token is not Valid"` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::MessageBody;

pub const MISSING_TOKEN_MESSAGE: &str = "No Token ,Authorization Denied";
pub const INVALID_TOKEN_MESSAGE: &str = "Token is not Valid";

/// Authentication error type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    /// No token header present, or it was empty
    #[error("auth token header is missing")]
    MissingToken,
    /// Token could not be decoded
    #[error("token is malformed")]
    MalformedToken,
    /// Token signature does not match the server secret
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Token is past its expiry
    #[error("token has expired")]
    TokenExpired,
    /// Token could not be produced
    #[error("failed to sign token: {0}")]
    SigningFailed(String),
}

impl AuthError {
    /// Get the error code for this error (logging only).
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::SigningFailed(_) => "signing_failed",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::SigningFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// The message shown to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => MISSING_TOKEN_MESSAGE,
            AuthError::MalformedToken | AuthError::InvalidSignature | AuthError::TokenExpired => {
                INVALID_TOKEN_MESSAGE
            }
            AuthError::SigningFailed(_) => "Server Error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(MessageBody {
            msg: self.public_message().to_string(),
        });
        (self.status_code(), body).into_response()
    }
}
