// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied to private route groups with
//! `axum::middleware::from_fn_with_state(state, auth_middleware)`. On success
//! the resolved [`AuthenticatedUser`] is inserted into request extensions,
//! where the [`Auth`](super::Auth) extractor picks it up.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthenticatedUser, TokenService};
use crate::config::AUTH_TOKEN_HEADER;
use crate::state::AppState;

/// Resolve the caller from the `x-auth-token` header.
///
/// An absent or blank header is `MissingToken` and never reaches the token
/// service. A value that is not visible ASCII cannot be a token and is
/// reported as malformed.
pub fn authenticate(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Result<AuthenticatedUser, AuthError> {
    let raw = headers
        .get(AUTH_TOKEN_HEADER)
        .ok_or(AuthError::MissingToken)?;
    let token = raw.to_str().map_err(|_| AuthError::MalformedToken)?.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    tokens.verify(token)
}

/// Authentication middleware function.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.tokens) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(
                error_code = e.error_code(),
                path = %request.uri().path(),
                "request rejected by auth gate"
            );
            e.into_response()
        }
    }
}
