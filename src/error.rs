// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP-facing error type shared by all handlers.
//!
//! Single errors render as `{"msg": "..."}`; input validation failures render
//! as `{"errors": [{"msg": "...", "param": "..."}]}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{AuthError, PasswordError};
use crate::storage::StorageError;

/// One failed input check.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
        }
    }

    /// A failure not tied to a single input field.
    pub fn general(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Vec<FieldError>,
}

/// `{"msg": "..."}` body used for single-message responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub msg: String,
}

#[derive(Serialize)]
struct ErrorListBody {
    errors: Vec<FieldError>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
    }

    /// 400 carrying a list of field errors.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let message = errors
            .first()
            .map(|e| e.msg.clone())
            .unwrap_or_else(|| "Invalid request".to_string());
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            errors,
        }
    }
}

/// Fail with a 400 field-error list unless `errors` is empty.
pub fn ensure_valid(errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PermissionDenied { user_id, resource } => {
                tracing::debug!(%user_id, %resource, "ownership check failed");
                Self::unauthorized("User not authorized")
            }
            other => {
                tracing::error!(error = %other, "document store operation failed");
                Self::internal()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if let AuthError::SigningFailed(reason) = &err {
            tracing::error!(%reason, "token signing failed");
        }
        Self::new(err.status_code(), err.public_message())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!(error = %err, "password hashing failed");
        Self::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.errors.is_empty() {
            let body = Json(MessageBody { msg: self.message });
            (self.status, body).into_response()
        } else {
            let body = Json(ErrorListBody {
                errors: self.errors,
            });
            (self.status, body).into_response()
        }
    }
}
