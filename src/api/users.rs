// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration, login and current-identity endpoints.

use axum::{extract::State, Json};
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::{
    audit_log,
    auth::{hash_password, verify_password, Auth},
    error::{ensure_valid, ApiError, FieldError, MessageBody},
    models::{LoginRequest, RegisterRequest, TokenResponse, UserResponse},
    state::AppState,
    storage::{
        normalize_email, AuditEvent, AuditEventType, StorageError, StoredUser, UserRepository,
    },
};

const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Gravatar URL for an email: 200px, PG rated, mystery-person fallback.
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(normalize_email(email).as_bytes());
    format!("{GRAVATAR_BASE_URL}/{digest:x}?s=200&r=pg&d=mm")
}

fn duplicate_user() -> ApiError {
    ApiError::validation(vec![FieldError::general("User Already Exists")])
}

fn invalid_credentials() -> ApiError {
    ApiError::validation(vec![FieldError::general("Invalid Credentials")])
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Registered; token issued", body = TokenResponse),
        (status = 400, description = "Validation failed or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    ensure_valid(request.validate())?;

    let storage = state.storage();
    let users = UserRepository::new(storage);
    let email = normalize_email(&request.email);

    if users.find_by_email(&email)?.is_some() {
        return Err(duplicate_user());
    }

    let password_hash = hash_password(request.password, state.bcrypt_cost).await?;
    let user = StoredUser {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        avatar: Some(gravatar_url(&email)),
        email,
        password_hash,
        created_at: Utc::now(),
    };

    match users.create(&user) {
        Ok(()) => {}
        Err(StorageError::AlreadyExists(_)) => return Err(duplicate_user()),
        Err(e) => return Err(e.into()),
    }

    audit_log!(
        storage,
        AuditEvent::new(AuditEventType::UserRegistered)
            .with_user(&user.id)
            .with_resource("user", &user.id)
    );
    tracing::info!(user_id = %user.id, "user registered");

    let token = state.tokens.issue(&user.id)?;
    Ok(Json(TokenResponse { token }))
}

#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Authenticated; token issued", body = TokenResponse),
        (status = 400, description = "Validation failed or invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    ensure_valid(request.validate())?;

    let storage = state.storage();
    let users = UserRepository::new(storage);

    let Some(user) = users.find_by_email(&request.email)? else {
        audit_log!(
            storage,
            AuditEvent::new(AuditEventType::LoginFailed).failed("unknown email")
        );
        return Err(invalid_credentials());
    };

    if !verify_password(request.password, user.password_hash.clone()).await? {
        audit_log!(
            storage,
            AuditEvent::new(AuditEventType::LoginFailed)
                .with_user(&user.id)
                .failed("password mismatch")
        );
        return Err(invalid_credentials());
    }

    audit_log!(
        storage,
        AuditEvent::new(AuditEventType::LoginSucceeded).with_user(&user.id)
    );

    let token = state.tokens.issue(&user.id)?;
    Ok(Json(TokenResponse { token }))
}

#[utoipa::path(
    get,
    path = "/api/auth",
    tag = "Auth",
    security(("auth_token" = [])),
    responses(
        (status = 200, description = "The caller's identity", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = MessageBody),
        (status = 404, description = "Identity no longer exists", body = MessageBody)
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<UserResponse>, ApiError> {
    let users = UserRepository::new(state.storage());
    match users.get(&user.user_id) {
        Ok(stored) => Ok(Json(UserResponse::from(stored))),
        Err(StorageError::NotFound(_)) => Err(ApiError::not_found("User not found")),
        Err(e) => Err(e.into()),
    }
}
