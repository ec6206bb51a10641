// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::health::{HealthChecks, HealthResponse, ReadyResponse},
    auth::{auth_middleware, SignedToken},
    config::AUTH_TOKEN_HEADER,
    error::{FieldError, MessageBody},
    models::{
        EducationRequest, ExperienceRequest, LoginRequest, OwnerSummary, ProfileRequest,
        ProfileResponse, RegisterRequest, TextRequest, TokenResponse, UserResponse,
    },
    state::AppState,
    storage::{Comment, Education, Experience, Like, SocialLinks, StoredPost},
};

pub mod health;
pub mod posts;
pub mod profile;
pub mod users;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/api/users", post(users::register))
        // GET authenticates through the `Auth` extractor.
        .route("/api/auth", post(users::login).get(users::current_user))
        .route("/api/profile/all", get(profile::list_profiles))
        .route("/api/profile/user/{user_id}", get(profile::profile_by_user))
        .route("/api/profile/github/{username}", get(profile::github_repos));

    let private_routes = Router::new()
        .route(
            "/api/profile",
            post(profile::upsert_profile).delete(profile::delete_account),
        )
        .route("/api/profile/me", get(profile::current_profile))
        .route("/api/profile/experience", put(profile::add_experience))
        .route(
            "/api/profile/experience/{exp_id}",
            delete(profile::delete_experience),
        )
        .route("/api/profile/education", put(profile::add_education))
        .route(
            "/api/profile/education/{edu_id}",
            delete(profile::delete_education),
        )
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/api/posts/{id}",
            get(posts::get_post).delete(posts::delete_post),
        )
        .route("/api/posts/like/{id}", put(posts::like_post))
        .route("/api/posts/unlike/{id}", put(posts::unlike_post))
        .route("/api/posts/comment/{id}", post(posts::add_comment))
        .route(
            "/api/posts/comment/{id}/{comment_id}",
            delete(posts::delete_comment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(private_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

/// Declares the `x-auth-token` header scheme referenced by private paths.
struct AuthTokenScheme;

impl Modify for AuthTokenScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "auth_token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(AUTH_TOKEN_HEADER))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        users::register,
        users::login,
        users::current_user,
        profile::current_profile,
        profile::upsert_profile,
        profile::list_profiles,
        profile::profile_by_user,
        profile::delete_account,
        profile::add_experience,
        profile::delete_experience,
        profile::add_education,
        profile::delete_education,
        profile::github_repos,
        posts::create_post,
        posts::list_posts,
        posts::get_post,
        posts::delete_post,
        posts::like_post,
        posts::unlike_post,
        posts::add_comment,
        posts::delete_comment
    ),
    components(
        schemas(
            HealthChecks,
            HealthResponse,
            ReadyResponse,
            MessageBody,
            FieldError,
            SignedToken,
            TokenResponse,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            OwnerSummary,
            ProfileRequest,
            ProfileResponse,
            ExperienceRequest,
            EducationRequest,
            Experience,
            Education,
            SocialLinks,
            TextRequest,
            StoredPost,
            Like,
            Comment
        )
    ),
    modifiers(&AuthTokenScheme),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Users", description = "Registration"),
        (name = "Auth", description = "Login and current identity"),
        (name = "Profile", description = "Developer profiles"),
        (name = "Posts", description = "Posts, likes and comments")
    )
)]
struct ApiDoc;
