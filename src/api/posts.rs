// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post, like and comment endpoints. All of them require authentication.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    audit_log,
    auth::{Auth, AuthenticatedUser},
    error::{ensure_valid, ApiError, MessageBody},
    models::TextRequest,
    state::AppState,
    storage::{
        parse_document_id, AuditEvent, AuditEventType, Comment, DocumentStorage, Like,
        OwnershipEnforcer, PostRepository, StorageError, StoredPost, StoredUser, UserRepository,
    },
};

const POST_NOT_FOUND: &str = "Post not found";

fn load_post(storage: &DocumentStorage, raw_id: &str) -> Result<StoredPost, ApiError> {
    let post_id = parse_document_id(raw_id).ok_or_else(|| ApiError::not_found(POST_NOT_FOUND))?;
    match PostRepository::new(storage).get(&post_id) {
        Ok(post) => Ok(post),
        Err(StorageError::NotFound(_)) => Err(ApiError::not_found(POST_NOT_FOUND)),
        Err(e) => Err(e.into()),
    }
}

fn load_author(storage: &DocumentStorage, user: &AuthenticatedUser) -> Result<StoredUser, ApiError> {
    match UserRepository::new(storage).get(&user.user_id) {
        Ok(author) => Ok(author),
        Err(StorageError::NotFound(_)) => Err(ApiError::not_found("User not found")),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = TextRequest,
    tag = "Posts",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = StoredPost),
        (status = 400, description = "Text missing")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<TextRequest>,
) -> Result<Json<StoredPost>, ApiError> {
    ensure_valid(request.validate())?;

    let storage = state.storage();
    let author = load_author(storage, &user)?;

    let post = StoredPost {
        id: uuid::Uuid::new_v4().to_string(),
        user: author.id,
        text: request.text.trim().to_string(),
        name: author.name,
        avatar: author.avatar,
        likes: Vec::new(),
        comments: Vec::new(),
        date: Utc::now(),
    };
    PostRepository::new(storage).create(&post)?;

    Ok(Json(post))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    security(("auth_token" = [])),
    responses((status = 200, description = "All posts, newest first", body = [StoredPost]))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Auth(_user): Auth,
) -> Result<Json<Vec<StoredPost>>, ApiError> {
    Ok(Json(PostRepository::new(state.storage()).list_recent()?))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    tag = "Posts",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = StoredPost),
        (status = 404, body = MessageBody)
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Auth(_user): Auth,
    Path(id): Path<String>,
) -> Result<Json<StoredPost>, ApiError> {
    Ok(Json(load_post(state.storage(), &id)?))
}

/// Delete a post. Only its author may do so.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    tag = "Posts",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = MessageBody),
        (status = 401, description = "Caller is not the author", body = MessageBody),
        (status = 404, body = MessageBody)
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let storage = state.storage();
    let post = load_post(storage, &id)?;
    post.verify_ownership(&user)?;

    PostRepository::new(storage).delete(&post.id)?;
    audit_log!(
        storage,
        AuditEvent::new(AuditEventType::PostDeleted)
            .with_user(&user.user_id)
            .with_resource("post", &post.id)
    );

    Ok(Json(MessageBody {
        msg: "Post removed".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/posts/like/{id}",
    params(("id" = String, Path, description = "Post ID")),
    tag = "Posts",
    security(("auth_token" = [])),
    responses(
        (status = 200, description = "Likes after the change", body = [Like]),
        (status = 400, description = "Already liked", body = MessageBody),
        (status = 404, body = MessageBody)
    )
)]
pub async fn like_post(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let storage = state.storage();
    let mut post = load_post(storage, &id)?;
    if !post.like(&user.user_id) {
        return Err(ApiError::bad_request("Post already liked"));
    }
    PostRepository::new(storage).update(&post)?;

    Ok(Json(post.likes))
}

#[utoipa::path(
    put,
    path = "/api/posts/unlike/{id}",
    params(("id" = String, Path, description = "Post ID")),
    tag = "Posts",
    security(("auth_token" = [])),
    responses(
        (status = 200, description = "Likes after the change", body = [Like]),
        (status = 400, description = "Not liked yet", body = MessageBody),
        (status = 404, body = MessageBody)
    )
)]
pub async fn unlike_post(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let storage = state.storage();
    let mut post = load_post(storage, &id)?;
    if !post.unlike(&user.user_id) {
        return Err(ApiError::bad_request("Post has not yet been liked"));
    }
    PostRepository::new(storage).update(&post)?;

    Ok(Json(post.likes))
}

#[utoipa::path(
    post,
    path = "/api/posts/comment/{id}",
    params(("id" = String, Path, description = "Post ID")),
    request_body = TextRequest,
    tag = "Posts",
    security(("auth_token" = [])),
    responses(
        (status = 200, description = "Comments after the change", body = [Comment]),
        (status = 400, description = "Text missing"),
        (status = 404, body = MessageBody)
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    ensure_valid(request.validate())?;

    let storage = state.storage();
    let author = load_author(storage, &user)?;
    let mut post = load_post(storage, &id)?;

    post.add_comment(Comment {
        id: uuid::Uuid::new_v4().to_string(),
        user: author.id,
        text: request.text.trim().to_string(),
        name: author.name,
        avatar: author.avatar,
        date: Utc::now(),
    });
    PostRepository::new(storage).update(&post)?;

    Ok(Json(post.comments))
}

/// Delete a comment. Only the comment's author may do so.
#[utoipa::path(
    delete,
    path = "/api/posts/comment/{id}/{comment_id}",
    params(
        ("id" = String, Path, description = "Post ID"),
        ("comment_id" = String, Path, description = "Comment ID")
    ),
    tag = "Posts",
    security(("auth_token" = [])),
    responses(
        (status = 200, description = "Comments after the change", body = [Comment]),
        (status = 401, description = "Caller is not the comment author", body = MessageBody),
        (status = 404, body = MessageBody)
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let storage = state.storage();
    let mut post = load_post(storage, &id)?;

    let comment = post
        .comment(&comment_id)
        .ok_or_else(|| ApiError::not_found("Comment does not exist"))?;
    comment.verify_ownership(&user)?;

    post.remove_comment(&comment_id);
    PostRepository::new(storage).update(&post)?;

    Ok(Json(post.comments))
}
