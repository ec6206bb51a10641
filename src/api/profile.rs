// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Developer profile endpoints, including account deletion and the GitHub
//! repository lookup.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::Value;

use crate::{
    audit_log,
    auth::Auth,
    error::{ensure_valid, ApiError, MessageBody},
    models::{
        EducationRequest, ExperienceRequest, OwnerSummary, ProfileRequest, ProfileResponse,
    },
    state::AppState,
    storage::{
        parse_document_id, AuditEvent, AuditEventType, DocumentStorage, PostRepository,
        ProfileRepository, StorageError, StoredProfile, UserRepository,
    },
};

const NO_PROFILE: &str = "There is no profile for this user";

fn owner_summary(storage: &DocumentStorage, user_id: &str) -> Result<OwnerSummary, ApiError> {
    match UserRepository::new(storage).get(user_id) {
        Ok(user) => Ok(OwnerSummary::from_user(&user)),
        Err(StorageError::NotFound(_)) => Ok(OwnerSummary::unknown(user_id)),
        Err(e) => Err(e.into()),
    }
}

fn with_owner(storage: &DocumentStorage, profile: StoredProfile) -> Result<ProfileResponse, ApiError> {
    let owner = owner_summary(storage, &profile.user)?;
    Ok(ProfileResponse::new(profile, owner))
}

fn require_profile(storage: &DocumentStorage, user_id: &str) -> Result<StoredProfile, ApiError> {
    ProfileRepository::new(storage)
        .find_by_user(user_id)?
        .ok_or_else(|| ApiError::bad_request(NO_PROFILE))
}

#[utoipa::path(
    get,
    path = "/api/profile/me",
    tag = "Profile",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, description = "The caller has no profile", body = MessageBody)
    )
)]
pub async fn current_profile(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<ProfileResponse>, ApiError> {
    let storage = state.storage();
    let profile = require_profile(storage, &user.user_id)?;
    Ok(Json(with_owner(storage, profile)?))
}

/// Create the caller's profile, or update it if one exists.
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfileRequest,
    tag = "Profile",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, description = "Status or skills missing")
    )
)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    ensure_valid(request.validate())?;

    let storage = state.storage();
    let profiles = ProfileRepository::new(storage);

    let profile = match profiles.find_by_user(&user.user_id)? {
        Some(mut existing) => {
            request.apply_to(&mut existing);
            existing
        }
        None => request.into_profile(&user.user_id, Utc::now()),
    };
    profiles.save(&profile)?;

    Ok(Json(with_owner(storage, profile)?))
}

#[utoipa::path(
    get,
    path = "/api/profile/all",
    tag = "Profile",
    responses((status = 200, body = [ProfileResponse]))
)]
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let storage = state.storage();
    let profiles = ProfileRepository::new(storage).list_all()?;

    let responses = profiles
        .into_iter()
        .map(|profile| with_owner(storage, profile))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/profile/user/{user_id}",
    params(("user_id" = String, Path, description = "Owner's identity ID")),
    tag = "Profile",
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, description = "No profile for this user", body = MessageBody)
    )
)]
pub async fn profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = parse_document_id(&user_id).ok_or_else(|| ApiError::bad_request(NO_PROFILE))?;

    let storage = state.storage();
    let profile = require_profile(storage, &user_id)?;
    Ok(Json(with_owner(storage, profile)?))
}

/// Delete the caller's posts, profile and identity.
#[utoipa::path(
    delete,
    path = "/api/profile",
    tag = "Profile",
    security(("auth_token" = [])),
    responses((status = 200, body = MessageBody))
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<MessageBody>, ApiError> {
    let storage = state.storage();

    let removed_posts = PostRepository::new(storage).delete_by_author(&user.user_id)?;
    ProfileRepository::new(storage).delete_by_user(&user.user_id)?;
    match UserRepository::new(storage).delete(&user.user_id) {
        Ok(()) | Err(StorageError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }

    audit_log!(
        storage,
        AuditEvent::new(AuditEventType::AccountDeleted)
            .with_user(&user.user_id)
            .with_details(serde_json::json!({ "posts_removed": removed_posts }))
    );
    tracing::info!(user_id = %user.user_id, removed_posts, "account deleted");

    Ok(Json(MessageBody {
        msg: "User Deleted".to_string(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/profile/experience",
    request_body = ExperienceRequest,
    tag = "Profile",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, description = "Validation failed or no profile")
    )
)]
pub async fn add_experience(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<ExperienceRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    ensure_valid(request.validate())?;

    let storage = state.storage();
    let mut profile = require_profile(storage, &user.user_id)?;
    profile.add_experience(request.into_entry());
    ProfileRepository::new(storage).save(&profile)?;

    Ok(Json(with_owner(storage, profile)?))
}

#[utoipa::path(
    delete,
    path = "/api/profile/experience/{exp_id}",
    params(("exp_id" = String, Path, description = "Experience entry ID")),
    tag = "Profile",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 404, description = "No such entry", body = MessageBody)
    )
)]
pub async fn delete_experience(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let storage = state.storage();
    let mut profile = require_profile(storage, &user.user_id)?;
    if !profile.remove_experience(&exp_id) {
        return Err(ApiError::not_found("Experience not found"));
    }
    ProfileRepository::new(storage).save(&profile)?;

    Ok(Json(with_owner(storage, profile)?))
}

#[utoipa::path(
    put,
    path = "/api/profile/education",
    request_body = EducationRequest,
    tag = "Profile",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 400, description = "Validation failed or no profile")
    )
)]
pub async fn add_education(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<EducationRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    ensure_valid(request.validate())?;

    let storage = state.storage();
    let mut profile = require_profile(storage, &user.user_id)?;
    profile.add_education(request.into_entry());
    ProfileRepository::new(storage).save(&profile)?;

    Ok(Json(with_owner(storage, profile)?))
}

#[utoipa::path(
    delete,
    path = "/api/profile/education/{edu_id}",
    params(("edu_id" = String, Path, description = "Education entry ID")),
    tag = "Profile",
    security(("auth_token" = [])),
    responses(
        (status = 200, body = ProfileResponse),
        (status = 404, description = "No such entry", body = MessageBody)
    )
)]
pub async fn delete_education(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(edu_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let storage = state.storage();
    let mut profile = require_profile(storage, &user.user_id)?;
    if !profile.remove_education(&edu_id) {
        return Err(ApiError::not_found("Education not found"));
    }
    ProfileRepository::new(storage).save(&profile)?;

    Ok(Json(with_owner(storage, profile)?))
}

/// Public repositories of a GitHub user, passed through from the GitHub API.
#[utoipa::path(
    get,
    path = "/api/profile/github/{username}",
    params(("username" = String, Path, description = "GitHub login")),
    tag = "Profile",
    responses(
        (status = 200, description = "Up to five repositories, oldest first"),
        (status = 404, description = "Lookup failed", body = MessageBody)
    )
)]
pub async fn github_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.github.list_repos(&username).await {
        Ok(repos) => Ok(Json(repos)),
        Err(e) => {
            tracing::debug!(error = %e, %username, "GitHub lookup failed");
            Err(ApiError::not_found("No Github profile found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::state::test_support::test_state;
    use crate::storage::{StoredPost, StoredUser};
    use axum::http::StatusCode;

    fn seed_user(state: &AppState, name: &str) -> AuthenticatedUser {
        let id = uuid::Uuid::new_v4().to_string();
        UserRepository::new(state.storage())
            .create(&StoredUser {
                id: id.clone(),
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "$2b$04$hash".to_string(),
                avatar: Some("https://www.gravatar.com/avatar/x".to_string()),
                created_at: Utc::now(),
            })
            .unwrap();
        AuthenticatedUser {
            user_id: id,
            expires_at: 0,
        }
    }

    fn profile_request(status: &str, skills: &str) -> ProfileRequest {
        ProfileRequest {
            status: status.to_string(),
            skills: skills.to_string(),
            ..Default::default()
        }
    }

    fn experience_request(title: &str) -> ExperienceRequest {
        ExperienceRequest {
            title: title.to_string(),
            company: "Acme".to_string(),
            from: "2020-01-01".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn current_profile_requires_existing_profile() {
        let (state, _temp) = test_state();
        let user = seed_user(&state, "Ada");

        let err = current_profile(State(state), Auth(user)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "There is no profile for this user");
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let (state, _temp) = test_state();
        let user = seed_user(&state, "Ada");

        let Json(created) = upsert_profile(
            State(state.clone()),
            Auth(user.clone()),
            Json(profile_request("Developer", "rust, sql")),
        )
        .await
        .unwrap();
        assert_eq!(created.user.name, "Ada");
        assert_eq!(created.skills, vec!["rust", "sql"]);

        let Json(updated) = upsert_profile(
            State(state.clone()),
            Auth(user.clone()),
            Json(profile_request("Lead", "go")),
        )
        .await
        .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, "Lead");

        let Json(me) = current_profile(State(state), Auth(user)).await.unwrap();
        assert_eq!(me, updated);
    }

    #[tokio::test]
    async fn upsert_validates_required_fields() {
        let (state, _temp) = test_state();
        let user = seed_user(&state, "Ada");

        let err = upsert_profile(State(state), Auth(user), Json(profile_request("", "")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.errors.len(), 2);
    }

    #[tokio::test]
    async fn profile_by_user_handles_malformed_and_missing_ids() {
        let (state, _temp) = test_state();
        let user = seed_user(&state, "Ada");

        for raw in ["not-an-id".to_string(), uuid::Uuid::new_v4().to_string()] {
            let err = profile_by_user(State(state.clone()), Path(raw))
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, "There is no profile for this user");
        }

        upsert_profile(
            State(state.clone()),
            Auth(user.clone()),
            Json(profile_request("Developer", "rust")),
        )
        .await
        .unwrap();
        let Json(found) = profile_by_user(State(state), Path(user.user_id.clone()))
            .await
            .unwrap();
        assert_eq!(found.user.id, user.user_id);
    }

    #[tokio::test]
    async fn list_profiles_embeds_owners() {
        let (state, _temp) = test_state();
        for name in ["Ada", "Grace"] {
            let user = seed_user(&state, name);
            upsert_profile(
                State(state.clone()),
                Auth(user),
                Json(profile_request("Developer", "rust")),
            )
            .await
            .unwrap();
        }

        let Json(all) = list_profiles(State(state)).await.unwrap();
        let mut names: Vec<_> = all.iter().map(|p| p.user.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["Ada", "Grace"]);
    }

    #[tokio::test]
    async fn experience_is_added_and_removed_by_id() {
        let (state, _temp) = test_state();
        let user = seed_user(&state, "Ada");

        let err = add_experience(
            State(state.clone()),
            Auth(user.clone()),
            Json(experience_request("Engineer")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message, "There is no profile for this user");

        upsert_profile(
            State(state.clone()),
            Auth(user.clone()),
            Json(profile_request("Developer", "rust")),
        )
        .await
        .unwrap();

        add_experience(
            State(state.clone()),
            Auth(user.clone()),
            Json(experience_request("First")),
        )
        .await
        .unwrap();
        let Json(profile) = add_experience(
            State(state.clone()),
            Auth(user.clone()),
            Json(experience_request("Second")),
        )
        .await
        .unwrap();
        assert_eq!(profile.experience[0].title, "Second");

        let first_id = profile.experience[1].id.clone();
        let Json(profile) = delete_experience(
            State(state.clone()),
            Auth(user.clone()),
            Path(first_id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].title, "Second");

        let err = delete_experience(State(state), Auth(user), Path(first_id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn education_requires_all_fields() {
        let (state, _temp) = test_state();
        let user = seed_user(&state, "Ada");
        upsert_profile(
            State(state.clone()),
            Auth(user.clone()),
            Json(profile_request("Developer", "rust")),
        )
        .await
        .unwrap();

        let err = add_education(
            State(state.clone()),
            Auth(user.clone()),
            Json(EducationRequest {
                school: "MIT".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        let params: Vec<_> = err.errors.iter().filter_map(|e| e.param.as_deref()).collect();
        assert_eq!(params, vec!["degree", "fieldofstudy", "from"]);

        let Json(profile) = add_education(
            State(state.clone()),
            Auth(user.clone()),
            Json(EducationRequest {
                school: "MIT".to_string(),
                degree: "BSc".to_string(),
                fieldofstudy: "CS".to_string(),
                from: "2010-09-01".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        let edu_id = profile.education[0].id.clone();

        let Json(profile) = delete_education(State(state), Auth(user), Path(edu_id))
            .await
            .unwrap();
        assert!(profile.education.is_empty());
    }

    #[tokio::test]
    async fn delete_account_cascades() {
        let (state, _temp) = test_state();
        let ada = seed_user(&state, "Ada");
        let grace = seed_user(&state, "Grace");

        upsert_profile(
            State(state.clone()),
            Auth(ada.clone()),
            Json(profile_request("Developer", "rust")),
        )
        .await
        .unwrap();

        let posts = PostRepository::new(state.storage());
        for (id, author) in [("p1", &ada), ("p2", &grace)] {
            posts
                .create(&StoredPost {
                    id: id.to_string(),
                    user: author.user_id.clone(),
                    text: "hello".to_string(),
                    name: "x".to_string(),
                    avatar: None,
                    likes: Vec::new(),
                    comments: Vec::new(),
                    date: Utc::now(),
                })
                .unwrap();
        }

        let Json(body) = delete_account(State(state.clone()), Auth(ada.clone()))
            .await
            .unwrap();
        assert_eq!(body.msg, "User Deleted");

        let storage = state.storage();
        assert!(!UserRepository::new(storage).exists(&ada.user_id));
        assert!(ProfileRepository::new(storage)
            .find_by_user(&ada.user_id)
            .unwrap()
            .is_none());
        assert!(!posts.exists("p1"));
        assert!(posts.exists("p2"));
        assert!(UserRepository::new(storage).exists(&grace.user_id));
    }

    #[tokio::test]
    async fn github_lookup_with_invalid_username_is_not_found() {
        let (state, _temp) = test_state();
        let err = github_repos(State(state), Path("--bad--".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "No Github profile found");
    }
}
