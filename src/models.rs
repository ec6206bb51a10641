// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `ToSchema` for OpenAPI documentation.
//!
//! Request fields default to empty so that a missing field is reported as a
//! field error (`{"errors":[{"msg","param"}]}`) rather than a body rejection.
//!
//! ## Model Categories
//!
//! - **Accounts**: registration, login, token and identity responses
//! - **Profiles**: profile upsert, experience and education entries
//! - **Posts**: post and comment bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::SignedToken;
use crate::error::FieldError;
use crate::storage::{Education, Experience, SocialLinks, StoredProfile, StoredUser};

pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// Validation helpers
// =============================================================================

fn require(errors: &mut Vec<FieldError>, value: &str, param: &str, msg: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(param, msg));
    }
}

/// Empty or whitespace-only strings count as absent.
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Minimal structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
}

// =============================================================================
// Account Models
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, &self.name, "name", "Name is required");
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Please include a valid email"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                "Please enter a password with 6 or more characters",
            ));
        }
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Please include a valid email"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        errors
    }
}

/// `{"token": "..."}` returned by registration and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: SignedToken,
}

/// An identity as returned to its owner. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            date: user.created_at,
        }
    }
}

/// Public owner details embedded in profile responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl OwnerSummary {
    pub fn from_user(user: &StoredUser) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }

    /// Placeholder for a profile whose owner record is gone.
    pub fn unknown(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            name: String::new(),
            avatar: None,
        }
    }
}

// =============================================================================
// Profile Models
// =============================================================================

/// Create or update the caller's profile.
///
/// `skills` is a comma-separated list. Social links are rebuilt from this
/// request on every save.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProfileRequest {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub skills: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, &self.status, "status", "Status is required");
        if self.skill_list().is_empty() {
            errors.push(FieldError::new("skills", "Skills is required"));
        }
        errors
    }

    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn social(&self) -> SocialLinks {
        SocialLinks {
            youtube: non_empty(&self.youtube),
            twitter: non_empty(&self.twitter),
            facebook: non_empty(&self.facebook),
            linkedin: non_empty(&self.linkedin),
            instagram: non_empty(&self.instagram),
        }
    }

    /// A new profile for `owner`.
    pub fn into_profile(self, owner: &str, now: DateTime<Utc>) -> StoredProfile {
        let mut profile = StoredProfile {
            id: uuid::Uuid::new_v4().to_string(),
            user: owner.to_string(),
            company: None,
            website: None,
            location: None,
            status: String::new(),
            skills: Vec::new(),
            bio: None,
            githubusername: None,
            experience: Vec::new(),
            education: Vec::new(),
            social: SocialLinks::default(),
            date: now,
        };
        self.apply_to(&mut profile);
        profile
    }

    /// Overwrite the provided fields of an existing profile.
    ///
    /// Absent optional fields keep their stored value; experience and
    /// education are untouched.
    pub fn apply_to(&self, profile: &mut StoredProfile) {
        profile.status = self.status.trim().to_string();
        profile.skills = self.skill_list();
        profile.social = self.social();

        let optional = [
            (&self.company, &mut profile.company),
            (&self.website, &mut profile.website),
            (&self.location, &mut profile.location),
            (&self.bio, &mut profile.bio),
            (&self.githubusername, &mut profile.githubusername),
        ];
        for (incoming, stored) in optional {
            if let Some(value) = non_empty(incoming) {
                *stored = Some(value);
            }
        }
    }
}

/// Profile with its owner's public details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ProfileResponse {
    pub id: String,
    pub user: OwnerSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub social: SocialLinks,
    pub date: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn new(profile: StoredProfile, owner: OwnerSummary) -> Self {
        Self {
            id: profile.id,
            user: owner,
            company: profile.company,
            website: profile.website,
            location: profile.location,
            status: profile.status,
            skills: profile.skills,
            bio: profile.bio,
            githubusername: profile.githubusername,
            experience: profile.experience,
            education: profile.education,
            social: profile.social,
            date: profile.date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ExperienceRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub location: Option<String>,
    #[serde(default)]
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl ExperienceRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, &self.title, "title", "Title is required");
        require(&mut errors, &self.company, "company", "Company is required");
        require(&mut errors, &self.from, "from", "From date is required");
        errors
    }

    pub fn into_entry(self) -> Experience {
        Experience {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: non_empty(&self.location),
            from: self.from.trim().to_string(),
            to: non_empty(&self.to),
            current: self.current,
            description: non_empty(&self.description),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EducationRequest {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub fieldofstudy: String,
    #[serde(default)]
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl EducationRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, &self.school, "school", "School is required");
        require(&mut errors, &self.degree, "degree", "Degree is required");
        require(
            &mut errors,
            &self.fieldofstudy,
            "fieldofstudy",
            "Field of study is required",
        );
        require(&mut errors, &self.from, "from", "From date is required");
        errors
    }

    pub fn into_entry(self) -> Education {
        Education {
            id: uuid::Uuid::new_v4().to_string(),
            school: self.school.trim().to_string(),
            degree: self.degree.trim().to_string(),
            fieldofstudy: self.fieldofstudy.trim().to_string(),
            from: self.from.trim().to_string(),
            to: non_empty(&self.to),
            current: self.current,
            description: non_empty(&self.description),
        }
    }
}

// =============================================================================
// Post Models
// =============================================================================

/// Body for both new posts and new comments.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

impl TextRequest {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, &self.text, "text", "Text is required");
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check() {
        for ok in ["a@b.io", "first.last@sub.example.com", " ada@example.com "] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["", "plain", "@b.io", "a@", "a@b", "a@b.", "a b@c.io", "a@b@c.io"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn register_collects_every_field_error() {
        let errors = RegisterRequest {
            name: " ".to_string(),
            email: "nope".to_string(),
            password: "12345".to_string(),
        }
        .validate();

        let params: Vec<_> = errors.iter().filter_map(|e| e.param.as_deref()).collect();
        assert_eq!(params, vec!["name", "email", "password"]);
    }

    #[test]
    fn skills_are_split_and_trimmed() {
        let request = ProfileRequest {
            status: "Developer".to_string(),
            skills: " rust, go ,,python ".to_string(),
            ..Default::default()
        };
        assert_eq!(request.skill_list(), vec!["rust", "go", "python"]);
        assert!(request.validate().is_empty());

        let empty = ProfileRequest {
            status: "Developer".to_string(),
            skills: " , ".to_string(),
            ..Default::default()
        };
        assert_eq!(empty.validate()[0].param.as_deref(), Some("skills"));
    }

    #[test]
    fn apply_keeps_absent_fields_and_rebuilds_social() {
        let first = ProfileRequest {
            status: "Developer".to_string(),
            skills: "rust".to_string(),
            company: Some("Acme".to_string()),
            twitter: Some("https://twitter.com/ada".to_string()),
            ..Default::default()
        };
        let mut profile = first.into_profile("u1", Utc::now());
        assert_eq!(profile.social.twitter.as_deref(), Some("https://twitter.com/ada"));

        let second = ProfileRequest {
            status: "Lead".to_string(),
            skills: "rust, sql".to_string(),
            bio: Some("hi".to_string()),
            youtube: Some("https://youtube.com/ada".to_string()),
            ..Default::default()
        };
        second.apply_to(&mut profile);

        assert_eq!(profile.status, "Lead");
        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert_eq!(profile.bio.as_deref(), Some("hi"));
        assert!(profile.social.twitter.is_none());
        assert_eq!(profile.social.youtube.as_deref(), Some("https://youtube.com/ada"));
    }

    #[test]
    fn user_response_hides_password_hash() {
        let user = StoredUser {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            avatar: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
