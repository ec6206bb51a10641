// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Developer profile repository.
//!
//! A user has at most one profile, stored as `profiles/{owner_user_id}.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// A position in the profile's work history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An entry in the profile's education history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Social network links.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Profile document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredProfile {
    pub id: String,
    /// Owner user ID
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub social: SocialLinks,
    pub date: DateTime<Utc>,
}

impl StoredProfile {
    /// Prepend a work history entry.
    pub fn add_experience(&mut self, entry: Experience) {
        self.experience.insert(0, entry);
    }

    /// Remove a work history entry by ID. Returns whether anything was removed.
    pub fn remove_experience(&mut self, experience_id: &str) -> bool {
        let before = self.experience.len();
        self.experience.retain(|e| e.id != experience_id);
        self.experience.len() != before
    }

    /// Prepend an education entry.
    pub fn add_education(&mut self, entry: Education) {
        self.education.insert(0, entry);
    }

    /// Remove an education entry by ID. Returns whether anything was removed.
    pub fn remove_education(&mut self, education_id: &str) -> bool {
        let before = self.education.len();
        self.education.retain(|e| e.id != education_id);
        self.education.len() != before
    }
}

pub struct ProfileRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Get the profile owned by a user, if any.
    pub fn find_by_user(&self, user_id: &str) -> StorageResult<Option<StoredProfile>> {
        let path = self.storage.paths().profile(user_id);
        if !self.storage.exists(&path) {
            return Ok(None);
        }
        match self.storage.read_json(path) {
            Ok(profile) => Ok(Some(profile)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create or replace the owner's profile.
    pub fn save(&self, profile: &StoredProfile) -> StorageResult<()> {
        self.storage
            .write_json(self.storage.paths().profile(&profile.user), profile)
    }

    /// Delete the owner's profile. Returns whether a profile existed.
    pub fn delete_by_user(&self, user_id: &str) -> StorageResult<bool> {
        match self.storage.delete(self.storage.paths().profile(user_id)) {
            Ok(()) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn list_all(&self) -> StorageResult<Vec<StoredProfile>> {
        let mut profiles: Vec<StoredProfile> =
            self.storage.read_all(self.storage.paths().profiles_dir())?;
        profiles.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, DocumentStorage) {
        let temp = TempDir::new().unwrap();
        let mut storage = DocumentStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().expect("Failed to initialize");
        (temp, storage)
    }

    fn test_profile(owner: &str) -> StoredProfile {
        StoredProfile {
            id: format!("profile-{owner}"),
            user: owner.to_string(),
            company: Some("Analytical Engines".to_string()),
            website: None,
            location: None,
            status: "Developer".to_string(),
            skills: vec!["rust".to_string(), "sql".to_string()],
            bio: None,
            githubusername: None,
            experience: Vec::new(),
            education: Vec::new(),
            social: SocialLinks::default(),
            date: Utc::now(),
        }
    }

    fn experience(id: &str) -> Experience {
        Experience {
            id: id.to_string(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: None,
            from: "2020-01-01".to_string(),
            to: None,
            current: true,
            description: None,
        }
    }

    #[test]
    fn save_and_find_by_user() {
        let (_temp, storage) = test_storage();
        let repo = ProfileRepository::new(&storage);

        assert!(repo.find_by_user("u1").unwrap().is_none());

        repo.save(&test_profile("u1")).unwrap();
        let loaded = repo.find_by_user("u1").unwrap().unwrap();
        assert_eq!(loaded.status, "Developer");
        assert_eq!(loaded.skills, vec!["rust", "sql"]);
    }

    #[test]
    fn experience_is_prepended_and_removed_by_id() {
        let mut profile = test_profile("u1");
        profile.add_experience(experience("e1"));
        profile.add_experience(experience("e2"));
        assert_eq!(profile.experience[0].id, "e2");

        assert!(!profile.remove_experience("missing"));
        assert_eq!(profile.experience.len(), 2);

        assert!(profile.remove_experience("e1"));
        assert_eq!(
            profile.experience.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            vec!["e2"]
        );
    }

    #[test]
    fn delete_by_user_reports_presence() {
        let (_temp, storage) = test_storage();
        let repo = ProfileRepository::new(&storage);

        repo.save(&test_profile("u1")).unwrap();
        assert!(repo.delete_by_user("u1").unwrap());
        assert!(!repo.delete_by_user("u1").unwrap());
    }

    #[test]
    fn list_all_returns_every_profile() {
        let (_temp, storage) = test_storage();
        let repo = ProfileRepository::new(&storage);

        repo.save(&test_profile("u1")).unwrap();
        repo.save(&test_profile("u2")).unwrap();

        assert_eq!(repo.list_all().unwrap().len(), 2);
    }
}
