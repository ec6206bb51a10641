// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential store: registered identities.
//!
//! Each identity is stored as `users/{user_id}.json`. Email uniqueness is
//! enforced on create by scanning existing records; emails are compared in
//! their normalized (trimmed, lower-cased) form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Identity record. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Normalize an email for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct UserRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> UserRepository<'a> {
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    pub fn exists(&self, user_id: &str) -> bool {
        self.storage.exists(self.storage.paths().user(user_id))
    }

    /// Get an identity by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Find an identity by email.
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        let wanted = normalize_email(email);
        Ok(self
            .list_all()?
            .into_iter()
            .find(|user| user.email == wanted))
    }

    /// Create a new identity. Fails if the ID or the email is taken.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        if self.exists(&user.id) {
            return Err(StorageError::AlreadyExists(format!("User {}", user.id)));
        }
        if self.find_by_email(&user.email)?.is_some() {
            return Err(StorageError::AlreadyExists(format!(
                "User with email {}",
                user.email
            )));
        }

        let mut record = user.clone();
        record.email = normalize_email(&user.email);
        self.storage
            .write_json(self.storage.paths().user(&record.id), &record)
    }

    /// Delete an identity.
    pub fn delete(&self, user_id: &str) -> StorageResult<()> {
        if !self.exists(user_id) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.delete(self.storage.paths().user(user_id))
    }

    pub fn list_all(&self) -> StorageResult<Vec<StoredUser>> {
        self.storage.read_all(self.storage.paths().users_dir())
    }
}
