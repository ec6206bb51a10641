// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path utilities for the document store layout.

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_DATA_DIR;

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Profile Paths ==========

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// Profiles are keyed by their owner, one per user.
    pub fn profile(&self, owner_user_id: &str) -> PathBuf {
        self.profiles_dir().join(format!("{owner_user_id}.json"))
    }

    // ========== Post Paths ==========

    pub fn posts_dir(&self) -> PathBuf {
        self.root.join("posts")
    }

    pub fn post(&self, post_id: &str) -> PathBuf {
        self.posts_dir().join(format!("{post_id}.json"))
    }

    // ========== Audit Log Paths ==========

    pub fn audit_dir(&self) -> PathBuf {
        self.root.join("audit")
    }

    /// Path to a daily audit events file (JSONL format).
    pub fn audit_events_file(&self, date: &str) -> PathBuf {
        self.audit_dir().join(date).join("events.jsonl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_data_dir() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("./data"));
    }

    #[test]
    fn document_paths_are_correct() {
        let paths = StoragePaths::new("/tmp/test-data");
        assert_eq!(paths.user("u1"), PathBuf::from("/tmp/test-data/users/u1.json"));
        assert_eq!(
            paths.profile("u1"),
            PathBuf::from("/tmp/test-data/profiles/u1.json")
        );
        assert_eq!(paths.post("p1"), PathBuf::from("/tmp/test-data/posts/p1.json"));
        assert_eq!(
            paths.audit_events_file("2026-01-28"),
            PathBuf::from("/tmp/test-data/audit/2026-01-28/events.jsonl")
        );
    }
}
