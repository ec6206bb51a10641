// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post repository.
//!
//! Each post is stored as `posts/{post_id}.json` together with its likes and
//! comments. Like/unlike and comment mutations are read-modify-write on the
//! whole document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStorage, OwnedResource, StorageError, StorageResult};

/// A like on a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Like {
    pub user: String,
}

/// A comment on a post. Author name and avatar are copied at creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
}

impl OwnedResource for Comment {
    fn owner_user_id(&self) -> &str {
        &self.user
    }

    fn resource_kind(&self) -> &'static str {
        "comment"
    }
}

/// Post document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredPost {
    pub id: String,
    /// Author user ID
    pub user: String,
    pub text: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

impl OwnedResource for StoredPost {
    fn owner_user_id(&self) -> &str {
        &self.user
    }

    fn resource_kind(&self) -> &'static str {
        "post"
    }
}

impl StoredPost {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }

    /// Prepend a like. Returns false if the user already liked the post.
    pub fn like(&mut self, user_id: &str) -> bool {
        if self.is_liked_by(user_id) {
            return false;
        }
        self.likes.insert(
            0,
            Like {
                user: user_id.to_string(),
            },
        );
        true
    }

    /// Remove the user's like. Returns false if there was none.
    pub fn unlike(&mut self, user_id: &str) -> bool {
        let before = self.likes.len();
        self.likes.retain(|like| like.user != user_id);
        self.likes.len() != before
    }

    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    /// Remove a comment by ID. Returns the removed comment.
    pub fn remove_comment(&mut self, comment_id: &str) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == comment_id)?;
        Some(self.comments.remove(index))
    }
}

pub struct PostRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> PostRepository<'a> {
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    pub fn exists(&self, post_id: &str) -> bool {
        self.storage.exists(self.storage.paths().post(post_id))
    }

    pub fn get(&self, post_id: &str) -> StorageResult<StoredPost> {
        let path = self.storage.paths().post(post_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Post {post_id}")));
        }
        self.storage.read_json(path)
    }

    pub fn create(&self, post: &StoredPost) -> StorageResult<()> {
        if self.exists(&post.id) {
            return Err(StorageError::AlreadyExists(format!("Post {}", post.id)));
        }
        self.storage
            .write_json(self.storage.paths().post(&post.id), post)
    }

    /// Overwrite an existing post.
    pub fn update(&self, post: &StoredPost) -> StorageResult<()> {
        if !self.exists(&post.id) {
            return Err(StorageError::NotFound(format!("Post {}", post.id)));
        }
        self.storage
            .write_json(self.storage.paths().post(&post.id), post)
    }

    pub fn delete(&self, post_id: &str) -> StorageResult<()> {
        if !self.exists(post_id) {
            return Err(StorageError::NotFound(format!("Post {post_id}")));
        }
        self.storage.delete(self.storage.paths().post(post_id))
    }

    /// All posts, newest first.
    pub fn list_recent(&self) -> StorageResult<Vec<StoredPost>> {
        let mut posts: Vec<StoredPost> = self.storage.read_all(self.storage.paths().posts_dir())?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    /// Delete every post authored by a user. Returns how many were removed.
    pub fn delete_by_author(&self, user_id: &str) -> StorageResult<usize> {
        let mut removed = 0;
        for post in self.list_recent()? {
            if post.user != user_id {
                continue;
            }
            match self.delete(&post.id) {
                Ok(()) => removed += 1,
                Err(StorageError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use chrono::Duration;
    use tempfile::TempDir;

    fn test_storage() -> (TempDir, DocumentStorage) {
        let temp = TempDir::new().unwrap();
        let mut storage = DocumentStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().expect("Failed to initialize");
        (temp, storage)
    }

    fn test_post(id: &str, author: &str) -> StoredPost {
        StoredPost {
            id: id.to_string(),
            user: author.to_string(),
            text: "Hello".to_string(),
            name: "Ada".to_string(),
            avatar: None,
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
        }
    }

    fn comment(id: &str, author: &str) -> Comment {
        Comment {
            id: id.to_string(),
            user: author.to_string(),
            text: "Nice".to_string(),
            name: "Bob".to_string(),
            avatar: None,
            date: Utc::now(),
        }
    }

    #[test]
    fn like_is_idempotent_per_user() {
        let mut post = test_post("p1", "u1");
        assert!(post.like("u2"));
        assert!(!post.like("u2"));
        assert!(post.like("u3"));
        assert_eq!(post.likes[0].user, "u3");

        assert!(post.unlike("u2"));
        assert!(!post.unlike("u2"));
        assert_eq!(post.likes.len(), 1);
    }

    #[test]
    fn remove_comment_targets_the_given_id() {
        let mut post = test_post("p1", "u1");
        post.add_comment(comment("c1", "u2"));
        post.add_comment(comment("c2", "u2"));

        let removed = post.remove_comment("c1").unwrap();
        assert_eq!(removed.id, "c1");
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].id, "c2");
        assert!(post.remove_comment("c1").is_none());
    }

    #[test]
    fn list_recent_sorts_newest_first() {
        let (_temp, storage) = test_storage();
        let repo = PostRepository::new(&storage);

        let mut older = test_post("older", "u1");
        older.date = Utc::now() - Duration::hours(1);
        repo.create(&older).unwrap();
        repo.create(&test_post("newer", "u1")).unwrap();

        let ids: Vec<String> = repo.list_recent().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["newer".to_string(), "older".to_string()]);
    }

    #[test]
    fn update_and_delete_require_existing_post() {
        let (_temp, storage) = test_storage();
        let repo = PostRepository::new(&storage);
        let post = test_post("p1", "u1");

        assert!(matches!(repo.update(&post), Err(StorageError::NotFound(_))));
        repo.create(&post).unwrap();
        assert!(matches!(repo.create(&post), Err(StorageError::AlreadyExists(_))));

        let mut liked = post.clone();
        liked.like("u2");
        repo.update(&liked).unwrap();
        assert_eq!(repo.get("p1").unwrap().likes.len(), 1);

        repo.delete("p1").unwrap();
        assert!(matches!(repo.get("p1"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn delete_by_author_only_touches_own_posts() {
        let (_temp, storage) = test_storage();
        let repo = PostRepository::new(&storage);

        repo.create(&test_post("a1", "alice")).unwrap();
        repo.create(&test_post("a2", "alice")).unwrap();
        repo.create(&test_post("b1", "bob")).unwrap();

        assert_eq!(repo.delete_by_author("alice").unwrap(), 2);
        let remaining: Vec<String> = repo.list_recent().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec!["b1".to_string()]);
    }
}
