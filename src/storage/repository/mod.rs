// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using the DocumentStorage for all file operations.

pub mod posts;
pub mod profiles;
pub mod users;

pub use posts::{Comment, Like, PostRepository, StoredPost};
pub use profiles::{Education, Experience, ProfileRepository, SocialLinks, StoredProfile};
pub use users::{normalize_email, StoredUser, UserRepository};

/// Canonicalize a client-supplied document ID.
///
/// IDs are UUIDs; anything else cannot name a stored document and is
/// rejected before it reaches a filesystem path.
pub fn parse_document_id(raw: &str) -> Option<String> {
    uuid::Uuid::parse_str(raw).ok().map(|id| id.to_string())
}
