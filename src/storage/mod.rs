// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage as one JSON document per record under the configured
//! data directory.
//!
//! ## Storage Layout
//!
//! ```text
//! {data_dir}/
//!   users/
//!     {user_id}.json       # Identity (name, email, password hash, avatar)
//!   profiles/
//!     {user_id}.json       # One developer profile per user
//!   posts/
//!     {post_id}.json       # Post with embedded likes and comments
//!   audit/
//!     {date}/events.jsonl  # Daily audit logs
//! ```
//!
//! Password hashes are stored only in `users/` and are never serialized
//! into an API response.

pub mod audit;
pub mod document_store;
pub mod ownership;
pub mod paths;
pub mod repository;

pub use audit::{AuditEvent, AuditEventType, AuditRepository};
pub use document_store::{DocumentStorage, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipEnforcer};
pub use paths::StoragePaths;
pub use repository::{
    normalize_email, parse_document_id, Comment, Education, Experience, Like, PostRepository,
    ProfileRepository, SocialLinks, StoredPost, StoredProfile, StoredUser, UserRepository,
};
