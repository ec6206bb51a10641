// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DevConnect Server - Developer Social Profile Service
//!
//! Users register, sign in with stateless signed tokens, keep a developer
//! profile and publish posts that others can like and comment on.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance, verification and password hashing
//! - `providers` - Outbound integrations (GitHub)
//! - `storage` - File-backed JSON document store

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod state;
pub mod storage;
pub mod telemetry;
