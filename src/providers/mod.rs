// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outbound integrations with third-party services.

pub mod github;

pub use github::{GithubClient, GithubError};
