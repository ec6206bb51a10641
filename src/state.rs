// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::{AppConfig, DEFAULT_BCRYPT_COST};
use crate::providers::GithubClient;
use crate::storage::DocumentStorage;

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<DocumentStorage>,
    pub tokens: Arc<TokenService>,
    pub github: Arc<GithubClient>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(storage: DocumentStorage, tokens: TokenService, github: GithubClient) -> Self {
        Self {
            storage: Arc::new(storage),
            tokens: Arc::new(tokens),
            github: Arc::new(github),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Build the state from loaded configuration and an initialized store.
    pub fn from_config(
        config: &AppConfig,
        storage: DocumentStorage,
        github: GithubClient,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl);
        Self::new(storage, tokens, github).with_bcrypt_cost(config.bcrypt_cost)
    }

    pub fn storage(&self) -> &DocumentStorage {
        &self.storage
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::config::DEFAULT_GITHUB_API_URL;
    use crate::storage::StoragePaths;

    pub const TEST_SECRET: &str = "test-signing-secret";

    /// State over a fresh temp-dir store with the cheapest bcrypt cost.
    pub fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut storage = DocumentStorage::new(StoragePaths::new(temp_dir.path()));
        storage.initialize().expect("Failed to initialize storage");

        let tokens = TokenService::new(TEST_SECRET, Duration::from_secs(36_000));
        let github =
            GithubClient::new(DEFAULT_GITHUB_API_URL, None).expect("Failed to build client");

        let state = AppState::new(storage, tokens, github).with_bcrypt_cost(4);
        (state, temp_dir)
    }
}
