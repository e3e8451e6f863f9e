// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym Dashboard: training, nutrition and membership tracking for a gym
//!
//! This crate serves the trainer and client dashboards over a hosted
//! auth + REST backend, or over built-in demo data.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod view;

use config::{Config, ConfigError, DataMode};
use db::{Backend, FixtureStore, PostgrestClient};
use services::{
    AuthProvider, DataService, ExerciseCache, FixtureAuth, GoTrueClient, SessionEventKind,
    SessionService,
};
use std::time::Duration;
use tokio::task::JoinHandle;
use view::ViewRegistry;

/// Views unused for a full session lifetime belong to expired sessions.
const VIEW_IDLE_LIMIT: Duration = Duration::from_secs(24 * 60 * 60);
const VIEW_PRUNE_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub data: DataService,
    pub sessions: SessionService,
    pub exercises: ExerciseCache,
    pub views: ViewRegistry,
}

impl AppState {
    /// Wire the backend and auth provider selected by `config.mode`.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let (backend, auth) = match config.mode {
            DataMode::Demo => (
                Backend::Fixture(FixtureStore::demo(time_utils::today())),
                AuthProvider::Fixture(FixtureAuth::demo(&config.demo_signing_key)),
            ),
            DataMode::Live => {
                let url = config
                    .supabase_url
                    .clone()
                    .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
                let key = config
                    .supabase_anon_key
                    .clone()
                    .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
                (
                    Backend::Remote(PostgrestClient::new(&url, key.clone())),
                    AuthProvider::Remote(GoTrueClient::new(&url, key)),
                )
            }
        };

        Ok(Self::with_backends(config, backend, auth))
    }

    pub fn with_backends(config: Config, backend: Backend, auth: AuthProvider) -> Self {
        let data = DataService::new(backend);
        let sessions = SessionService::new(auth, data.clone());
        Self {
            config,
            data,
            sessions,
            exercises: ExerciseCache::new(),
            views: ViewRegistry::new(),
        }
    }
}

/// Give every user who signs in a view, whichever request signed them in.
pub fn spawn_session_listener(state: &AppState) -> JoinHandle<()> {
    let views = state.views.clone();
    state.sessions.on_auth_state_change(move |kind, user| {
        if let (SessionEventKind::SignedIn, Some(user)) = (kind, user) {
            views.ensure(&user);
        }
    })
}

/// Periodically drop views of sessions that ended without a logout.
pub fn spawn_view_pruner(state: &AppState) -> JoinHandle<()> {
    let views = state.views.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(VIEW_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let pruned = views.prune_idle(VIEW_IDLE_LIMIT);
            if pruned > 0 {
                tracing::info!(pruned, "Pruned idle views");
            }
        }
    })
}
