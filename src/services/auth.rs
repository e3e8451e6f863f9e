// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication provider (hosted auth API or demo accounts).

use crate::error::AppError;
use crate::services::fixture_auth::FixtureAuth;
use crate::services::gotrue::GoTrueClient;
use uuid::Uuid;

/// The identity an auth provider vouches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
}

/// Result of a successful sign-in or sign-up.
///
/// `access_token` is `None` when sign-up succeeded but the account still
/// needs e-mail confirmation.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: Option<String>,
    pub identity: AuthIdentity,
}

/// Source of identities, chosen once at startup alongside the data backend.
#[derive(Clone)]
pub enum AuthProvider {
    Remote(GoTrueClient),
    Fixture(FixtureAuth),
}

impl AuthProvider {
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        match self {
            AuthProvider::Remote(client) => client.sign_in(email, password).await,
            AuthProvider::Fixture(auth) => auth.sign_in(email, password),
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        match self {
            AuthProvider::Remote(client) => client.sign_up(email, password).await,
            AuthProvider::Fixture(auth) => auth.sign_up(email, password),
        }
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        match self {
            AuthProvider::Remote(client) => client.sign_out(access_token).await,
            AuthProvider::Fixture(auth) => {
                auth.sign_out(access_token);
                Ok(())
            }
        }
    }

    /// Identity behind `access_token`, or `None` if it is invalid or revoked.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthIdentity>, AppError> {
        match self {
            AuthProvider::Remote(client) => client.get_user(access_token).await,
            AuthProvider::Fixture(auth) => Ok(auth.get_user(access_token)),
        }
    }
}
