// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory auth provider for demo mode and tests.
//!
//! Accounts live in a map keyed by login; sessions are HS256 JWTs signed
//! with the configured demo key. Signing out revokes the token until it
//! would have expired anyway.

use crate::db::fixture::{KLIJENT_ID, PETAR_ID};
use crate::error::AppError;
use crate::services::auth::{AuthIdentity, AuthSession};
use dashmap::DashMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Session lifetime for demo tokens.
const SESSION_TTL_SECS: usize = 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,
    pub email: String,
    /// Token id, so two sessions issued in the same second differ
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

#[derive(Clone)]
struct Account {
    id: Uuid,
    password: String,
}

/// Demo accounts and session tokens.
#[derive(Clone)]
pub struct FixtureAuth {
    accounts: Arc<DashMap<String, Account>>,
    /// Revoked token -> its `exp`.
    revoked: Arc<DashMap<String, usize>>,
    signing_key: Arc<Vec<u8>>,
}

impl FixtureAuth {
    /// Provider with no accounts.
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            accounts: Arc::new(DashMap::new()),
            revoked: Arc::new(DashMap::new()),
            signing_key: Arc::new(signing_key.to_vec()),
        }
    }

    /// Provider holding the two demo logins, `petar` (trainer) and
    /// `klijent` (client), each with its login as password.
    pub fn demo(signing_key: &[u8]) -> Self {
        let auth = Self::new(signing_key);
        auth.register("petar", "petar", PETAR_ID);
        auth.register("klijent", "klijent", KLIJENT_ID);
        auth
    }

    fn register(&self, login: &str, password: &str, id: Uuid) {
        self.accounts.insert(
            login.to_lowercase(),
            Account {
                id,
                password: password.to_string(),
            },
        );
    }

    pub fn sign_in(&self, login: &str, password: &str) -> Result<AuthSession, AppError> {
        let key = login.trim().to_lowercase();
        let account = self
            .accounts
            .get(&key)
            .map(|entry| entry.value().clone())
            .filter(|account| account.password == password)
            .ok_or_else(|| AppError::Auth("Invalid login credentials".to_string()))?;

        let access_token = self.create_token(account.id, &key)?;
        Ok(AuthSession {
            access_token: Some(access_token),
            identity: AuthIdentity {
                id: account.id,
                email: key,
            },
        })
    }

    pub fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let key = email.trim().to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(AppError::Auth("User already registered".to_string()));
        }

        let id = Uuid::new_v4();
        self.register(&key, password, id);
        tracing::info!(user_id = %id, "Registered demo account");

        let access_token = self.create_token(id, &key)?;
        Ok(AuthSession {
            access_token: Some(access_token),
            identity: AuthIdentity { id, email: key },
        })
    }

    /// Revoke `access_token` and forget revocations that have expired.
    pub fn sign_out(&self, access_token: &str) {
        let now = unix_now();
        self.revoked.retain(|_, exp| *exp > now);

        // Expired or foreign tokens are rejected by validation already.
        if let Some(claims) = self.claims(access_token) {
            self.revoked.insert(access_token.to_string(), claims.exp);
        }
    }

    /// Identity behind a token that is well-signed, unexpired and not revoked.
    pub fn get_user(&self, access_token: &str) -> Option<AuthIdentity> {
        if self.revoked.contains_key(access_token) {
            return None;
        }

        let claims = self.claims(access_token)?;
        let id: Uuid = claims.sub.parse().ok()?;
        Some(AuthIdentity {
            id,
            email: claims.email,
        })
    }

    fn claims(&self, access_token: &str) -> Option<Claims> {
        let key = DecodingKey::from_secret(&self.signing_key);
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(access_token, &key, &validation)
            .ok()
            .map(|data| data.claims)
    }

    fn create_token(&self, id: Uuid, email: &str) -> Result<String, AppError> {
        let now = unix_now();

        let claims = Claims {
            sub: id.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.signing_key),
        )
        .map_err(|e| AppError::Internal(e.into()))
    }
}

fn unix_now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as usize)
        .unwrap_or(0)
}
