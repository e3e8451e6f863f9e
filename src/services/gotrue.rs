// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the hosted auth API (`/auth/v1`).
//!
//! Handles:
//! - Password sign-in
//! - Sign-up (with or without an immediate session)
//! - Sign-out of the current session
//! - Resolving an access token to its identity

use crate::error::AppError;
use crate::services::auth::{AuthIdentity, AuthSession};
use serde::Deserialize;
use uuid::Uuid;

/// Auth API client.
#[derive(Clone)]
pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteUser {
    fn into_identity(self, fallback_email: &str) -> AuthIdentity {
        AuthIdentity {
            id: self.id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
        }
    }
}

/// Token grant response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: RemoteUser,
}

/// Sign-up answers with a session when auto-confirm is on, or with the
/// bare user object while e-mail confirmation is pending.
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<RemoteUser>,
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    email: Option<String>,
}

/// Error body; the API is not consistent about which key it uses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl GoTrueClient {
    pub fn new(project_url: &str, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/auth/v1", project_url.trim_end_matches('/')),
            api_key,
        }
    }

    /// Sign in with email + password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Sign-in request failed: {}", e)))?;

        let token: TokenResponse = self.check_response_json(response).await?;
        Ok(AuthSession {
            access_token: Some(token.access_token),
            identity: token.user.into_identity(email),
        })
    }

    /// Register a new account.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let response = self
            .http
            .post(format!("{}/signup", self.base_url))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Sign-up request failed: {}", e)))?;

        let body: SignUpResponse = self.check_response_json(response).await?;
        let identity = match (body.user, body.id) {
            (Some(user), _) => user.into_identity(email),
            (None, Some(id)) => AuthIdentity {
                id,
                email: body.email.unwrap_or_else(|| email.to_string()),
            },
            (None, None) => {
                return Err(AppError::Auth("Sign-up response had no user".to_string()))
            }
        };

        Ok(AuthSession {
            access_token: body.access_token,
            identity,
        })
    }

    /// Revoke the session behind `access_token`.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Sign-out request failed: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(self.error_from(response).await)
    }

    /// Identity behind an access token; `None` if the token is not accepted.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<AuthIdentity>, AppError> {
        let response = self
            .http
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("User request failed: {}", e)))?;

        if matches!(response.status().as_u16(), 401 | 403) {
            return Ok(None);
        }

        let user: RemoteUser = self.check_response_json(response).await?;
        Ok(Some(user.into_identity("")))
    }

    async fn error_from(&self, response: reqwest::Response) -> AppError {
        let status = response.status();
        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .error_description
            .or(body.msg)
            .or(body.message)
            .unwrap_or_else(|| format!("HTTP {}", status));
        AppError::Auth(message)
    }

    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("JSON parse error: {}", e)))
    }
}
