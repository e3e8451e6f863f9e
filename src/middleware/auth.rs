// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication middleware.

use crate::models::UserView;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "gym_session";

/// Authenticated user resolved from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserView,
    pub access_token: String,
}

/// Session token from the cookie, falling back to a bearer header.
pub fn session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Middleware that requires a valid session.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let access_token =
        session_token(&jar, request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let user = state
        .sessions
        .current_user(&access_token)
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(AuthUser { user, access_token });

    Ok(next.run(request).await)
}

/// Middleware that rejects non-trainer sessions. Runs after `require_auth`.
pub async fn require_trainer(request: Request, next: Next) -> Result<Response, StatusCode> {
    let is_trainer = request
        .extensions()
        .get::<AuthUser>()
        .map(|auth| auth.user.is_trainer())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !is_trainer {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
