// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in, sign-up and sign-out routes.

use crate::config::Config;
use crate::middleware::auth::{session_token, SESSION_COOKIE};
use crate::models::Role;
use crate::services::{SessionError, SignUpRequest};
use crate::view::render::{self, LoginPrompt};
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::post,
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Auth routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpForm {
    #[validate(email(message = "Neispravna e-mail adresa"))]
    pub email: String,
    #[validate(length(min = 6, message = "Lozinka mora imati najmanje 6 karaktera"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Unesite ime i prezime"))]
    pub full_name: String,
    #[serde(default)]
    pub role: Option<String>,
}

fn session_cookie(config: &Config, access_token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, access_token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies())
        .build()
}

/// Home page with the login overlay open and an alert.
fn home_with_alert(status: StatusCode, error: Option<String>, notice: Option<String>) -> Response {
    let prompt = LoginPrompt {
        open: true,
        error,
        notice,
    };
    (status, Html(render::page("FitZona", &render::home(&prompt), None))).into_response()
}

/// What the user is told about a failed session call.
fn reason(error: &SessionError) -> String {
    match error {
        SessionError::InvalidCredentials(message)
        | SessionError::SignUp(message)
        | SessionError::SignOut(message) => message.clone(),
        SessionError::ProfileCreation { reason, .. }
        | SessionError::ProfileLookup { reason, .. } => reason.clone(),
    }
}

/// Sign in and land on the role's dashboard.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.sessions.sign_in(form.username.trim(), &form.password).await {
        Ok(signed_in) => {
            state.views.enter(&signed_in.user);
            let jar = jar.add(session_cookie(&state.config, signed_in.access_token));
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login rejected");
            let status = match e {
                SessionError::ProfileLookup { .. } => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::UNAUTHORIZED,
            };
            home_with_alert(
                status,
                Some(format!("Greška pri prijavi: {}", reason(&e))),
                None,
            )
        }
    }
}

/// Register an account and its profile.
async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SignUpForm>,
) -> Response {
    if let Err(e) = form.validate() {
        return home_with_alert(
            StatusCode::BAD_REQUEST,
            Some(format!("Greška pri registraciji: {}", e)),
            None,
        );
    }

    let role = match form.role.as_deref() {
        None | Some("") => Role::Client,
        Some(value) => match value.parse() {
            Ok(role) => role,
            Err(e) => {
                return home_with_alert(
                    StatusCode::BAD_REQUEST,
                    Some(format!("Greška pri registraciji: {}", e)),
                    None,
                )
            }
        },
    };

    let request = SignUpRequest {
        email: form.email.trim().to_string(),
        password: form.password,
        full_name: form.full_name.trim().to_string(),
        role,
    };

    match state.sessions.sign_up(&request).await {
        Ok(signed_up) => match signed_up.access_token {
            Some(access_token) => {
                state.views.enter(&signed_up.user);
                let jar = jar.add(session_cookie(&state.config, access_token));
                (jar, Redirect::to("/")).into_response()
            }
            None => home_with_alert(
                StatusCode::OK,
                None,
                Some("Nalog je kreiran. Potvrdite e-mail adresu pa se prijavite.".to_string()),
            ),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Sign-up failed");
            home_with_alert(
                StatusCode::BAD_REQUEST,
                Some(format!("Greška pri registraciji: {}", reason(&e))),
                None,
            )
        }
    }
}

/// Sign out, drop the view state and clear the cookie.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(access_token) = session_token(&jar, &headers) {
        if let Some(user) = state.sessions.current_user(&access_token).await {
            if let Err(e) = state.sessions.sign_out(&access_token, user.id).await {
                tracing::warn!(error = %e, "Sign-out failed, clearing session anyway");
            }
            state.views.remove(user.id);
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_form_validation() {
        let form = SignUpForm {
            email: "nije-email".to_string(),
            password: "123".to_string(),
            full_name: "Ana".to_string(),
            role: None,
        };
        let errors = form.validate().unwrap_err().to_string();
        assert!(errors.contains("Neispravna e-mail adresa"));
        assert!(errors.contains("najmanje 6 karaktera"));

        let form = SignUpForm {
            email: "ana@teretana.rs".to_string(),
            password: "lozinka123".to_string(),
            full_name: "Ana".to_string(),
            role: Some("client".to_string()),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_session_cookie_flags() {
        let mut config = Config::test_default();
        let cookie = session_cookie(&config, "token".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));

        config.public_url = "https://gym.example.com".to_string();
        assert_eq!(session_cookie(&config, "token".to_string()).secure(), Some(true));
    }
}
