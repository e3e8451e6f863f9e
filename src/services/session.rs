// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session layer: sign-in/up/out and the unified user view.
//!
//! Joins the auth identity with its `profiles` row. Failures never escape
//! as panics; they come back as [`SessionError`] values or `None`.

use crate::error::AppError;
use crate::models::{NewProfile, Profile, Role, UserView};
use crate::services::auth::AuthProvider;
use crate::services::data::DataService;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Session-layer failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Sign-up failed: {0}")]
    SignUp(String),

    /// The account was created but its profile row was not.
    #[error("Profile creation failed for {user_id}: {reason}")]
    ProfileCreation { user_id: Uuid, reason: String },

    #[error("Sign-out failed: {0}")]
    SignOut(String),

    /// Credentials were accepted but the profile could not be read.
    #[error("Profile lookup failed for {user_id}: {reason}")]
    ProfileLookup { user_id: Uuid, reason: String },
}

/// What happened to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEventKind {
    SignedIn,
    SignedOut,
}

/// Notification sent to subscribers on every session change.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub kind: SessionEventKind,
    pub user_id: Uuid,
    pub access_token: String,
}

/// Successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: UserView,
    pub access_token: String,
}

/// Successful sign-up. No token while e-mail confirmation is pending.
#[derive(Debug, Clone)]
pub struct SignedUp {
    pub user: UserView,
    pub profile: Profile,
    pub access_token: Option<String>,
}

/// Sign-up form contents.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

/// Session operations over an auth provider and the profiles table.
#[derive(Clone)]
pub struct SessionService {
    auth: AuthProvider,
    data: DataService,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionService {
    pub fn new(auth: AuthProvider, data: DataService) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { auth, data, events }
    }

    /// Sign in and resolve the user view.
    ///
    /// A missing profile makes the user a client named after the submitted
    /// username. An unreadable profile fails the sign-in.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SignedIn, SessionError> {
        let session = self
            .auth
            .sign_in(username, password)
            .await
            .map_err(|e| SessionError::InvalidCredentials(auth_message(e)))?;

        let identity = session.identity;
        let access_token = session.access_token.ok_or_else(|| {
            SessionError::InvalidCredentials("No session returned".to_string())
        })?;

        let profile = self
            .data
            .scoped(&access_token)
            .get_profile(identity.id)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    user_id = %identity.id,
                    "Profile lookup failed at sign-in"
                );
                SessionError::ProfileLookup {
                    user_id: identity.id,
                    reason: e.to_string(),
                }
            })?;

        let user = UserView::from_parts(identity.id, &identity.email, profile.as_ref(), username);
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "Signed in");

        self.publish(SessionEventKind::SignedIn, user.id, &access_token);
        Ok(SignedIn { user, access_token })
    }

    /// Create the auth account, then its profile.
    ///
    /// The two calls are independent: if the profile insert fails the
    /// account stays registered without a profile.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignedUp, SessionError> {
        let session = self
            .auth
            .sign_up(&request.email, &request.password)
            .await
            .map_err(|e| SessionError::SignUp(auth_message(e)))?;

        let identity = session.identity;
        let data = match &session.access_token {
            Some(token) => self.data.scoped(token),
            None => self.data.clone(),
        };

        let new_profile = NewProfile {
            id: identity.id,
            email: request.email.clone(),
            full_name: request.full_name.clone(),
            role: request.role,
        };
        let profile = data.create_profile(&new_profile).await.map_err(|e| {
            tracing::error!(error = %e, user_id = %identity.id, "Account created without profile");
            SessionError::ProfileCreation {
                user_id: identity.id,
                reason: e.to_string(),
            }
        })?;

        let user =
            UserView::from_parts(identity.id, &identity.email, Some(&profile), &request.email);
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "Signed up");

        if let Some(token) = &session.access_token {
            self.publish(SessionEventKind::SignedIn, user.id, token);
        }
        Ok(SignedUp {
            user,
            profile,
            access_token: session.access_token,
        })
    }

    pub async fn sign_out(&self, access_token: &str, user_id: Uuid) -> Result<(), SessionError> {
        self.auth
            .sign_out(access_token)
            .await
            .map_err(|e| SessionError::SignOut(auth_message(e)))?;

        tracing::info!(user_id = %user_id, "Signed out");
        self.publish(SessionEventKind::SignedOut, user_id, access_token);
        Ok(())
    }

    /// User view for a session token, or `None` if there is no valid session.
    ///
    /// Without a profile the role is `client` and the name is the email.
    pub async fn current_user(&self, access_token: &str) -> Option<UserView> {
        resolve_user(&self.auth, &self.data, access_token).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Run `callback` for every session change with the freshly resolved
    /// user view (`None` after sign-out or when the session no longer
    /// resolves). Stops once the service and all its clones are dropped.
    pub fn on_auth_state_change<F>(&self, callback: F) -> JoinHandle<()>
    where
        F: Fn(SessionEventKind, Option<UserView>) + Send + Sync + 'static,
    {
        let mut receiver = self.subscribe();
        let auth = self.auth.clone();
        let data = self.data.clone();

        tokio::spawn(async move {
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session listener lagged");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };

                let user = match event.kind {
                    SessionEventKind::SignedIn => {
                        resolve_user(&auth, &data, &event.access_token).await
                    }
                    SessionEventKind::SignedOut => None,
                };
                callback(event.kind, user);
            }
        })
    }

    fn publish(&self, kind: SessionEventKind, user_id: Uuid, access_token: &str) {
        // No receivers is fine.
        let _ = self.events.send(SessionEvent {
            kind,
            user_id,
            access_token: access_token.to_string(),
        });
    }
}

async fn resolve_user(
    auth: &AuthProvider,
    data: &DataService,
    access_token: &str,
) -> Option<UserView> {
    let identity = match auth.get_user(access_token).await {
        Ok(Some(identity)) => identity,
        Ok(None) => return None,
        Err(e) => {
            tracing::error!(error = %e, "Error getting current user");
            return None;
        }
    };

    match data.scoped(access_token).get_profile(identity.id).await {
        Ok(profile) => Some(UserView::from_parts(
            identity.id,
            &identity.email,
            profile.as_ref(),
            &identity.email,
        )),
        Err(e) => {
            tracing::error!(
                error = %e,
                user_id = %identity.id,
                "Error getting current user profile"
            );
            None
        }
    }
}

fn auth_message(error: AppError) -> String {
    match error {
        AppError::Auth(message) => message,
        other => other.to_string(),
    }
}
