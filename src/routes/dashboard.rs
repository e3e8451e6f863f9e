// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page routes: the home page, both dashboards and view actions.

use crate::error::AppError;
use crate::middleware::auth::{session_token, AuthUser};
use crate::models::{Role, UserView};
use crate::time_utils::today;
use crate::view::render::{self, LoginPrompt};
use crate::view::state::{ClientSection, Section};
use crate::view::{load_client_data, load_trainer_data, UiForm};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

/// Page routes. Both work with or without a session.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/ui", post(ui_action))
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Any value opens the login overlay.
    #[serde(default)]
    pub login: Option<String>,
}

/// Signed-in user of this request, if the session is still valid.
async fn current_session(
    state: &AppState,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Option<AuthUser> {
    let access_token = session_token(jar, headers)?;
    let user = state.sessions.current_user(&access_token).await?;
    Some(AuthUser { user, access_token })
}

/// Dashboard of a signed-in user, or the home page for guests.
async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    match current_session(&state, &jar, &headers).await {
        Some(auth) => Html(render_dashboard(&state, &auth.user, &auth.access_token).await),
        None => {
            let prompt = LoginPrompt {
                open: query.login.is_some(),
                ..LoginPrompt::default()
            };
            Html(render::page("FitZona", &render::home(&prompt), None))
        }
    }
}

/// Load and render the dashboard for `user`'s current view.
pub async fn render_dashboard(state: &AppState, user: &UserView, access_token: &str) -> String {
    let view = state.views.ensure(user);
    let data = state.data.scoped(access_token);
    let today = today();

    match user.role {
        Role::Trainer => {
            let trainer =
                load_trainer_data(&data, &state.exercises, user.id, view.selected_client).await;
            let body = render::trainer_dashboard(user, &view, &trainer, today);
            render::page("FitZona - Trener", &body, None)
        }
        Role::Client => {
            let client = load_client_data(&data, user.id, today).await;
            let body = render::client_dashboard(user, &view, &client, today);
            let charts = (view.section() == Some(Section::Client(ClientSection::Stats)))
                .then(|| client.charts(view.nutrition_day).to_script_json());
            render::page("FitZona - Klijent", &body, charts.as_deref())
        }
    }
}

/// Apply a view action and redraw.
async fn ui_action(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<UiForm>,
) -> Result<Response, AppError> {
    let Some(auth) = current_session(&state, &jar, &headers).await else {
        let target = if form.action == "open_login" {
            "/?login=open"
        } else {
            "/"
        };
        return Ok(Redirect::to(target).into_response());
    };

    let action = form
        .into_action(auth.user.role)
        .map_err(AppError::BadRequest)?;
    tracing::debug!(user_id = %auth.user.id, ?action, "View action");
    state.views.apply(&auth.user, action);

    Ok(Redirect::to("/").into_response())
}
