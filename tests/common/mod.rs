// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use gym_dashboard::config::Config;
use gym_dashboard::db::{Backend, FixtureStore};
use gym_dashboard::routes::create_router;
use gym_dashboard::services::{AuthProvider, FixtureAuth};
use gym_dashboard::time_utils::today;
use gym_dashboard::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over the demo gym.
/// Returns the router, the shared state and the store behind it.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>, FixtureStore) {
    create_test_app_with_store(FixtureStore::demo(today()))
}

/// Create a test app over `store` with the demo accounts.
#[allow(dead_code)]
pub fn create_test_app_with_store(store: FixtureStore) -> (Router, Arc<AppState>, FixtureStore) {
    let config = Config::test_default();
    let auth = AuthProvider::Fixture(FixtureAuth::demo(&config.demo_signing_key));
    let state = Arc::new(AppState::with_backends(
        config,
        Backend::Fixture(store.clone()),
        auth,
    ));
    (create_router(state.clone()), state, store)
}

/// Form-encoded POST, optionally with a session cookie.
#[allow(dead_code)]
pub fn form_post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// GET, optionally with a session cookie.
#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// `gym_session=...` pair from a login response, ready for a Cookie header.
#[allow(dead_code)]
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("gym_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Sign in through the login form and return the session cookie.
#[allow(dead_code)]
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_post(
            "/auth/login",
            None,
            &format!("username={}&password={}", username, password),
        ))
        .await
        .unwrap();
    session_cookie(&response).expect("login should set the session cookie")
}

/// Read the whole response body as text.
#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Render the dashboard for `cookie` and return its HTML.
#[allow(dead_code)]
pub async fn dashboard(app: &Router, cookie: &str) -> String {
    let response = app.clone().oneshot(get("/", Some(cookie))).await.unwrap();
    body_string(response).await
}
