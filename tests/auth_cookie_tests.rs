// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in, sign-up and sign-out flows through the HTTP routes.
//!
//! These tests verify the session cookie attributes, the dashboard each
//! demo account lands on and the alerts shown for rejected attempts.

use axum::{
    http::{header, StatusCode},
    response::Response,
};
use gym_dashboard::db::fixture::PETAR_ID;
use gym_dashboard::db::{tables, Operation};
use tower::ServiceExt;

mod common;

fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

#[tokio::test]
async fn test_demo_trainer_login_lands_on_clients() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::form_post(
            "/auth/login",
            None,
            "username=petar&password=petar",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let session = find_cookie(&set_cookie_headers(&response), "gym_session");
    assert!(session.contains("Path=/"));
    assert!(session.contains("HttpOnly"));
    assert!(session.contains("SameSite=Lax"));
    assert!(!session.contains("Secure"));

    let cookie = common::session_cookie(&response).unwrap();
    let html = common::dashboard(&app, &cookie).await;
    assert!(html.contains(r#"id="trainerDashboard""#));
    assert!(html.contains(r#"id="trainerClients" class="dashboard-section active""#));
    assert!(html.contains("<title>FitZona - Trener</title>"));
    assert!(html.contains("Ana Jovanović"));
}

#[tokio::test]
async fn test_demo_client_login_lands_on_training() {
    let (app, _, _) = common::create_test_app();
    let cookie = common::login(&app, "klijent", "klijent").await;

    let html = common::dashboard(&app, &cookie).await;
    assert!(html.contains(r#"id="clientDashboard""#));
    assert!(html.contains(r#"id="clientTraining" class="dashboard-section active""#));
    assert!(html.contains("Program snage"));
    assert!(!html.contains(r#"id="trainerDashboard""#));
}

#[tokio::test]
async fn test_login_rejected_shows_alert() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(common::form_post(
            "/auth/login",
            None,
            "username=petar&password=pogresna",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(common::session_cookie(&response).is_none());

    let html = common::body_string(response).await;
    assert!(html.contains(r#"id="loginOverlay""#));
    assert!(html.contains("Greška pri prijavi: Invalid login credentials"));
}

#[tokio::test]
async fn test_login_fails_while_profiles_unreadable() {
    let (app, state, store) = common::create_test_app();
    store.fail(tables::PROFILES, Operation::Select);

    let response = app
        .clone()
        .oneshot(common::form_post(
            "/auth/login",
            None,
            "username=petar&password=petar",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(common::session_cookie(&response).is_none());
    assert!(state.views.get(PETAR_ID).is_none());
    let html = common::body_string(response).await;
    assert!(html.contains("Greška pri prijavi:"));

    store.heal(tables::PROFILES, Operation::Select);
    let cookie = common::login(&app, "petar", "petar").await;
    let html = common::dashboard(&app, &cookie).await;
    assert!(html.contains(r#"id="trainerClients" class="dashboard-section active""#));
}

#[tokio::test]
async fn test_logout_clears_cookie_and_session() {
    let (app, state, _) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;
    assert!(state.views.get(PETAR_ID).is_some());

    let response = app
        .clone()
        .oneshot(common::form_post("/auth/logout", Some(&cookie), ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let removal = find_cookie(&set_cookie_headers(&response), "gym_session");
    assert!(removal.contains("Path=/"));
    assert!(removal.contains("Max-Age=0"));
    assert!(state.views.get(PETAR_ID).is_none());

    // The old token no longer opens a dashboard.
    let html = common::dashboard(&app, &cookie).await;
    assert!(html.contains(r#"id="home""#));
    assert!(!html.contains(r#"id="trainerDashboard""#));
}

#[tokio::test]
async fn test_logout_without_session_still_redirects() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(common::form_post("/auth/logout", None, ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_signup_creates_client_profile() {
    let (app, _, store) = common::create_test_app();
    let profiles_before = store.count("profiles");

    let response = app
        .clone()
        .oneshot(common::form_post(
            "/auth/signup",
            None,
            "full_name=Milica+Markovi%C4%87&email=milica%40teretana.rs&password=lozinka1&role=client",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.count("profiles"), profiles_before + 1);

    let cookie = common::session_cookie(&response).unwrap();
    let html = common::dashboard(&app, &cookie).await;
    assert!(html.contains(r#"id="clientDashboard""#));
    assert!(html.contains("Milica Marković"));

    // Same address again is refused.
    let response = app
        .oneshot(common::form_post(
            "/auth/signup",
            None,
            "full_name=Milica&email=milica%40teretana.rs&password=lozinka1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = common::body_string(response).await;
    assert!(html.contains("Greška pri registraciji: User already registered"));
}

#[tokio::test]
async fn test_signup_validation() {
    let (app, _, store) = common::create_test_app();
    let profiles_before = store.count("profiles");

    let response = app
        .oneshot(common::form_post(
            "/auth/signup",
            None,
            "full_name=Ana&email=nije-adresa&password=123",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = common::body_string(response).await;
    assert!(html.contains("Greška pri registraciji"));
    assert!(html.contains("Neispravna e-mail adresa"));
    assert_eq!(store.count("profiles"), profiles_before);
}
