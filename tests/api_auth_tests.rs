// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without a valid session
//! 2. Protected routes accept a session cookie or a bearer token
//! 3. Trainer routes reject client sessions
//! 4. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use gym_dashboard::models::{Role, UserView};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

mod common;

/// Token signed with the wrong key.
fn create_foreign_jwt() -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        email: String,
        jti: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: uuid::Uuid::new_v4().to_string(),
        email: "petar".to_string(),
        jti: uuid::Uuid::new_v4().to_string(),
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"some-other-key-that-is-not-ours!"),
    )
    .unwrap()
}

#[tokio::test]
async fn test_protected_routes_without_session() {
    let (app, _, _) = common::create_test_app();

    for uri in ["/api/me", "/api/exercises", "/api/charts", "/api/food-log"] {
        let response = app.clone().oneshot(common::get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    for uri in [
        "/client/check-in",
        "/client/food",
        "/trainer/plans",
        "/trainer/exercises",
    ] {
        let response = app
            .clone()
            .oneshot(common::form_post(uri, None, ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _, _) = common::create_test_app();

    for token in ["invalid.token.here".to_string(), create_foreign_jwt()] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/me")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_me_with_cookie_and_bearer() {
    let (app, _, _) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;

    let response = app
        .clone()
        .oneshot(common::get("/api/me", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me: UserView = serde_json::from_str(&common::body_string(response).await).unwrap();
    assert_eq!(me.role, Role::Trainer);
    assert_eq!(me.name, "Petar");

    let token = cookie.trim_start_matches("gym_session=");
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_client_session_on_trainer_routes() {
    let (app, _, _) = common::create_test_app();
    let cookie = common::login(&app, "klijent", "klijent").await;

    for uri in [
        "/trainer/plans",
        "/trainer/nutrition",
        "/trainer/exercises",
        "/trainer/clients/5a1e0000-0000-4000-8000-000000000002/confirm-payment",
    ] {
        let response = app
            .clone()
            .oneshot(common::form_post(uri, Some(&cookie), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/me")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    // Should have CORS headers
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_routes_no_auth_required() {
    let (app, _, _) = common::create_test_app();

    for uri in ["/health", "/", "/assets/app.css", "/assets/charts.js"] {
        let response = app.clone().oneshot(common::get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }

    let response = app.oneshot(common::get("/health", None)).await.unwrap();
    let body = common::body_string(response).await;
    assert!(body.contains(r#""mode":"demo""#));
}
