// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trainer write routes against the demo gym.

use axum::http::StatusCode;
use gym_dashboard::db::{fixture::PETAR_ID, tables, Operation};
use gym_dashboard::models::{RelationshipStatus, TrainerClientRelationship};
use gym_dashboard::time_utils::today;
use gym_dashboard::AppState;
use tower::ServiceExt;

mod common;

async fn relationship(state: &AppState, name: &str) -> TrainerClientRelationship {
    state
        .data
        .get_trainer_clients(PETAR_ID)
        .await
        .into_iter()
        .find(|r| r.client.as_ref().and_then(|p| p.full_name.as_deref()) == Some(name))
        .unwrap_or_else(|| panic!("no demo client named {name}"))
}

async fn post(app: &axum::Router, cookie: &str, uri: &str, body: &str) -> StatusCode {
    app.clone()
        .oneshot(common::form_post(uri, Some(cookie), body))
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_confirm_payment_activates_client() {
    let (app, state, _) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;

    let ana = relationship(&state, "Ana Jovanović").await;
    assert_eq!(ana.status, RelationshipStatus::WaitingPayment);

    let status = post(
        &app,
        &cookie,
        &format!("/trainer/clients/{}/confirm-payment", ana.id),
        "",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let ana = relationship(&state, "Ana Jovanović").await;
    assert_eq!(ana.status, RelationshipStatus::Active);
    assert!(ana.payment_confirmed);
    assert_eq!(ana.membership_start, Some(today()));
}

#[tokio::test]
async fn test_status_update() {
    let (app, state, _) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;
    let nikola = relationship(&state, "Nikola Nikolić").await;
    let uri = format!("/trainer/clients/{}/status", nikola.id);

    assert_eq!(
        post(&app, &cookie, &uri, "status=inactive").await,
        StatusCode::SEE_OTHER
    );
    let nikola = relationship(&state, "Nikola Nikolić").await;
    assert_eq!(nikola.status, RelationshipStatus::Inactive);
    assert!(!nikola.payment_confirmed);
    assert_eq!(nikola.membership_start, None);

    assert_eq!(
        post(&app, &cookie, &uri, "status=on_hold").await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_plan_with_failed_day_keeps_plan_without_days() {
    let (app, state, store) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;
    let stefan = relationship(&state, "Stefan Ilić").await;
    let exercise = state.data.get_exercises().await.remove(0);

    let plans = store.count(tables::TRAINING_PLANS);
    let days = store.count(tables::TRAINING_DAYS);
    let rows = store.count(tables::TRAINING_EXERCISES);

    store.fail(tables::TRAINING_DAYS, Operation::Insert);
    let status = post(
        &app,
        &cookie,
        "/trainer/plans",
        &format!(
            "client_id={}&name=Novi+plan&exercise_id={}&sets=3&reps=10",
            stefan.client_id, exercise.id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    assert_eq!(store.count(tables::TRAINING_PLANS), plans + 1);
    assert_eq!(store.count(tables::TRAINING_DAYS), days);
    assert_eq!(store.count(tables::TRAINING_EXERCISES), rows);

    let plan = state
        .data
        .get_client_training_plan(stefan.client_id)
        .await
        .expect("plan row stays");
    assert_eq!(plan.name.as_deref(), Some("Novi plan"));
    assert!(plan.training_days.is_empty());
}

#[tokio::test]
async fn test_plan_assignment() {
    let (app, state, store) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;
    let nikola = relationship(&state, "Nikola Nikolić").await;
    let exercises = state.data.get_exercises().await;

    let rows = store.count(tables::TRAINING_EXERCISES);
    let body = format!(
        "client_id={}&name=&exercise_id={}&sets=4&reps=8&exercise_id={}&sets=3&reps=12",
        nikola.client_id, exercises[0].id, exercises[1].id
    );
    assert_eq!(
        post(&app, &cookie, "/trainer/plans", &body).await,
        StatusCode::SEE_OTHER
    );
    assert_eq!(store.count(tables::TRAINING_EXERCISES), rows + 2);

    let plan = state
        .data
        .get_client_training_plan(nikola.client_id)
        .await
        .unwrap();
    assert_eq!(plan.name, None);
    assert_eq!(plan.training_days.len(), 1);
    assert_eq!(plan.training_days[0].name, "Dan 1");
    assert_eq!(plan.training_days[0].training_exercises.len(), 2);

    let missing_reps = format!(
        "client_id={}&exercise_id={}&sets=4",
        nikola.client_id, exercises[0].id
    );
    assert_eq!(
        post(&app, &cookie, "/trainer/plans", &missing_reps).await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_create_exercise_refreshes_catalogue() {
    let (app, _, store) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;

    // Warm the cache first.
    let response = app
        .clone()
        .oneshot(common::get("/api/exercises?muscle_group=noge", Some(&cookie)))
        .await
        .unwrap();
    let before = common::body_string(response).await;
    assert!(!before.contains("Iskorak"));

    let exercises = store.count(tables::EXERCISES);
    let status = post(
        &app,
        &cookie,
        "/trainer/exercises",
        "name=Iskorak&muscle_group=noge&description=",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(store.count(tables::EXERCISES), exercises + 1);

    let response = app
        .clone()
        .oneshot(common::get("/api/exercises?muscle_group=noge", Some(&cookie)))
        .await
        .unwrap();
    assert!(common::body_string(response).await.contains("Iskorak"));

    assert_eq!(
        post(
            &app,
            &cookie,
            "/trainer/exercises",
            "name=Vrat&muscle_group=vrat"
        )
        .await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(store.count(tables::EXERCISES), exercises + 1);
}

#[tokio::test]
async fn test_create_nutrition_plan() {
    let (app, state, store) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;
    let ana = relationship(&state, "Ana Jovanović").await;

    let plans = store.count(tables::NUTRITION_PLANS);
    let body = format!(
        "client_id={}&day_number=1&calories=2100&protein=150&carbs=200&fats=60",
        ana.client_id
    );
    assert_eq!(
        post(&app, &cookie, "/trainer/nutrition", &body).await,
        StatusCode::SEE_OTHER
    );
    assert_eq!(store.count(tables::NUTRITION_PLANS), plans + 1);

    let days = state.data.get_client_nutrition_plan(ana.client_id).await;
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].calories, 2100);

    let bad_day = format!(
        "client_id={}&day_number=0&calories=2100&protein=150&carbs=200&fats=60",
        ana.client_id
    );
    assert_eq!(
        post(&app, &cookie, "/trainer/nutrition", &bad_day).await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_renew_membership() {
    let (app, state, store) = common::create_test_app();
    let cookie = common::login(&app, "petar", "petar").await;

    let expired = state
        .data
        .get_all_gym_members()
        .await
        .into_iter()
        .find(|m| m.days_left(today()) < 0)
        .expect("demo gym has an expired membership");

    let memberships = store.count(tables::GYM_MEMBERSHIPS);
    let status = post(
        &app,
        &cookie,
        &format!("/trainer/memberships/{}/renew", expired.id),
        "",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(store.count(tables::GYM_MEMBERSHIPS), memberships + 1);

    let renewed = state
        .data
        .get_gym_memberships(expired.client_id)
        .await
        .into_iter()
        .find(|m| m.start_date == today())
        .expect("renewal starts today");
    assert_eq!(renewed.membership_type, expired.membership_type);
}
