// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{is_muscle_group, Exercise, FoodLogEntry, Role, UserView};
use crate::time_utils::today;
use crate::view::{ClientCharts, ClientData};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// API routes (require a session).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/exercises", get(get_exercises))
        .route("/api/charts", get(get_charts))
        .route("/api/food-log", get(get_food_log))
}

// ─── User ────────────────────────────────────────────────────

async fn get_me(Extension(auth): Extension<AuthUser>) -> Json<UserView> {
    Json(auth.user)
}

// ─── Exercises ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExercisesQuery {
    pub muscle_group: Option<String>,
}

#[derive(Serialize)]
pub struct ExercisesResponse {
    pub exercises: Vec<Exercise>,
    pub total: usize,
}

/// Exercise catalogue, optionally narrowed to one muscle group.
async fn get_exercises(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ExercisesQuery>,
) -> Result<Json<ExercisesResponse>> {
    let data = state.data.scoped(&auth.access_token);
    let exercises = match query.muscle_group.as_deref().filter(|g| !g.is_empty()) {
        Some(group) if !is_muscle_group(group) => {
            return Err(AppError::BadRequest(format!("unknown muscle group '{}'", group)))
        }
        Some(group) => state.exercises.by_muscle_group(&data, group).await,
        None => state.exercises.all(&data).await,
    };

    Ok(Json(ExercisesResponse {
        total: exercises.len(),
        exercises,
    }))
}

// ─── Charts ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChartsQuery {
    pub client_id: Option<Uuid>,
}

/// Statistics charts of the caller, or of one of a trainer's clients.
async fn get_charts(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ChartsQuery>,
) -> Result<Json<ClientCharts>> {
    let data = state.data.scoped(&auth.access_token);

    let client_id = match auth.user.role {
        Role::Client => auth.user.id,
        Role::Trainer => {
            let client_id = query
                .client_id
                .ok_or_else(|| AppError::BadRequest("client_id is required".to_string()))?;
            let clients = data.get_trainer_clients(auth.user.id).await;
            if !clients.iter().any(|c| c.client_id == client_id) {
                return Err(AppError::NotFound(format!("Client {} not found", client_id)));
            }
            client_id
        }
    };

    let nutrition_day = state
        .views
        .get(auth.user.id)
        .map(|view| view.nutrition_day)
        .unwrap_or_default();

    let client = ClientData {
        nutrition: data.get_client_nutrition_plan(client_id).await,
        measurements: data.get_client_measurements(client_id).await,
        visits: data.get_gym_visits(client_id).await,
        ..ClientData::default()
    };
    Ok(Json(client.charts(nutrition_day)))
}

// ─── Food log ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FoodLogQuery {
    /// `YYYY-MM-DD`; defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct FoodLogResponse {
    pub date: NaiveDate,
    pub entries: Vec<FoodLogEntry>,
    pub total_calories: f64,
}

/// Caller's food log for one day.
async fn get_food_log(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<FoodLogQuery>,
) -> Json<FoodLogResponse> {
    let date = query.date.unwrap_or_else(today);
    let data = state.data.scoped(&auth.access_token);
    let entries = data.get_food_log(auth.user.id, date).await;
    let total_calories = entries.iter().filter_map(|e| e.calories).sum();

    Json(FoodLogResponse {
        date,
        entries,
        total_calories,
    })
}
