// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client write routes: measurements, gym visits and the food log.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{NewFoodEntry, NewMeasurement};
use crate::time_utils::today;
use crate::view::ViewAction;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::post,
    Extension, Form, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Client routes. Mounted behind `require_auth`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/client/measurements", post(add_measurement))
        .route("/client/check-in", post(check_in))
        .route("/client/visits/{id}/check-out", post(check_out))
        .route("/client/food", post(add_food))
}

/// Measurement form. Number inputs arrive as text and may be blank.
#[derive(Debug, Default, Deserialize)]
pub struct MeasurementForm {
    #[serde(default)]
    pub measurement_date: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub waist: String,
    #[serde(default)]
    pub chest: String,
    #[serde(default)]
    pub biceps: String,
    #[serde(default)]
    pub thighs: String,
}

impl MeasurementForm {
    /// Row for `client_id`; a blank date means `today`.
    pub fn into_measurement(
        self,
        client_id: Uuid,
        today: NaiveDate,
    ) -> std::result::Result<NewMeasurement, String> {
        let measurement_date = match self.measurement_date.trim() {
            "" => today,
            value => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| format!("invalid date '{}'", value))?,
        };

        let measurement = NewMeasurement {
            client_id,
            measurement_date,
            weight: optional_number(&self.weight, "weight")?,
            waist: optional_number(&self.waist, "waist")?,
            chest: optional_number(&self.chest, "chest")?,
            biceps: optional_number(&self.biceps, "biceps")?,
            thighs: optional_number(&self.thighs, "thighs")?,
        };

        let values = [
            measurement.weight,
            measurement.waist,
            measurement.chest,
            measurement.biceps,
            measurement.thighs,
        ];
        if values.iter().all(Option::is_none) {
            return Err("enter at least one measurement".to_string());
        }
        Ok(measurement)
    }
}

/// Blank is `None`; anything else must be a non-negative number.
fn optional_number(value: &str, field: &str) -> std::result::Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.replace(',', ".").parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
        _ => Err(format!("{} must be a number", field)),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FoodForm {
    #[validate(length(min = 1, max = 200))]
    pub food_name: String,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub protein: String,
    #[serde(default)]
    pub carbs: String,
    #[serde(default)]
    pub fats: String,
}

async fn add_measurement(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Form(form): Form<MeasurementForm>,
) -> Result<Redirect> {
    let measurement = form
        .into_measurement(auth.user.id, today())
        .map_err(AppError::BadRequest)?;

    let data = state.data.scoped(&auth.access_token);
    if data.add_measurement(&measurement).await.is_some() {
        state.views.apply(&auth.user, ViewAction::FormSubmitted);
    }
    Ok(Redirect::to("/"))
}

async fn check_in(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Redirect {
    let data = state.data.scoped(&auth.access_token);
    if let Some(visit) = data.check_in_to_gym(auth.user.id).await {
        tracing::info!(client_id = %auth.user.id, visit_id = %visit.id, "Checked in");
    }
    Redirect::to("/")
}

async fn check_out(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(visit_id): Path<Uuid>,
) -> Redirect {
    let data = state.data.scoped(&auth.access_token);
    match data.check_out_of_gym(visit_id, auth.user.id).await {
        Some(visit) => tracing::info!(
            client_id = %auth.user.id,
            minutes = visit.duration_minutes(),
            "Checked out"
        ),
        None => tracing::warn!(
            client_id = %auth.user.id,
            visit_id = %visit_id,
            "No open visit to check out"
        ),
    }
    Redirect::to("/")
}

async fn add_food(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Form(form): Form<FoodForm>,
) -> Result<Redirect> {
    form.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let entry = NewFoodEntry {
        client_id: auth.user.id,
        meal_time: Utc::now(),
        food_name: form.food_name.trim().to_string(),
        calories: optional_number(&form.calories, "calories").map_err(AppError::BadRequest)?,
        protein: optional_number(&form.protein, "protein").map_err(AppError::BadRequest)?,
        carbs: optional_number(&form.carbs, "carbs").map_err(AppError::BadRequest)?,
        fats: optional_number(&form.fats, "fats").map_err(AppError::BadRequest)?,
    };

    let data = state.data.scoped(&auth.access_token);
    data.add_food_entry(&entry).await;
    Ok(Redirect::to("/"))
}
