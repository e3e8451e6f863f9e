// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trainer write routes.
//!
//! Every route redirects back to the dashboard. A failed write shows up as
//! unchanged data after the redraw; the data layer has already logged it.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{is_muscle_group, NewExercise, NewNutritionPlan, RelationshipStatus};
use crate::services::{assign_training_plan, renew_membership, PlannedExercise};
use crate::time_utils::today;
use crate::view::ViewAction;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::post,
    Extension, Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Trainer routes. Mounted behind `require_auth` and `require_trainer`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/trainer/clients/{id}/confirm-payment",
            post(confirm_payment),
        )
        .route("/trainer/clients/{id}/status", post(update_status))
        .route("/trainer/memberships/{id}/renew", post(renew))
        .route("/trainer/exercises", post(create_exercise))
        .route("/trainer/plans", post(create_plan))
        .route("/trainer/nutrition", post(create_nutrition))
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
    /// Checkbox: present only when ticked.
    #[serde(default)]
    pub payment_confirmed: Option<String>,
}

fn validate_muscle_group(value: &str) -> std::result::Result<(), ValidationError> {
    if is_muscle_group(value) {
        Ok(())
    } else {
        Err(ValidationError::new("muscle_group"))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExerciseForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom(function = "validate_muscle_group"))]
    pub muscle_group: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NutritionForm {
    pub client_id: Uuid,
    #[validate(range(min = 1, max = 31))]
    pub day_number: u32,
    #[validate(range(max = 20000))]
    pub calories: u32,
    #[validate(range(max = 2000))]
    pub protein: u32,
    #[validate(range(max = 2000))]
    pub carbs: u32,
    #[validate(range(max = 2000))]
    pub fats: u32,
}

/// Plan form as decoded from its repeated `exercise_id`/`sets`/`reps` fields.
#[derive(Debug, PartialEq)]
pub struct PlanForm {
    pub client_id: Uuid,
    pub name: Option<String>,
    pub exercises: Vec<PlannedExercise>,
}

impl PlanForm {
    /// Decode the raw field list. Rows pair up by position.
    pub fn from_fields(fields: &[(String, String)]) -> std::result::Result<Self, String> {
        let mut client_id = None;
        let mut name = None;
        let mut exercise_ids = Vec::new();
        let mut sets = Vec::new();
        let mut reps = Vec::new();

        for (key, value) in fields {
            let value = value.trim();
            match key.as_str() {
                "client_id" => {
                    client_id = Some(
                        Uuid::parse_str(value).map_err(|_| "invalid client_id".to_string())?,
                    )
                }
                "name" if !value.is_empty() => name = Some(value.to_string()),
                "exercise_id" => exercise_ids.push(
                    Uuid::parse_str(value).map_err(|_| "invalid exercise_id".to_string())?,
                ),
                "sets" => sets.push(parse_count(value, "sets")?),
                "reps" => reps.push(parse_count(value, "reps")?),
                _ => {}
            }
        }

        if exercise_ids.len() != sets.len() || exercise_ids.len() != reps.len() {
            return Err("every exercise row needs sets and reps".to_string());
        }

        let exercises = exercise_ids
            .into_iter()
            .zip(sets)
            .zip(reps)
            .map(|((exercise_id, sets), reps)| PlannedExercise {
                exercise_id,
                sets,
                reps,
            })
            .collect();

        Ok(Self {
            client_id: client_id.ok_or_else(|| "missing client_id".to_string())?,
            name,
            exercises,
        })
    }
}

fn parse_count(value: &str, field: &str) -> std::result::Result<u32, String> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} must be a positive number", field)),
    }
}

async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(relationship_id): Path<Uuid>,
) -> Redirect {
    let data = state.data.scoped(&auth.access_token);
    if data
        .update_client_status(relationship_id, RelationshipStatus::Active, true, today())
        .await
        .is_some()
    {
        tracing::info!(
            trainer_id = %auth.user.id,
            relationship_id = %relationship_id,
            "Payment confirmed"
        );
    }
    Redirect::to("/")
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(relationship_id): Path<Uuid>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let status: RelationshipStatus = form.status.parse().map_err(AppError::BadRequest)?;
    let payment_confirmed = form.payment_confirmed.as_deref() == Some("true");

    let data = state.data.scoped(&auth.access_token);
    data.update_client_status(relationship_id, status, payment_confirmed, today())
        .await;
    Ok(Redirect::to("/"))
}

async fn renew(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(membership_id): Path<Uuid>,
) -> Redirect {
    let data = state.data.scoped(&auth.access_token);
    renew_membership(&data, membership_id, today()).await;
    Redirect::to("/")
}

async fn create_exercise(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Form(form): Form<ExerciseForm>,
) -> Result<Redirect> {
    form.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let data = state.data.scoped(&auth.access_token);
    let exercise = NewExercise {
        name: form.name.trim().to_string(),
        muscle_group: form.muscle_group,
        description: form
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        is_public: true,
    };

    if data.create_exercise(&exercise).await.is_some() {
        state.exercises.refresh(&data).await;
        state.views.apply(&auth.user, ViewAction::FormSubmitted);
    }
    Ok(Redirect::to("/"))
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = PlanForm::from_fields(&fields).map_err(AppError::BadRequest)?;

    let data = state.data.scoped(&auth.access_token);
    let outcome =
        assign_training_plan(&data, auth.user.id, form.client_id, form.name, &form.exercises)
            .await;

    if outcome.plan.is_some() {
        state.views.apply(&auth.user, ViewAction::FormSubmitted);
    }
    if !outcome.is_complete() {
        tracing::warn!(
            trainer_id = %auth.user.id,
            client_id = %form.client_id,
            plan_saved = outcome.plan.is_some(),
            day_saved = outcome.day.is_some(),
            exercises_failed = outcome.exercises_failed,
            "Training plan only partly saved"
        );
    }
    Ok(Redirect::to("/"))
}

async fn create_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Form(form): Form<NutritionForm>,
) -> Result<Redirect> {
    form.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let data = state.data.scoped(&auth.access_token);
    let plan = NewNutritionPlan {
        client_id: form.client_id,
        day_number: form.day_number,
        calories: form.calories,
        protein: form.protein,
        carbs: form.carbs,
        fats: form.fats,
        is_active: true,
    };

    if data.create_nutrition_plan(&plan).await.is_some() {
        state.views.apply(&auth.user, ViewAction::FormSubmitted);
    }
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_plan_form_pairs_rows_by_position() {
        let client = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let fields = vec![
            field("client_id", &client.to_string()),
            field("name", "  "),
            field("exercise_id", &a.to_string()),
            field("sets", "3"),
            field("reps", "10"),
            field("exercise_id", &b.to_string()),
            field("sets", "4"),
            field("reps", "8"),
        ];

        let form = PlanForm::from_fields(&fields).unwrap();
        assert_eq!(form.client_id, client);
        assert_eq!(form.name, None);
        assert_eq!(
            form.exercises,
            vec![
                PlannedExercise { exercise_id: a, sets: 3, reps: 10 },
                PlannedExercise { exercise_id: b, sets: 4, reps: 8 },
            ]
        );
    }

    #[test]
    fn test_plan_form_rejects_bad_rows() {
        let client = Uuid::new_v4().to_string();
        let missing_reps = vec![
            field("client_id", &client),
            field("exercise_id", &Uuid::new_v4().to_string()),
            field("sets", "3"),
        ];
        assert!(PlanForm::from_fields(&missing_reps).is_err());

        let zero_sets = vec![
            field("client_id", &client),
            field("exercise_id", &Uuid::new_v4().to_string()),
            field("sets", "0"),
            field("reps", "10"),
        ];
        assert!(PlanForm::from_fields(&zero_sets).is_err());

        assert!(PlanForm::from_fields(&[field("name", "Plan")]).is_err());
    }

    #[test]
    fn test_exercise_form_checks_muscle_group() {
        let form = ExerciseForm {
            name: "Iskorak".to_string(),
            muscle_group: "noge".to_string(),
            description: None,
        };
        assert!(form.validate().is_ok());

        let form = ExerciseForm {
            muscle_group: "vrat".to_string(),
            ..form
        };
        assert!(form.validate().is_err());
    }
}
