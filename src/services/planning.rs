// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Multi-step trainer writes.
//!
//! Each step is its own backend call. Nothing is rolled back: a failure
//! part-way leaves the earlier rows in place and the outcome says how far
//! the write got.

use crate::models::{
    GymMembership, NewTrainingDay, NewTrainingExercise, NewTrainingPlan, TrainingDay,
    TrainingPlan,
};
use crate::services::data::DataService;
use chrono::NaiveDate;
use uuid::Uuid;

/// Name given to the single day a new plan is created with.
pub const FIRST_DAY_NAME: &str = "Dan 1";

/// One exercise row of the plan form.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExercise {
    pub exercise_id: Uuid,
    pub sets: u32,
    pub reps: u32,
}

/// How far a plan assignment got.
#[derive(Debug, Default)]
pub struct PlanAssignment {
    pub plan: Option<TrainingPlan>,
    pub day: Option<TrainingDay>,
    pub exercises_added: usize,
    pub exercises_failed: usize,
}

impl PlanAssignment {
    pub fn is_complete(&self) -> bool {
        self.plan.is_some() && self.day.is_some() && self.exercises_failed == 0
    }
}

/// Create a plan for `client_id`, one day under it, then each exercise.
pub async fn assign_training_plan(
    data: &DataService,
    trainer_id: Uuid,
    client_id: Uuid,
    plan_name: Option<String>,
    exercises: &[PlannedExercise],
) -> PlanAssignment {
    let mut outcome = PlanAssignment::default();

    let Some(plan) = data
        .create_training_plan(&NewTrainingPlan {
            client_id,
            trainer_id,
            name: plan_name,
            is_active: true,
        })
        .await
    else {
        return outcome;
    };

    let day = data
        .create_training_day(&NewTrainingDay {
            plan_id: plan.id,
            name: FIRST_DAY_NAME.to_string(),
        })
        .await;
    outcome.plan = Some(plan);

    let Some(day) = day else {
        tracing::warn!(
            client_id = %client_id,
            "Training plan saved without days"
        );
        return outcome;
    };

    for planned in exercises {
        let added = data
            .add_exercise_to_day(&NewTrainingExercise {
                day_id: day.id,
                exercise_id: planned.exercise_id,
                sets: planned.sets,
                reps: planned.reps,
            })
            .await;
        match added {
            Some(_) => outcome.exercises_added += 1,
            None => outcome.exercises_failed += 1,
        }
    }
    outcome.day = Some(day);

    tracing::info!(
        client_id = %client_id,
        added = outcome.exercises_added,
        failed = outcome.exercises_failed,
        "Training plan assigned"
    );
    outcome
}

/// Insert the membership that continues `membership_id`.
pub async fn renew_membership(
    data: &DataService,
    membership_id: Uuid,
    today: NaiveDate,
) -> Option<GymMembership> {
    let current = data.get_gym_membership(membership_id).await?;
    let renewed = data.create_gym_membership(&current.renewal(today)).await?;

    tracing::info!(
        client_id = %renewed.client_id,
        end_date = %renewed.end_date,
        "Membership renewed"
    );
    Some(renewed)
}
