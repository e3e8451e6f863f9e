// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training plan → day → exercise hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Exercise;

/// Row in `training_plans` with its days embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub id: Uuid,
    pub client_id: Uuid,
    #[serde(default)]
    pub trainer_id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub training_days: Vec<TrainingDay>,
}

impl TrainingPlan {
    /// Day at `index`, clamped to the first day.
    pub fn day(&self, index: usize) -> Option<&TrainingDay> {
        self.training_days
            .get(index)
            .or_else(|| self.training_days.first())
    }
}

/// Row in `training_days` with its exercises embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub training_exercises: Vec<TrainingExercise>,
}

/// Row in `training_exercises` with the catalogue exercise embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExercise {
    pub id: Uuid,
    pub day_id: Uuid,
    pub exercise_id: Uuid,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub exercise: Option<Exercise>,
}

/// Insert payload for `training_plans`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTrainingPlan {
    pub client_id: Uuid,
    pub trainer_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_active: bool,
}

/// Insert payload for `training_days`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTrainingDay {
    pub plan_id: Uuid,
    pub name: String,
}

/// Insert payload for `training_exercises`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTrainingExercise {
    pub day_id: Uuid,
    pub exercise_id: Uuid,
    pub sets: u32,
    pub reps: u32,
}
