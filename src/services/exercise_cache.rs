// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide cache of the public exercise catalogue.
//!
//! Filled on first use and refreshed after the trainer adds an exercise.
//! Writes by other processes are not seen until the next refresh.

use crate::models::Exercise;
use crate::services::data::DataService;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct ExerciseCache {
    inner: Arc<RwLock<Option<Vec<Exercise>>>>,
}

impl ExerciseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload from the backend. An empty result (including a failed fetch)
    /// is not cached, so the next read tries again.
    pub async fn refresh(&self, data: &DataService) -> Vec<Exercise> {
        let exercises = data.get_exercises().await;
        tracing::debug!(count = exercises.len(), "Exercise cache refreshed");
        *self.inner.write().await = (!exercises.is_empty()).then(|| exercises.clone());
        exercises
    }

    /// Cached catalogue, loading it on first use.
    pub async fn all(&self, data: &DataService) -> Vec<Exercise> {
        if let Some(exercises) = self.inner.read().await.as_ref() {
            return exercises.clone();
        }
        self.refresh(data).await
    }

    pub async fn by_muscle_group(&self, data: &DataService, muscle_group: &str) -> Vec<Exercise> {
        self.all(data)
            .await
            .into_iter()
            .filter(|exercise| exercise.muscle_group == muscle_group)
            .collect()
    }

}
