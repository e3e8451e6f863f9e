// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data-access operations, one per entity query.
//!
//! Each operation issues exactly one backend call. Failures are logged and
//! collapse to an empty list or `None`; callers cannot tell "no data" from
//! "fetch failed". No retries, batching or transactions.

use crate::db::{tables, Backend, Embed, Filter, Query};
use crate::error::AppError;
use crate::models::{
    Exercise, FoodLogEntry, GymMembership, GymVisit, Measurement, NewExercise, NewFoodEntry,
    NewGymMembership, NewGymVisit, NewMeasurement, NewNutritionPlan, NewProfile, NewTrainingDay,
    NewTrainingExercise, NewTrainingPlan, NutritionPlan, Profile, RelationshipStatus,
    StatusUpdate, TrainerClientRelationship, TrainingDay, TrainingExercise, TrainingPlan,
};
use crate::time_utils::{day_bounds, format_utc_rfc3339};
use chrono::{NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Number of visits shown in the visit history.
pub const RECENT_VISITS_LIMIT: usize = 10;

/// Data-access layer over the configured backend.
#[derive(Clone)]
pub struct DataService {
    backend: Backend,
}

impl DataService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Copy acting as the signed-in user (row-level security).
    pub fn scoped(&self, access_token: &str) -> Self {
        Self {
            backend: self.backend.scoped(access_token),
        }
    }

    // ─── Helpers ─────────────────────────────────────────────────

    async fn fetch_list<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, AppError> {
        let rows = self.backend.select(query).await?;
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| {
                    AppError::Backend(format!("Unexpected row in {}: {}", query.table, e))
                })
            })
            .collect()
    }

    async fn list<T: DeserializeOwned>(&self, query: Query, context: &str) -> Vec<T> {
        match self.fetch_list(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, table = %query.table, "Error fetching {}", context);
                Vec::new()
            }
        }
    }

    async fn one<T: DeserializeOwned>(&self, query: Query, context: &str) -> Option<T> {
        self.list(query.limit(1), context).await.into_iter().next()
    }

    async fn insert_row<N: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        record: &N,
    ) -> Result<T, AppError> {
        let row = serde_json::to_value(record)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialize failed: {}", e)))?;
        let stored = self.backend.insert(table, &row).await?;
        serde_json::from_value(stored)
            .map_err(|e| AppError::Backend(format!("Unexpected row in {}: {}", table, e)))
    }

    async fn insert<N: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        record: &N,
        context: &str,
    ) -> Option<T> {
        match self.insert_row(table, record).await {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::error!(error = %e, table, "Error {}", context);
                None
            }
        }
    }

    async fn update_by_id<P: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        id: Uuid,
        patch: &P,
        context: &str,
    ) -> Option<T> {
        self.update_where(table, id, Vec::new(), patch, context).await
    }

    /// Update row `id` only if it also matches `conditions`.
    async fn update_where<P: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        id: Uuid,
        conditions: Vec<Filter>,
        patch: &P,
        context: &str,
    ) -> Option<T> {
        let mut filters = vec![Filter::eq("id", id.to_string())];
        filters.extend(conditions);

        let result: Result<T, AppError> = async {
            let patch = serde_json::to_value(patch)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialize failed: {}", e)))?;
            let rows = self.backend.update(table, &filters, &patch).await?;
            let row = rows
                .into_iter()
                .next()
                .ok_or_else(|| AppError::NotFound(format!("{} {}", table, id)))?;
            serde_json::from_value(row)
                .map_err(|e| AppError::Backend(format!("Unexpected row in {}: {}", table, e)))
        }
        .await;

        match result {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::error!(error = %e, table, %id, "Error {}", context);
                None
            }
        }
    }

    // ─── Profiles (session layer) ────────────────────────────────

    /// Profile for an auth identity, if one exists.
    pub async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let query = Query::from(tables::PROFILES)
            .eq("id", id.to_string())
            .limit(1);
        Ok(self.fetch_list(&query).await?.into_iter().next())
    }

    pub async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, AppError> {
        self.insert_row(tables::PROFILES, profile).await
    }

    // ─── Trainer ↔ Client ────────────────────────────────────────

    /// All relationships of a trainer with the client profile embedded.
    pub async fn get_trainer_clients(&self, trainer_id: Uuid) -> Vec<TrainerClientRelationship> {
        let query = Query::from(tables::TRAINER_CLIENTS)
            .embed(
                Embed::to_one("client", tables::PROFILES, "client_id")
                    .hint("trainer_clients_client_id_fkey"),
            )
            .eq("trainer_id", trainer_id.to_string());
        self.list(query, "clients").await
    }

    /// Caller-driven status change; starts the membership when activating.
    pub async fn update_client_status(
        &self,
        relationship_id: Uuid,
        status: RelationshipStatus,
        payment_confirmed: bool,
        today: NaiveDate,
    ) -> Option<TrainerClientRelationship> {
        let patch = StatusUpdate::new(status, payment_confirmed, today);
        self.update_by_id(
            tables::TRAINER_CLIENTS,
            relationship_id,
            &patch,
            "updating client status",
        )
        .await
    }

    // ─── Exercises ───────────────────────────────────────────────

    pub async fn get_exercises(&self) -> Vec<Exercise> {
        let query = Query::from(tables::EXERCISES)
            .eq("is_public", true)
            .order("muscle_group", true);
        self.list(query, "exercises").await
    }

    pub async fn get_exercises_by_muscle_group(&self, muscle_group: &str) -> Vec<Exercise> {
        let query = Query::from(tables::EXERCISES)
            .eq("muscle_group", muscle_group)
            .eq("is_public", true);
        self.list(query, "exercises").await
    }

    pub async fn create_exercise(&self, exercise: &NewExercise) -> Option<Exercise> {
        self.insert(tables::EXERCISES, exercise, "creating exercise")
            .await
    }

    // ─── Training Plans ──────────────────────────────────────────

    /// Newest active plan of a client with days, exercises and catalogue rows.
    pub async fn get_client_training_plan(&self, client_id: Uuid) -> Option<TrainingPlan> {
        let query = Query::from(tables::TRAINING_PLANS)
            .embed(
                Embed::to_many(tables::TRAINING_DAYS, "plan_id").with(
                    Embed::to_many(tables::TRAINING_EXERCISES, "day_id")
                        .with(Embed::to_one("exercise", tables::EXERCISES, "exercise_id")),
                ),
            )
            .eq("client_id", client_id.to_string())
            .eq("is_active", true)
            .order("created_at", false);
        self.one(query, "training plan").await
    }

    pub async fn create_training_plan(&self, plan: &NewTrainingPlan) -> Option<TrainingPlan> {
        self.insert(tables::TRAINING_PLANS, plan, "creating training plan")
            .await
    }

    pub async fn create_training_day(&self, day: &NewTrainingDay) -> Option<TrainingDay> {
        self.insert(tables::TRAINING_DAYS, day, "creating training day")
            .await
    }

    pub async fn add_exercise_to_day(
        &self,
        exercise: &NewTrainingExercise,
    ) -> Option<TrainingExercise> {
        self.insert(tables::TRAINING_EXERCISES, exercise, "adding exercise")
            .await
    }

    // ─── Nutrition ───────────────────────────────────────────────

    pub async fn get_client_nutrition_plan(&self, client_id: Uuid) -> Vec<NutritionPlan> {
        let query = Query::from(tables::NUTRITION_PLANS)
            .eq("client_id", client_id.to_string())
            .eq("is_active", true)
            .order("day_number", true);
        self.list(query, "nutrition plan").await
    }

    pub async fn create_nutrition_plan(&self, plan: &NewNutritionPlan) -> Option<NutritionPlan> {
        self.insert(tables::NUTRITION_PLANS, plan, "creating nutrition plan")
            .await
    }

    /// Food-log entries of one calendar day, newest first.
    pub async fn get_food_log(&self, client_id: Uuid, date: NaiveDate) -> Vec<FoodLogEntry> {
        let (start, end) = day_bounds(date);
        let query = Query::from(tables::FOOD_LOG)
            .eq("client_id", client_id.to_string())
            .gte("meal_time", start)
            .lt("meal_time", end)
            .order("meal_time", false);
        self.list(query, "food log").await
    }

    pub async fn add_food_entry(&self, entry: &NewFoodEntry) -> Option<FoodLogEntry> {
        self.insert(tables::FOOD_LOG, entry, "adding food entry")
            .await
    }

    // ─── Measurements ────────────────────────────────────────────

    pub async fn get_client_measurements(&self, client_id: Uuid) -> Vec<Measurement> {
        let query = Query::from(tables::MEASUREMENTS)
            .eq("client_id", client_id.to_string())
            .order("measurement_date", false);
        self.list(query, "measurements").await
    }

    pub async fn add_measurement(&self, measurement: &NewMeasurement) -> Option<Measurement> {
        self.insert(tables::MEASUREMENTS, measurement, "adding measurement")
            .await
    }

    // ─── Gym ─────────────────────────────────────────────────────

    pub async fn get_gym_memberships(&self, client_id: Uuid) -> Vec<GymMembership> {
        let query = Query::from(tables::GYM_MEMBERSHIPS)
            .eq("client_id", client_id.to_string())
            .order("created_at", false);
        self.list(query, "memberships").await
    }

    pub async fn create_gym_membership(
        &self,
        membership: &NewGymMembership,
    ) -> Option<GymMembership> {
        self.insert(tables::GYM_MEMBERSHIPS, membership, "creating membership")
            .await
    }

    /// Every membership with the member profile, soonest expiry first.
    pub async fn get_all_gym_members(&self) -> Vec<GymMembership> {
        let query = Query::from(tables::GYM_MEMBERSHIPS)
            .embed(
                Embed::to_one("client", tables::PROFILES, "client_id")
                    .hint("gym_memberships_client_id_fkey"),
            )
            .order("end_date", true);
        self.list(query, "gym members").await
    }

    /// Single membership by id.
    pub async fn get_gym_membership(&self, membership_id: Uuid) -> Option<GymMembership> {
        let query = Query::from(tables::GYM_MEMBERSHIPS).eq("id", membership_id.to_string());
        self.one(query, "membership").await
    }

    pub async fn get_gym_visits(&self, client_id: Uuid) -> Vec<GymVisit> {
        let query = Query::from(tables::GYM_VISITS)
            .eq("client_id", client_id.to_string())
            .order("check_in_time", false)
            .limit(RECENT_VISITS_LIMIT);
        self.list(query, "gym visits").await
    }

    pub async fn check_in_to_gym(&self, client_id: Uuid) -> Option<GymVisit> {
        self.insert(
            tables::GYM_VISITS,
            &NewGymVisit { client_id },
            "checking in",
        )
        .await
    }

    /// Close an open visit of `client_id`. Visits of other clients and
    /// visits already closed are left alone (`None`).
    pub async fn check_out_of_gym(&self, visit_id: Uuid, client_id: Uuid) -> Option<GymVisit> {
        let patch = json!({ "check_out_time": format_utc_rfc3339(Utc::now()) });
        let conditions = vec![
            Filter::eq("client_id", client_id.to_string()),
            Filter::is_null("check_out_time"),
        ];
        self.update_where(
            tables::GYM_VISITS,
            visit_id,
            conditions,
            &patch,
            "checking out",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixture::{FixtureStore, Operation, KLIJENT_ID, PETAR_ID};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn demo() -> (DataService, FixtureStore) {
        let store = FixtureStore::demo(today());
        (DataService::new(Backend::Fixture(store.clone())), store)
    }

    #[tokio::test]
    async fn test_trainer_clients_embed_profiles() {
        let (data, _) = demo();
        let clients = data.get_trainer_clients(PETAR_ID).await;
        assert_eq!(clients.len(), 5);
        assert!(clients.iter().all(|c| c.client.is_some()));
    }

    #[tokio::test]
    async fn test_exercises_sorted_by_muscle_group() {
        let (data, _) = demo();
        let exercises = data.get_exercises().await;
        assert!(!exercises.is_empty());
        let groups: Vec<_> = exercises.iter().map(|e| e.muscle_group.clone()).collect();
        let mut sorted = groups.clone();
        sorted.sort();
        assert_eq!(groups, sorted);

        let chest = data.get_exercises_by_muscle_group("grudi").await;
        assert_eq!(chest.len(), 4);
    }

    #[tokio::test]
    async fn test_training_plan_has_days() {
        let (data, _) = demo();
        let plan = data.get_client_training_plan(KLIJENT_ID).await.unwrap();
        assert_eq!(plan.training_days.len(), 5);
        let first = &plan.training_days[0];
        assert!(first.training_exercises[0].exercise.is_some());
    }

    #[tokio::test]
    async fn test_update_client_status_sets_membership_start() {
        let (data, _) = demo();
        let waiting = data
            .get_trainer_clients(PETAR_ID)
            .await
            .into_iter()
            .find(|r| r.status == RelationshipStatus::WaitingPayment)
            .unwrap();
        let updated = data
            .update_client_status(waiting.id, RelationshipStatus::Active, true, today())
            .await
            .unwrap();
        assert_eq!(updated.status, RelationshipStatus::Active);
        assert!(updated.payment_confirmed);
        assert_eq!(updated.membership_start, Some(today()));
    }

    #[tokio::test]
    async fn test_update_unknown_relationship_is_none() {
        let (data, _) = demo();
        let result = data
            .update_client_status(Uuid::new_v4(), RelationshipStatus::Active, true, today())
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_check_in_then_out() {
        let (data, _) = demo();
        let visit = data.check_in_to_gym(KLIJENT_ID).await.unwrap();
        assert!(visit.check_out_time.is_none());
        assert!(data.check_out_of_gym(visit.id, PETAR_ID).await.is_none());
        let closed = data.check_out_of_gym(visit.id, KLIJENT_ID).await.unwrap();
        assert!(closed.check_out_time.is_some());
        assert!(data.check_out_of_gym(visit.id, KLIJENT_ID).await.is_none());
        assert_eq!(data.get_gym_visits(KLIJENT_ID).await.len(), 8);
    }

    #[tokio::test]
    async fn test_failed_select_returns_empty() {
        let (data, store) = demo();
        store.fail(tables::MEASUREMENTS, Operation::Select);
        assert!(data.get_client_measurements(KLIJENT_ID).await.is_empty());
        store.heal(tables::MEASUREMENTS, Operation::Select);
        assert_eq!(data.get_client_measurements(KLIJENT_ID).await.len(), 5);
    }
}
