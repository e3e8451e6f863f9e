// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page-load fetch sequences for the two dashboards.
//!
//! Calls run one after another. A failed call shows up as an empty part of
//! the page, never as an error.

use crate::models::{
    Exercise, FoodLogEntry, GymMembership, GymVisit, Measurement, NutritionPlan,
    TrainerClientRelationship, TrainingPlan,
};
use crate::services::{DataService, ExerciseCache};
use crate::view::charts::ClientCharts;
use chrono::NaiveDate;
use uuid::Uuid;

/// Everything the trainer dashboard shows.
#[derive(Debug, Default)]
pub struct TrainerData {
    pub clients: Vec<TrainerClientRelationship>,
    pub exercises: Vec<Exercise>,
    pub members: Vec<GymMembership>,
    /// Active plan of the client whose detail panel is open.
    pub selected_plan: Option<TrainingPlan>,
}

impl TrainerData {
    pub fn client(&self, client_id: Uuid) -> Option<&TrainerClientRelationship> {
        self.clients.iter().find(|c| c.client_id == client_id)
    }

    pub fn exercise(&self, exercise_id: Uuid) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }
}

pub async fn load_trainer_data(
    data: &DataService,
    exercises: &ExerciseCache,
    trainer_id: Uuid,
    selected_client: Option<Uuid>,
) -> TrainerData {
    let clients = data.get_trainer_clients(trainer_id).await;
    let exercises = exercises.all(data).await;
    let members = data.get_all_gym_members().await;

    let selected_plan = match selected_client {
        Some(client_id) => data.get_client_training_plan(client_id).await,
        None => None,
    };

    tracing::debug!(
        trainer_id = %trainer_id,
        clients = clients.len(),
        exercises = exercises.len(),
        members = members.len(),
        "Trainer dashboard loaded"
    );

    TrainerData {
        clients,
        exercises,
        members,
        selected_plan,
    }
}

/// Everything the client dashboard shows.
#[derive(Debug, Default)]
pub struct ClientData {
    pub plan: Option<TrainingPlan>,
    pub nutrition: Vec<NutritionPlan>,
    pub food_log: Vec<FoodLogEntry>,
    /// Newest first.
    pub measurements: Vec<Measurement>,
    /// Newest first.
    pub memberships: Vec<GymMembership>,
    /// Newest first.
    pub visits: Vec<GymVisit>,
}

impl ClientData {
    /// Nutrition day at `index`, clamped to the first day.
    pub fn nutrition_day(&self, index: usize) -> Option<&NutritionPlan> {
        self.nutrition.get(index).or_else(|| self.nutrition.first())
    }

    /// The visit still waiting for a check-out, if any.
    pub fn open_visit(&self) -> Option<&GymVisit> {
        self.visits.iter().find(|v| v.check_out_time.is_none())
    }

    pub fn current_membership(&self) -> Option<&GymMembership> {
        self.memberships.first()
    }

    /// Exercise from the training plan, for the info modal.
    pub fn plan_exercise(&self, exercise_id: Uuid) -> Option<&Exercise> {
        self.plan
            .iter()
            .flat_map(|plan| &plan.training_days)
            .flat_map(|day| &day.training_exercises)
            .filter_map(|te| te.exercise.as_ref())
            .find(|e| e.id == exercise_id)
    }

    pub fn charts(&self, nutrition_day: usize) -> ClientCharts {
        ClientCharts::build(
            &self.measurements,
            self.nutrition_day(nutrition_day),
            &self.visits,
        )
    }
}

pub async fn load_client_data(
    data: &DataService,
    client_id: Uuid,
    today: NaiveDate,
) -> ClientData {
    let plan = data.get_client_training_plan(client_id).await;
    let nutrition = data.get_client_nutrition_plan(client_id).await;
    let food_log = data.get_food_log(client_id, today).await;
    let measurements = data.get_client_measurements(client_id).await;
    let memberships = data.get_gym_memberships(client_id).await;
    let visits = data.get_gym_visits(client_id).await;

    tracing::debug!(
        client_id = %client_id,
        has_plan = plan.is_some(),
        measurements = measurements.len(),
        visits = visits.len(),
        "Client dashboard loaded"
    );

    ClientData {
        plan,
        nutrition,
        food_log,
        measurements,
        memberships,
        visits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixture::{demo_exercise_id, KLIJENT_ID, PETAR_ID};
    use crate::db::{Backend, FixtureStore};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_load_trainer_data() {
        let data = DataService::new(Backend::Fixture(FixtureStore::demo(today())));
        let loaded =
            load_trainer_data(&data, &ExerciseCache::new(), PETAR_ID, Some(KLIJENT_ID)).await;

        assert_eq!(loaded.clients.len(), 5);
        assert_eq!(loaded.exercises.len(), 28);
        assert_eq!(loaded.members.len(), 5);
        assert_eq!(loaded.selected_plan.as_ref().unwrap().training_days.len(), 5);
        assert!(loaded.client(KLIJENT_ID).is_some());
    }

    #[tokio::test]
    async fn test_load_client_data() {
        let data = DataService::new(Backend::Fixture(FixtureStore::demo(today())));
        let loaded = load_client_data(&data, KLIJENT_ID, today()).await;

        assert_eq!(loaded.plan.as_ref().unwrap().training_days.len(), 5);
        assert_eq!(loaded.nutrition.len(), 5);
        assert_eq!(loaded.nutrition_day(99).unwrap().day_number, 1);
        assert_eq!(loaded.measurements.len(), 5);
        assert_eq!(loaded.current_membership().unwrap().days_left(today()), 20);
        assert_eq!(loaded.visits.len(), 7);
        assert!(loaded.open_visit().is_none());
        assert_eq!(
            loaded.plan_exercise(demo_exercise_id(0)).unwrap().name,
            "Bench press"
        );
    }

    #[tokio::test]
    async fn test_offline_loads_empty_pages() {
        let data = DataService::new(Backend::Fixture(FixtureStore::offline()));
        let trainer = load_trainer_data(&data, &ExerciseCache::new(), PETAR_ID, None).await;
        assert!(trainer.clients.is_empty() && trainer.members.is_empty());

        let client = load_client_data(&data, KLIJENT_ID, today()).await;
        assert!(client.plan.is_none());
        assert!(client.visits.is_empty());
    }
}
