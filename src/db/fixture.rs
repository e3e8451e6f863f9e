// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory table store used for demo mode and tests.
//!
//! Evaluates the same `Query` values the REST client sends, including
//! equality/range filters, ordering, limits and embedded relations.
//! Individual (table, operation) pairs can be told to fail so callers can
//! exercise remote-error paths without a network.

use crate::db::query::{Embed, Filter, FilterOp, Join, Query};
use crate::db::tables;
use crate::error::AppError;
use crate::models::{
    NewGymMembership, NewMeasurement, NewNutritionPlan, NewTrainingDay, NewTrainingExercise,
    NewTrainingPlan, Role,
};
use chrono::{Duration, NaiveDate, Utc};
use dashmap::{DashMap, DashSet};
use serde::Serialize;
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use uuid::Uuid;

/// Kind of table operation, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
}

/// Demo trainer account (`petar` / `petar`).
pub const PETAR_ID: Uuid = Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0001);
/// Demo client account (`klijent` / `klijent`).
pub const KLIJENT_ID: Uuid = Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0002);

const ANA_ID: Uuid = Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0003);
const NIKOLA_ID: Uuid = Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0004);
const JELENA_ID: Uuid = Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0005);
const STEFAN_ID: Uuid = Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0006);

const EXERCISE_ID_BASE: u128 = 0x5a1e_0000_0000_4000_8000_0000_0001_0000;

/// Exercise catalogue seeded in demo mode: (muscle group, name, description).
const DEMO_EXERCISES: &[(&str, &str, Option<&str>)] = &[
    ("grudi", "Bench press", Some("Klasična vežba za razvijanje prsnih mišića. Leći na klupu sa stopalima čvrsto na podu. Držati šipku sa širinom ramena. Spustiti šipku do donjeg dela grudi, zadržati na sekundu, zatim podići nazad u početni položaj.")),
    ("grudi", "Kosi bench press", Some("Varijacija bench pressa koja više opterećuje gornji deo prsnih mišića. Podešavanjem kosine klupe na 30-45 stepeni, izvoditi isti pokret kao kod običnog bench pressa.")),
    ("grudi", "Sklekovi", Some("Osnovna vežba za prsne mišiće koja se izvodi sopstvenom težinom. Držati telo u ravnoj liniji, spuštati se sve dok grudi ne dođu blizu poda, zatim se podići nazad u početni položaj.")),
    ("grudi", "Pec dec mašina", None),
    ("ledja", "Veslanje u pretklonu", None),
    ("ledja", "Mrtvo dizanje", None),
    ("ledja", "Pull-up", None),
    ("ledja", "Lat pulldown", None),
    ("noge", "Čučnjevi", None),
    ("noge", "Istezanje nogu", None),
    ("noge", "Fleksija nogu", None),
    ("noge", "Hodanje na stepenicama", None),
    ("rame", "Military press", None),
    ("rame", "Bočno podizanje", None),
    ("rame", "Prednje podizanje", None),
    ("rame", "Face pull", None),
    ("biceps", "Biceps curls", None),
    ("biceps", "Pregib sa šipkom", None),
    ("biceps", "Koncentrisani biceps", None),
    ("biceps", "Hammer curls", None),
    ("triceps", "Triceps ekstenzija", Some("Vežba za izolaciju tricepsa. Leći na klupu sa utezom iznad glave, spustiti utez iza glave savijajući laktove, zatim vratiti u početni položaj ispravljajući ruke.")),
    ("triceps", "Triceps dips", None),
    ("triceps", "Triceps pushdown", None),
    ("triceps", "French press", None),
    ("trbuh", "Trbušnjaci", None),
    ("trbuh", "Dizanje nogu", None),
    ("trbuh", "Plank", None),
    ("trbuh", "Ruski twist", None),
];

/// Training days of the demo plan: (name, [(exercise index, sets, reps)]).
const DEMO_DAYS: &[(&str, &[(usize, u32, u32)])] = &[
    ("Dan 1 - Grudi i triceps", &[(0, 4, 10), (1, 3, 12), (2, 3, 15), (20, 3, 12)]),
    ("Dan 2 - Leđa i biceps", &[(5, 4, 8), (6, 3, 10), (7, 3, 12), (16, 3, 12)]),
    ("Dan 3 - Noge i trbuh", &[(8, 4, 10), (9, 3, 12), (10, 3, 12), (26, 3, 60)]),
    ("Dan 4 - Rame i kardio", &[(12, 4, 10), (13, 3, 15), (15, 3, 15)]),
    ("Dan 5 - Celotelo trening", &[(8, 3, 10), (0, 3, 10), (4, 3, 10), (24, 3, 20)]),
];

/// Id of the `index`-th demo exercise.
pub fn demo_exercise_id(index: usize) -> Uuid {
    Uuid::from_u128(EXERCISE_ID_BASE + index as u128)
}

/// In-memory table store.
#[derive(Clone, Default)]
pub struct FixtureStore {
    tables: Arc<DashMap<String, Vec<Value>>>,
    failures: Arc<DashSet<(String, Operation)>>,
    offline: Arc<AtomicBool>,
}

impl FixtureStore {
    /// Empty store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store where every operation fails, like an unreachable backend.
    pub fn offline() -> Self {
        let store = Self::default();
        store.offline.store(true, AtomicOrdering::SeqCst);
        store
    }

    /// Make `operation` on `table` fail until `heal` is called.
    pub fn fail(&self, table: &str, operation: Operation) {
        self.failures.insert((table.to_string(), operation));
    }

    pub fn heal(&self, table: &str, operation: Operation) {
        self.failures.remove(&(table.to_string(), operation));
    }

    fn check(&self, table: &str, operation: Operation) -> Result<(), AppError> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            return Err(AppError::Backend(
                "Database not connected (offline mode)".to_string(),
            ));
        }
        if self.failures.contains(&(table.to_string(), operation)) {
            return Err(AppError::Backend(format!(
                "{} ({:?} on {})",
                AppError::INJECTED_FAILURE,
                operation,
                table
            )));
        }
        Ok(())
    }

    fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .get(table)
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    /// Number of rows currently stored in `table`.
    pub fn count(&self, table: &str) -> usize {
        self.tables.get(table).map(|rows| rows.len()).unwrap_or(0)
    }

    // ─── Table Operations ────────────────────────────────────────

    pub fn select(&self, query: &Query) -> Result<Vec<Value>, AppError> {
        self.check(&query.table, Operation::Select)?;

        let mut rows: Vec<Value> = self
            .rows(&query.table)
            .into_iter()
            .filter(|row| query.filters.iter().all(|f| matches_filter(row, f)))
            .collect();

        rows.sort_by(|a, b| {
            for order in &query.order {
                let ord = compare_values(&a[&order.column], &b[&order.column])
                    .unwrap_or(Ordering::Equal);
                let ord = if order.ascending { ord } else { ord.reverse() };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        for row in &mut rows {
            self.resolve_embeds(row, &query.embeds);
        }

        Ok(rows)
    }

    pub fn insert(&self, table: &str, row: &Value) -> Result<Value, AppError> {
        self.check(table, Operation::Insert)?;

        let mut object = row
            .as_object()
            .cloned()
            .ok_or_else(|| AppError::BadRequest(format!("Insert into {} needs an object", table)))?;

        object
            .entry("id")
            .or_insert_with(|| json!(Uuid::new_v4()));
        for (column, value) in column_defaults(table) {
            object.entry(column).or_insert(value);
        }

        let stored = Value::Object(object);
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    pub fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: &Value,
    ) -> Result<Vec<Value>, AppError> {
        self.check(table, Operation::Update)?;

        let patch = patch
            .as_object()
            .ok_or_else(|| AppError::BadRequest(format!("Update of {} needs an object", table)))?;

        let mut updated = Vec::new();
        if let Some(mut rows) = self.tables.get_mut(table) {
            for row in rows.iter_mut() {
                if !filters.iter().all(|f| matches_filter(row, f)) {
                    continue;
                }
                if let Some(object) = row.as_object_mut() {
                    for (key, value) in patch {
                        object.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    fn resolve_embeds(&self, row: &mut Value, embeds: &[Embed]) {
        for embed in embeds {
            let related = match &embed.join {
                Join::ToOne { local_column } => {
                    let key = row[local_column.as_str()].clone();
                    match self
                        .rows(&embed.table)
                        .into_iter()
                        .find(|candidate| candidate["id"] == key && !key.is_null())
                    {
                        Some(mut found) => {
                            self.resolve_embeds(&mut found, &embed.nested);
                            found
                        }
                        None => Value::Null,
                    }
                }
                Join::ToMany { foreign_column } => {
                    let id = row["id"].clone();
                    let children = self
                        .rows(&embed.table)
                        .into_iter()
                        .filter(|child| child[foreign_column.as_str()] == id)
                        .map(|mut child| {
                            self.resolve_embeds(&mut child, &embed.nested);
                            child
                        })
                        .collect();
                    Value::Array(children)
                }
            };
            if let Some(object) = row.as_object_mut() {
                object.insert(embed.alias.clone(), related);
            }
        }
    }

    // ─── Demo Data ───────────────────────────────────────────────

    /// Store seeded with the demo gym, dated relative to `today`.
    pub fn demo(today: NaiveDate) -> Self {
        let store = Self::new();
        store.seed_demo(today);
        store
    }

    fn seed<T: Serialize>(&self, table: &str, id: Uuid, record: &T) {
        let mut value = serde_json::to_value(record).unwrap_or_else(|_| json!({}));
        if let Some(object) = value.as_object_mut() {
            object.insert("id".to_string(), json!(id));
        }
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(value);
    }

    fn seed_demo(&self, today: NaiveDate) {
        let people = [
            (PETAR_ID, "petar", "Petar", Role::Trainer),
            (KLIJENT_ID, "klijent", "Klijent", Role::Client),
            (ANA_ID, "ana@teretana.rs", "Ana Jovanović", Role::Client),
            (NIKOLA_ID, "nikola@teretana.rs", "Nikola Nikolić", Role::Client),
            (JELENA_ID, "jelena@teretana.rs", "Jelena Petrović", Role::Client),
            (STEFAN_ID, "stefan@teretana.rs", "Stefan Ilić", Role::Client),
        ];
        for (id, email, name, role) in people {
            self.seed(
                tables::PROFILES,
                id,
                &json!({ "email": email, "full_name": name, "role": role }),
            );
        }

        let relationships = [
            (KLIJENT_ID, "active", true, Some(today - Duration::days(60))),
            (ANA_ID, "waiting_payment", false, None),
            (NIKOLA_ID, "waiting_training", true, None),
            (JELENA_ID, "inactive", false, None),
            (STEFAN_ID, "waiting_payment", false, None),
        ];
        for (client_id, status, paid, start) in relationships {
            self.seed(
                tables::TRAINER_CLIENTS,
                Uuid::new_v4(),
                &json!({
                    "trainer_id": PETAR_ID,
                    "client_id": client_id,
                    "status": status,
                    "payment_confirmed": paid,
                    "membership_start": start,
                }),
            );
        }

        for (index, (group, name, description)) in DEMO_EXERCISES.iter().enumerate() {
            self.seed(
                tables::EXERCISES,
                demo_exercise_id(index),
                &json!({
                    "name": name,
                    "muscle_group": group,
                    "description": description,
                    "is_public": true,
                }),
            );
        }

        let plan_id = Uuid::new_v4();
        let mut plan = serde_json::to_value(NewTrainingPlan {
            client_id: KLIJENT_ID,
            trainer_id: PETAR_ID,
            name: Some("Program snage".to_string()),
            is_active: true,
        })
        .unwrap_or_else(|_| json!({}));
        if let Some(object) = plan.as_object_mut() {
            object.insert(
                "created_at".to_string(),
                json!(Utc::now() - Duration::days(14)),
            );
        }
        self.seed(tables::TRAINING_PLANS, plan_id, &plan);

        for (name, exercises) in DEMO_DAYS {
            let day_id = Uuid::new_v4();
            self.seed(
                tables::TRAINING_DAYS,
                day_id,
                &NewTrainingDay {
                    plan_id,
                    name: name.to_string(),
                },
            );
            for &(index, sets, reps) in exercises.iter() {
                self.seed(
                    tables::TRAINING_EXERCISES,
                    Uuid::new_v4(),
                    &NewTrainingExercise {
                        day_id,
                        exercise_id: demo_exercise_id(index),
                        sets,
                        reps,
                    },
                );
            }
        }

        let macros = [
            (2500, 180, 250, 70),
            (2300, 170, 220, 65),
            (2600, 185, 280, 70),
            (2200, 165, 200, 60),
            (2400, 175, 240, 68),
        ];
        for (day, (calories, protein, carbs, fats)) in macros.into_iter().enumerate() {
            self.seed(
                tables::NUTRITION_PLANS,
                Uuid::new_v4(),
                &NewNutritionPlan {
                    client_id: KLIJENT_ID,
                    day_number: day as u32 + 1,
                    calories,
                    protein,
                    carbs,
                    fats,
                    is_active: true,
                },
            );
        }

        let sizes = [
            (84.0, 88.0, 100.0, 35.0, 58.0),
            (83.5, 87.5, 100.5, 35.2, 58.0),
            (83.0, 87.0, 101.0, 35.5, 57.5),
            (82.5, 86.5, 101.5, 35.8, 57.5),
            (82.5, 86.0, 102.0, 36.0, 57.0),
        ];
        for (i, (weight, waist, chest, biceps, thighs)) in sizes.into_iter().enumerate() {
            let months_back = (sizes.len() - 1 - i) as i64;
            self.seed(
                tables::MEASUREMENTS,
                Uuid::new_v4(),
                &NewMeasurement {
                    client_id: KLIJENT_ID,
                    measurement_date: today - Duration::days(30 * months_back),
                    weight: Some(weight),
                    waist: Some(waist),
                    chest: Some(chest),
                    biceps: Some(biceps),
                    thighs: Some(thighs),
                },
            );
        }

        let memberships = [
            (KLIJENT_ID, 20),
            (ANA_ID, 3),
            (NIKOLA_ID, -5),
            (JELENA_ID, -40),
            (STEFAN_ID, 7),
        ];
        for (client_id, days_left) in memberships {
            let end_date = today + Duration::days(days_left);
            let mut membership = serde_json::to_value(NewGymMembership {
                client_id,
                membership_type: "Mesečna".to_string(),
                start_date: end_date - Duration::days(30),
                end_date,
            })
            .unwrap_or_else(|_| json!({}));
            if let Some(object) = membership.as_object_mut() {
                object.insert(
                    "created_at".to_string(),
                    json!(Utc::now() - Duration::days(30 - days_left)),
                );
            }
            self.seed(tables::GYM_MEMBERSHIPS, Uuid::new_v4(), &membership);
        }

        let now = Utc::now();
        for days_ago in [1i64, 2, 4, 6, 8, 9, 11] {
            let check_in = now - Duration::days(days_ago) - Duration::hours(2);
            self.seed(
                tables::GYM_VISITS,
                Uuid::new_v4(),
                &json!({
                    "client_id": KLIJENT_ID,
                    "check_in_time": check_in,
                    "check_out_time": check_in + Duration::minutes(60 + 5 * days_ago),
                }),
            );
        }
    }
}

/// Values the store fills in when an insert leaves them out.
fn column_defaults(table: &str) -> Vec<(String, Value)> {
    let now = json!(Utc::now());
    match table {
        tables::TRAINING_PLANS | tables::GYM_MEMBERSHIPS => {
            vec![("created_at".to_string(), now)]
        }
        tables::GYM_VISITS => vec![
            ("check_in_time".to_string(), now),
            ("check_out_time".to_string(), Value::Null),
        ],
        tables::EXERCISES => vec![("is_public".to_string(), json!(true))],
        _ => Vec::new(),
    }
}

fn matches_filter(row: &Value, filter: &Filter) -> bool {
    let ord = compare_values(&row[filter.column.as_str()], &filter.value);
    match filter.op {
        FilterOp::Eq => ord == Some(Ordering::Equal),
        FilterOp::Gte => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
        FilterOp::Lt => ord == Some(Ordering::Less),
        FilterOp::Is => row[filter.column.as_str()] == filter.value,
    }
}

/// Ordering between two JSON scalars of the same kind.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::query::Embed;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_insert_assigns_id_and_defaults() {
        let store = FixtureStore::new();
        let row = store
            .insert(tables::GYM_VISITS, &json!({ "client_id": KLIJENT_ID }))
            .unwrap();
        assert!(row["id"].is_string());
        assert!(row["check_in_time"].is_string());
        assert!(row["check_out_time"].is_null());
        assert_eq!(store.count(tables::GYM_VISITS), 1);
    }

    #[test]
    fn test_select_filters_orders_and_limits() {
        let store = FixtureStore::new();
        for (n, public) in [(3, true), (1, true), (2, false), (4, true)] {
            store
                .insert("numbers", &json!({ "n": n, "is_public": public }))
                .unwrap();
        }
        let rows = store
            .select(&Query::from("numbers").eq("is_public", true).order("n", false).limit(2))
            .unwrap();
        let ns: Vec<i64> = rows.iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![4, 3]);
    }

    #[test]
    fn test_range_filter_on_timestamps() {
        let store = FixtureStore::new();
        for t in [
            "2024-06-01T08:00:00Z",
            "2024-06-01T23:59:59Z",
            "2024-06-02T07:00:00Z",
        ] {
            store.insert("food_log", &json!({ "meal_time": t })).unwrap();
        }
        let rows = store
            .select(
                &Query::from("food_log")
                    .gte("meal_time", "2024-06-01T00:00:00")
                    .lt("meal_time", "2024-06-01T23:59:59"),
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["meal_time"], "2024-06-01T08:00:00Z");
    }

    #[test]
    fn test_embeds_resolve_nested_relations() {
        let store = FixtureStore::demo(today());
        let rows = store
            .select(
                &Query::from(tables::TRAINING_PLANS)
                    .eq("client_id", KLIJENT_ID.to_string())
                    .embed(
                        Embed::to_many(tables::TRAINING_DAYS, "plan_id").with(
                            Embed::to_many(tables::TRAINING_EXERCISES, "day_id").with(
                                Embed::to_one("exercise", tables::EXERCISES, "exercise_id"),
                            ),
                        ),
                    ),
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        let days = rows[0]["training_days"].as_array().unwrap();
        assert_eq!(days.len(), DEMO_DAYS.len());
        assert_eq!(
            days[0]["training_exercises"][0]["exercise"]["name"],
            "Bench press"
        );
    }

    #[test]
    fn test_to_one_embed_missing_is_null() {
        let store = FixtureStore::new();
        store
            .insert("trainer_clients", &json!({ "client_id": Uuid::new_v4() }))
            .unwrap();
        let rows = store
            .select(
                &Query::from("trainer_clients")
                    .embed(Embed::to_one("client", tables::PROFILES, "client_id")),
            )
            .unwrap();
        assert!(rows[0]["client"].is_null());
    }

    #[test]
    fn test_update_patches_matching_rows() {
        let store = FixtureStore::new();
        let row = store
            .insert("trainer_clients", &json!({ "status": "waiting_payment" }))
            .unwrap();
        let updated = store
            .update(
                "trainer_clients",
                &[Filter::eq("id", row["id"].clone())],
                &json!({ "status": "active" }),
            )
            .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0]["status"], "active");
    }

    #[test]
    fn test_update_only_rows_still_null() {
        let store = FixtureStore::new();
        let open = store.insert(tables::GYM_VISITS, &json!({})).unwrap();
        let filters = [
            Filter::eq("id", open["id"].clone()),
            Filter::is_null("check_out_time"),
        ];

        let closed = store
            .update(tables::GYM_VISITS, &filters, &json!({ "check_out_time": "t1" }))
            .unwrap();
        assert_eq!(closed.len(), 1);

        let again = store
            .update(tables::GYM_VISITS, &filters, &json!({ "check_out_time": "t2" }))
            .unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_failure_injection_and_offline() {
        let store = FixtureStore::new();
        store.fail(tables::TRAINING_DAYS, Operation::Insert);
        assert!(store.insert(tables::TRAINING_DAYS, &json!({})).is_err());
        assert!(store.insert(tables::TRAINING_PLANS, &json!({})).is_ok());
        store.heal(tables::TRAINING_DAYS, Operation::Insert);
        assert!(store.insert(tables::TRAINING_DAYS, &json!({})).is_ok());

        let offline = FixtureStore::offline();
        assert!(offline.select(&Query::from(tables::PROFILES)).is_err());
    }
}
