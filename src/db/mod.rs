//! Database layer (hosted tables or in-memory fixtures).

pub mod fixture;
pub mod postgrest;
pub mod query;

pub use fixture::{FixtureStore, Operation};
pub use postgrest::PostgrestClient;
pub use query::{Embed, Filter, Query};

use crate::error::AppError;
use serde_json::Value;

/// Table names as constants.
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const TRAINER_CLIENTS: &str = "trainer_clients";
    pub const EXERCISES: &str = "exercises";
    pub const TRAINING_PLANS: &str = "training_plans";
    pub const TRAINING_DAYS: &str = "training_days";
    pub const TRAINING_EXERCISES: &str = "training_exercises";
    pub const NUTRITION_PLANS: &str = "nutrition_plans";
    pub const MEASUREMENTS: &str = "measurements";
    pub const GYM_MEMBERSHIPS: &str = "gym_memberships";
    pub const GYM_VISITS: &str = "gym_visits";
    pub const FOOD_LOG: &str = "food_log";
}

/// Remote data source, chosen once at startup.
#[derive(Clone)]
pub enum Backend {
    /// Hosted REST tables.
    Remote(PostgrestClient),
    /// In-memory tables (demo mode, tests).
    Fixture(FixtureStore),
}

impl Backend {
    /// Copy of this backend acting on behalf of the signed-in user.
    pub fn scoped(&self, access_token: &str) -> Self {
        match self {
            Backend::Remote(client) => Backend::Remote(client.with_bearer(access_token)),
            Backend::Fixture(store) => Backend::Fixture(store.clone()),
        }
    }

    pub async fn select(&self, query: &Query) -> Result<Vec<Value>, AppError> {
        match self {
            Backend::Remote(client) => client.select(query).await,
            Backend::Fixture(store) => store.select(query),
        }
    }

    pub async fn insert(&self, table: &str, row: &Value) -> Result<Value, AppError> {
        match self {
            Backend::Remote(client) => client.insert(table, row).await,
            Backend::Fixture(store) => store.insert(table, row),
        }
    }

    pub async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: &Value,
    ) -> Result<Vec<Value>, AppError> {
        match self {
            Backend::Remote(client) => client.update(table, filters, patch).await,
            Backend::Fixture(store) => store.update(table, filters, patch),
        }
    }
}
