//! Nutrition plans and the food log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row in `nutrition_plans`: the recommended intake for one plan day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub id: Uuid,
    pub client_id: Uuid,
    pub day_number: u32,
    pub calories: u32,
    /// Grams
    pub protein: u32,
    /// Grams
    pub carbs: u32,
    /// Grams
    pub fats: u32,
    #[serde(default)]
    pub is_active: bool,
}

/// Insert payload for `nutrition_plans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNutritionPlan {
    pub client_id: Uuid,
    pub day_number: u32,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Row in `food_log`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: Uuid,
    pub client_id: Uuid,
    pub meal_time: DateTime<Utc>,
    pub food_name: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fats: Option<f64>,
}

/// Insert payload for `food_log`.
#[derive(Debug, Clone, Serialize)]
pub struct NewFoodEntry {
    pub client_id: Uuid,
    pub meal_time: DateTime<Utc>,
    pub food_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats: Option<f64>,
}
