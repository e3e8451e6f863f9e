//! Body measurements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row in `measurements`. All sizes are optional; weight in kg, the rest in cm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: Uuid,
    pub client_id: Uuid,
    pub measurement_date: NaiveDate,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub chest: Option<f64>,
    #[serde(default)]
    pub biceps: Option<f64>,
    #[serde(default)]
    pub thighs: Option<f64>,
}

/// Insert payload for `measurements`.
#[derive(Debug, Clone, Serialize)]
pub struct NewMeasurement {
    pub client_id: Uuid,
    pub measurement_date: NaiveDate,
    pub weight: Option<f64>,
    pub waist: Option<f64>,
    pub chest: Option<f64>,
    pub biceps: Option<f64>,
    pub thighs: Option<f64>,
}
