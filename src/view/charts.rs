// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chart.js configurations for the client statistics section.
//!
//! Only the datasets are built here; drawing happens in the browser.

use crate::models::{GymVisit, Measurement, NutritionPlan};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use serde_json::{json, Value};

const MONTHS_SR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Maj", "Jun", "Jul", "Avg", "Sep", "Okt", "Nov", "Dec",
];

const WEEKDAYS_SR: [&str; 7] = ["Pon", "Uto", "Sre", "Čet", "Pet", "Sub", "Ned"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

/// A single colour or one colour per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    One(&'static str),
    Each(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    /// Missing readings stay as gaps.
    pub data: Vec<Option<f64>>,
    pub border_color: Paint,
    pub background_color: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One chart, in the shape `new Chart(canvas, config)` takes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

/// Every chart of the statistics section, keyed by canvas id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientCharts {
    #[serde(rename = "weightChart")]
    pub weight: ChartConfig,
    #[serde(rename = "waistChart")]
    pub waist: ChartConfig,
    #[serde(rename = "measurementsChart")]
    pub measurements: ChartConfig,
    #[serde(rename = "macrosChart", skip_serializing_if = "Option::is_none")]
    pub macros: Option<ChartConfig>,
    #[serde(rename = "visitsChart")]
    pub visits: ChartConfig,
}

impl ClientCharts {
    /// Build all charts. `measurements` may be in any order.
    pub fn build(
        measurements: &[Measurement],
        nutrition_day: Option<&NutritionPlan>,
        visits: &[GymVisit],
    ) -> Self {
        let mut chronological: Vec<&Measurement> = measurements.iter().collect();
        chronological.sort_by_key(|m| m.measurement_date);

        Self {
            weight: weight_chart(&chronological),
            waist: waist_chart(&chronological),
            measurements: measurements_chart(&chronological),
            macros: nutrition_day.map(macros_chart),
            visits: visits_chart(visits),
        }
    }

    /// JSON safe to embed inside a `<script>` element.
    pub fn to_script_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "{}".to_string())
            .replace("</", "<\\/")
    }
}

/// Axis label for a measurement date (`5. Jun`).
pub fn date_label(date: NaiveDate) -> String {
    format!("{}. {}", date.day(), MONTHS_SR[date.month0() as usize])
}

fn line(
    label: &str,
    data: Vec<Option<f64>>,
    border: &'static str,
    fill: &'static str,
) -> Dataset {
    Dataset {
        label: label.to_string(),
        data,
        border_color: Paint::One(border),
        background_color: Paint::One(fill),
        tension: Some(0.4),
        fill: Some(true),
    }
}

fn line_options() -> Value {
    json!({
        "responsive": true,
        "spanGaps": true,
        "plugins": { "legend": { "display": true } },
        "scales": { "y": { "beginAtZero": false } }
    })
}

fn series(
    measurements: &[&Measurement],
    field: fn(&Measurement) -> Option<f64>,
) -> Vec<Option<f64>> {
    measurements.iter().map(|m| field(m)).collect()
}

fn labels(measurements: &[&Measurement]) -> Vec<String> {
    measurements.iter().map(|m| date_label(m.measurement_date)).collect()
}

pub fn weight_chart(measurements: &[&Measurement]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels(measurements),
            datasets: vec![line(
                "Težina (kg)",
                series(measurements, |m| m.weight),
                "#4CAF50",
                "rgba(76, 175, 80, 0.1)",
            )],
        },
        options: line_options(),
    }
}

pub fn waist_chart(measurements: &[&Measurement]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels(measurements),
            datasets: vec![line(
                "Struk (cm)",
                series(measurements, |m| m.waist),
                "#2196F3",
                "rgba(33, 150, 243, 0.1)",
            )],
        },
        options: line_options(),
    }
}

/// Chest, waist and biceps on one chart.
pub fn measurements_chart(measurements: &[&Measurement]) -> ChartConfig {
    let mut datasets = vec![
        line(
            "Grudi (cm)",
            series(measurements, |m| m.chest),
            "#FF9800",
            "rgba(255, 152, 0, 0.1)",
        ),
        line(
            "Struk (cm)",
            series(measurements, |m| m.waist),
            "#2196F3",
            "rgba(33, 150, 243, 0.1)",
        ),
        line(
            "Biceps (cm)",
            series(measurements, |m| m.biceps),
            "#9C27B0",
            "rgba(156, 39, 176, 0.1)",
        ),
    ];
    for dataset in &mut datasets {
        dataset.fill = Some(false);
    }

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels(measurements),
            datasets,
        },
        options: line_options(),
    }
}

/// Protein / carbs / fat split of one nutrition day, in grams.
pub fn macros_chart(plan: &NutritionPlan) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: vec![
                "Proteini".to_string(),
                "Ugljeni hidrati".to_string(),
                "Masti".to_string(),
            ],
            datasets: vec![Dataset {
                label: format!("Dan {}", plan.day_number),
                data: vec![
                    Some(f64::from(plan.protein)),
                    Some(f64::from(plan.carbs)),
                    Some(f64::from(plan.fats)),
                ],
                border_color: Paint::One("#ffffff"),
                background_color: Paint::Each(vec!["#4CAF50", "#2196F3", "#FF9800"]),
                tension: None,
                fill: None,
            }],
        },
        options: json!({
            "responsive": true,
            "plugins": { "legend": { "position": "bottom" } }
        }),
    }
}

/// Check-ins per weekday, Monday first.
pub fn visits_chart(visits: &[GymVisit]) -> ChartConfig {
    let mut counts = [0u32; 7];
    for visit in visits {
        let weekday = visit
            .check_in_time
            .with_timezone(&Local)
            .weekday()
            .num_days_from_monday();
        counts[weekday as usize] += 1;
    }

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: WEEKDAYS_SR.iter().map(|d| d.to_string()).collect(),
            datasets: vec![Dataset {
                label: "Dolasci".to_string(),
                data: counts.iter().map(|&c| Some(f64::from(c))).collect(),
                border_color: Paint::One("#4CAF50"),
                background_color: Paint::One("rgba(76, 175, 80, 0.6)"),
                tension: None,
                fill: None,
            }],
        },
        options: json!({
            "responsive": true,
            "scales": { "y": { "beginAtZero": true, "ticks": { "stepSize": 1 } } }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn measurement(date: NaiveDate, weight: Option<f64>) -> Measurement {
        Measurement {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            measurement_date: date,
            weight,
            waist: Some(85.0),
            chest: None,
            biceps: None,
            thighs: None,
        }
    }

    #[test]
    fn test_date_label() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
        assert_eq!(date_label(date), "5. Avg");
    }

    #[test]
    fn test_weight_chart_is_chronological_with_gaps() {
        let newest_first = vec![
            measurement(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), Some(82.5)),
            measurement(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), None),
            measurement(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Some(84.0)),
        ];
        let charts = ClientCharts::build(&newest_first, None, &[]);

        assert_eq!(charts.weight.data.labels, vec!["1. Jan", "1. Feb", "1. Mar"]);
        assert_eq!(
            charts.weight.data.datasets[0].data,
            vec![Some(84.0), None, Some(82.5)]
        );
        assert!(charts.macros.is_none());

        let json = serde_json::to_value(&charts).unwrap();
        assert_eq!(json["weightChart"]["type"], "line");
        assert_eq!(json["weightChart"]["data"]["datasets"][0]["borderColor"], "#4CAF50");
        assert!(json.get("macrosChart").is_none());
    }

    #[test]
    fn test_macros_chart() {
        let plan = NutritionPlan {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            day_number: 1,
            calories: 2500,
            protein: 180,
            carbs: 250,
            fats: 70,
            is_active: true,
        };
        let chart = macros_chart(&plan);
        assert_eq!(chart.kind, ChartKind::Doughnut);
        assert_eq!(
            chart.data.datasets[0].data,
            vec![Some(180.0), Some(250.0), Some(70.0)]
        );
    }

    #[test]
    fn test_visits_chart_counts_weekdays() {
        let noon = |d| {
            Local
                .with_ymd_and_hms(2024, 6, d, 12, 0, 0)
                .unwrap()
                .with_timezone(&Utc)
        };
        // 3 June 2024 was a Monday.
        let visits: Vec<GymVisit> = [3, 10, 5]
            .into_iter()
            .map(|d| GymVisit {
                id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                check_in_time: noon(d),
                check_out_time: None,
            })
            .collect();

        let chart = visits_chart(&visits);
        assert_eq!(chart.data.labels[0], "Pon");
        assert_eq!(chart.data.datasets[0].data[0], Some(2.0));
        assert_eq!(chart.data.datasets[0].data[2], Some(1.0));
    }

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let mut charts = ClientCharts::build(&[], None, &[]);
        charts.weight.data.datasets[0].label = "</script>".to_string();
        assert!(!charts.to_script_json().contains("</script>"));
    }
}
