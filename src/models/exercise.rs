// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalogue.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Muscle groups offered in the exercise picker: (value, label).
pub const MUSCLE_GROUPS: [(&str, &str); 7] = [
    ("grudi", "Grudi"),
    ("ledja", "Leđa"),
    ("noge", "Noge"),
    ("rame", "Rame"),
    ("biceps", "Biceps"),
    ("triceps", "Triceps"),
    ("trbuh", "Trbuh"),
];

/// Whether `value` is one of the known muscle-group keys.
pub fn is_muscle_group(value: &str) -> bool {
    MUSCLE_GROUPS.iter().any(|(key, _)| *key == value)
}

/// Display label for a muscle-group key; unknown keys are shown as-is.
pub fn muscle_group_label(value: &str) -> &str {
    MUSCLE_GROUPS
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

/// Row in `exercises`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl Exercise {
    /// Description text, with the placeholder used when none was written.
    pub fn description_or_placeholder(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("Nema opisa")
    }
}

/// Insert payload for `exercises`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
    pub name: String,
    pub muscle_group: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_public")]
    pub is_public: bool,
}

fn default_public() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muscle_group_label() {
        assert_eq!(muscle_group_label("ledja"), "Leđa");
        assert_eq!(muscle_group_label("vrat"), "vrat");
        assert!(is_muscle_group("trbuh"));
        assert!(!is_muscle_group("Trbuh"));
    }
}
