//! Trainer ↔ client relationships.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Profile;

/// State of a trainer-client pairing. Transitions are caller-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Active,
    WaitingPayment,
    WaitingTraining,
    Inactive,
}

impl RelationshipStatus {
    pub const ALL: [RelationshipStatus; 4] = [
        RelationshipStatus::Active,
        RelationshipStatus::WaitingPayment,
        RelationshipStatus::WaitingTraining,
        RelationshipStatus::Inactive,
    ];

    /// Display text shown on client cards.
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipStatus::Active => "Aktivan",
            RelationshipStatus::WaitingPayment => "Čeka uplatu",
            RelationshipStatus::WaitingTraining => "Čeka trening",
            RelationshipStatus::Inactive => "Neaktivan",
        }
    }

    /// CSS modifier class (`waiting_payment` → `waiting-payment`).
    pub fn css_class(&self) -> &'static str {
        match self {
            RelationshipStatus::Active => "active",
            RelationshipStatus::WaitingPayment => "waiting-payment",
            RelationshipStatus::WaitingTraining => "waiting-training",
            RelationshipStatus::Inactive => "inactive",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Active => "active",
            RelationshipStatus::WaitingPayment => "waiting_payment",
            RelationshipStatus::WaitingTraining => "waiting_training",
            RelationshipStatus::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for RelationshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown relationship status '{s}'"))
    }
}

/// Row in `trainer_clients`, with the client profile embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerClientRelationship {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub client_id: Uuid,
    pub status: RelationshipStatus,
    #[serde(default)]
    pub payment_confirmed: bool,
    #[serde(default)]
    pub membership_start: Option<NaiveDate>,
    #[serde(default)]
    pub client: Option<Profile>,
}

/// Patch applied by `update_client_status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: RelationshipStatus,
    pub payment_confirmed: bool,
    /// Set to `today` when the relationship becomes active, cleared otherwise.
    pub membership_start: Option<NaiveDate>,
}

impl StatusUpdate {
    pub fn new(status: RelationshipStatus, payment_confirmed: bool, today: NaiveDate) -> Self {
        Self {
            status,
            payment_confirmed,
            membership_start: (status == RelationshipStatus::Active).then_some(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        let labels: Vec<_> = RelationshipStatus::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Aktivan", "Čeka uplatu", "Čeka trening", "Neaktivan"]
        );
    }

    #[test]
    fn test_status_round_trips_through_wire_name() {
        for status in RelationshipStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<RelationshipStatus>().unwrap(), status);
        }
        assert!("pending".parse::<RelationshipStatus>().is_err());
    }

    #[test]
    fn test_status_update_membership_start() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let active = StatusUpdate::new(RelationshipStatus::Active, true, today);
        assert_eq!(active.membership_start, Some(today));

        let waiting = StatusUpdate::new(RelationshipStatus::WaitingTraining, true, today);
        assert_eq!(waiting.membership_start, None);
        let json = serde_json::to_value(&waiting).unwrap();
        assert!(json["membership_start"].is_null());
    }
}
