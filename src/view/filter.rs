// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-list and membership-table filters.
//!
//! Filters run over the fetched records before rendering, so the markup
//! never has to be read back.

use crate::models::{GymMembership, MembershipStatus, RelationshipStatus, TrainerClientRelationship};
use chrono::NaiveDate;
use std::str::FromStr;

/// Client-list filter on the trainer dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientFilter {
    #[default]
    All,
    /// Clients currently training (active relationships).
    WithTraining,
    WaitingTraining,
    WaitingPayment,
}

impl ClientFilter {
    pub const ALL: [ClientFilter; 4] = [
        ClientFilter::All,
        ClientFilter::WithTraining,
        ClientFilter::WaitingTraining,
        ClientFilter::WaitingPayment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientFilter::All => "all",
            ClientFilter::WithTraining => "with_training",
            ClientFilter::WaitingTraining => "waiting_training",
            ClientFilter::WaitingPayment => "waiting_payment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClientFilter::All => "Svi klijenti",
            ClientFilter::WithTraining => "Sa treningom",
            ClientFilter::WaitingTraining => "Čekaju trening",
            ClientFilter::WaitingPayment => "Čekaju uplatu",
        }
    }

    pub fn matches(&self, status: RelationshipStatus) -> bool {
        match self {
            ClientFilter::All => true,
            ClientFilter::WithTraining => status == RelationshipStatus::Active,
            ClientFilter::WaitingTraining => status == RelationshipStatus::WaitingTraining,
            ClientFilter::WaitingPayment => status == RelationshipStatus::WaitingPayment,
        }
    }

    pub fn apply<'a>(
        &self,
        clients: &'a [TrainerClientRelationship],
    ) -> Vec<&'a TrainerClientRelationship> {
        clients.iter().filter(|c| self.matches(c.status)).collect()
    }
}

impl FromStr for ClientFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| format!("unknown client filter '{s}'"))
    }
}

/// Membership-table filter on the trainer's gym section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GymFilter {
    #[default]
    All,
    Active,
    Expired,
    Expiring,
}

impl GymFilter {
    pub const ALL: [GymFilter; 4] = [
        GymFilter::All,
        GymFilter::Active,
        GymFilter::Expired,
        GymFilter::Expiring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GymFilter::All => "all",
            GymFilter::Active => "active",
            GymFilter::Expired => "expired",
            GymFilter::Expiring => "expiring",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GymFilter::All => "Sve članarine",
            GymFilter::Active => "Aktivne",
            GymFilter::Expired => "Istekle",
            GymFilter::Expiring => "Ističu uskoro",
        }
    }

    pub fn matches(&self, status: MembershipStatus) -> bool {
        match self {
            GymFilter::All => true,
            GymFilter::Active => status == MembershipStatus::Active,
            GymFilter::Expired => status == MembershipStatus::Expired,
            GymFilter::Expiring => status == MembershipStatus::Expiring,
        }
    }

    pub fn apply<'a>(
        &self,
        memberships: &'a [GymMembership],
        today: NaiveDate,
    ) -> Vec<&'a GymMembership> {
        memberships
            .iter()
            .filter(|m| self.matches(m.status(today)))
            .collect()
    }
}

impl FromStr for GymFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| format!("unknown gym filter '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use chrono::Duration;
    use uuid::Uuid;

    fn relationship(status: RelationshipStatus) -> TrainerClientRelationship {
        let client_id = Uuid::new_v4();
        TrainerClientRelationship {
            id: Uuid::new_v4(),
            trainer_id: Uuid::new_v4(),
            client_id,
            status,
            payment_confirmed: false,
            membership_start: None,
            client: Some(Profile {
                id: client_id,
                email: "k@example.com".to_string(),
                full_name: None,
                role: None,
            }),
        }
    }

    #[test]
    fn test_client_filter_waiting_payment() {
        let clients: Vec<_> = [
            RelationshipStatus::Active,
            RelationshipStatus::WaitingPayment,
            RelationshipStatus::WaitingTraining,
            RelationshipStatus::WaitingPayment,
            RelationshipStatus::Inactive,
        ]
        .into_iter()
        .map(relationship)
        .collect();

        let shown = ClientFilter::WaitingPayment.apply(&clients);
        assert_eq!(shown.len(), 2);
        assert!(shown
            .iter()
            .all(|c| c.status == RelationshipStatus::WaitingPayment));

        assert_eq!(ClientFilter::All.apply(&clients).len(), 5);
        assert_eq!(ClientFilter::WithTraining.apply(&clients).len(), 1);
    }

    #[test]
    fn test_gym_filter_boundaries() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let memberships: Vec<_> = [-1, 0, 7, 8]
            .into_iter()
            .map(|days| GymMembership {
                id: Uuid::new_v4(),
                client_id: Uuid::new_v4(),
                membership_type: "Mesečna".to_string(),
                start_date: today - Duration::days(30),
                end_date: today + Duration::days(days),
                created_at: None,
                client: None,
            })
            .collect();

        assert_eq!(GymFilter::Expired.apply(&memberships, today).len(), 1);
        assert_eq!(GymFilter::Expiring.apply(&memberships, today).len(), 2);
        assert_eq!(GymFilter::Active.apply(&memberships, today).len(), 1);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(
            "waiting_payment".parse::<ClientFilter>().unwrap(),
            ClientFilter::WaitingPayment
        );
        assert_eq!("expiring".parse::<GymFilter>().unwrap(), GymFilter::Expiring);
        assert!("everyone".parse::<ClientFilter>().is_err());
    }
}
