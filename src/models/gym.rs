// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gym memberships and visits.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Profile;

/// Days before the end date at which a membership counts as expiring.
pub const EXPIRING_WINDOW_DAYS: i64 = 7;

/// Row in `gym_memberships`, with the member profile embedded for the
/// trainer's overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymMembership {
    pub id: Uuid,
    pub client_id: Uuid,
    pub membership_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub client: Option<Profile>,
}

impl GymMembership {
    /// Whole days from `today` until the end date (negative once past).
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days()
    }

    pub fn status(&self, today: NaiveDate) -> MembershipStatus {
        MembershipStatus::classify(self.days_left(today))
    }

    /// The membership that continues this one.
    ///
    /// Same type and length; starts the day after the current end, or today
    /// when the current one has already run out.
    pub fn renewal(&self, today: NaiveDate) -> NewGymMembership {
        let length = (self.end_date - self.start_date).max(Duration::days(1));
        let start_date = if self.end_date < today {
            today
        } else {
            self.end_date + Duration::days(1)
        };
        NewGymMembership {
            client_id: self.client_id,
            membership_type: self.membership_type.clone(),
            start_date,
            end_date: start_date + length,
        }
    }
}

/// Membership state derived from the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Expiring,
    Expired,
}

impl MembershipStatus {
    /// Past end ⇒ expired; at most seven days left ⇒ expiring.
    pub fn classify(days_left: i64) -> Self {
        if days_left < 0 {
            MembershipStatus::Expired
        } else if days_left <= EXPIRING_WINDOW_DAYS {
            MembershipStatus::Expiring
        } else {
            MembershipStatus::Active
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "Aktivna",
            MembershipStatus::Expiring => "Ističe uskoro",
            MembershipStatus::Expired => "Istekla",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Expiring => "expiring",
            MembershipStatus::Expired => "expired",
        }
    }
}

/// Insert payload for `gym_memberships`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGymMembership {
    pub client_id: Uuid,
    pub membership_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Row in `gym_visits`: a check-in/check-out pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymVisit {
    pub id: Uuid,
    pub client_id: Uuid,
    pub check_in_time: DateTime<Utc>,
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
}

impl GymVisit {
    /// Rounded visit length in minutes; `None` while still checked in.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.check_out_time.map(|out| {
            let seconds = (out - self.check_in_time).num_seconds();
            (seconds as f64 / 60.0).round() as i64
        })
    }
}

/// Insert payload for `gym_visits`; check-in time is set by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewGymVisit {
    pub client_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn membership(start: NaiveDate, end: NaiveDate) -> GymMembership {
        GymMembership {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            membership_type: "Mesečna".to_string(),
            start_date: start,
            end_date: end,
            created_at: None,
            client: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(MembershipStatus::classify(-1), MembershipStatus::Expired);
        assert_eq!(MembershipStatus::classify(0), MembershipStatus::Expiring);
        assert_eq!(MembershipStatus::classify(7), MembershipStatus::Expiring);
        assert_eq!(MembershipStatus::classify(8), MembershipStatus::Active);
    }

    #[test]
    fn test_status_from_end_date() {
        let today = date(2024, 6, 1);
        let m = membership(date(2024, 5, 1), date(2024, 6, 8));
        assert_eq!(m.days_left(today), 7);
        assert_eq!(m.status(today), MembershipStatus::Expiring);

        let m = membership(date(2024, 5, 1), date(2024, 6, 9));
        assert_eq!(m.status(today), MembershipStatus::Active);

        let m = membership(date(2024, 4, 1), date(2024, 5, 31));
        assert_eq!(m.status(today), MembershipStatus::Expired);
        assert_eq!(m.status(today).label(), "Istekla");
    }

    #[test]
    fn test_renewal_continues_after_end() {
        let today = date(2024, 6, 1);
        let m = membership(date(2024, 5, 5), date(2024, 6, 4));
        let next = m.renewal(today);
        assert_eq!(next.start_date, date(2024, 6, 5));
        assert_eq!(next.end_date, date(2024, 7, 5));
        assert_eq!(next.membership_type, "Mesečna");
    }

    #[test]
    fn test_renewal_of_expired_starts_today() {
        let today = date(2024, 6, 10);
        let m = membership(date(2024, 5, 1), date(2024, 5, 31));
        let next = m.renewal(today);
        assert_eq!(next.start_date, today);
        assert_eq!(next.end_date, date(2024, 7, 10));
    }

    #[test]
    fn test_visit_duration() {
        let check_in = Utc.with_ymd_and_hms(2024, 6, 1, 17, 0, 0).unwrap();
        let mut visit = GymVisit {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            check_in_time: check_in,
            check_out_time: None,
        };
        assert_eq!(visit.duration_minutes(), None);
        visit.check_out_time = Some(check_in + Duration::seconds(75 * 60 + 40));
        assert_eq!(visit.duration_minutes(), Some(76));
    }
}
