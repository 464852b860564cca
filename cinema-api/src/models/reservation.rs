use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub showtime_id: i64,
    pub seat_ids: Vec<i64>,
}

/// A timed seat hold. Expiry is enforced by the backend; `expires_at` is
/// only informational here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub showtime_id: i64,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub seat_ids: Vec<i64>,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status == "ACTIVE"
    }

    /// Whole seconds left on the hold, clamped at zero.
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn remaining_time_never_goes_negative() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 20, 0, 0).single();
        let Some(now) = now else {
            panic!("valid timestamp");
        };
        let hold = Reservation {
            id: 22,
            showtime_id: 8,
            status: "ACTIVE".to_string(),
            expires_at: now + Duration::seconds(90),
            seat_ids: vec![3, 4],
        };

        assert_eq!(hold.seconds_remaining(now), 90);
        assert_eq!(hold.seconds_remaining(now + Duration::minutes(5)), 0);
        assert!(hold.is_active());
    }
}
