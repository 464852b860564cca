use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyTicket {
    pub ticket_id: i64,
    pub order_id: i64,
    pub qr_token: String,
    pub ticket_status: String,
    pub seat_code: String,
    pub seat_type: String,
    pub movie_title: String,
    pub theater_name: String,
    pub showtime_id: i64,
    pub showtime_starts_at: DateTime<Utc>,
    pub showtime_ends_at: Option<DateTime<Utc>>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyTicketListResponse {
    pub items: Vec<MyTicket>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyOrder {
    pub order_id: i64,
    pub reservation_id: i64,
    pub showtime_id: i64,
    pub status: String,
    pub total_cents: i64,
    pub currency: String,
    pub provider: String,
    pub ticket_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyOrderListResponse {
    pub items: Vec<MyOrder>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: i64,
    pub title: String,
    pub description: String,
    pub runtime_minutes: i64,
    pub rating: String,
    pub release_date: Option<NaiveDate>,
    pub poster_url: Option<String>,
    pub next_showtime_starts_at: DateTime<Utc>,
    pub reason: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationListResponse {
    pub items: Vec<Recommendation>,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationFeedbackKind {
    NotInterested,
    SaveForLater,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationFeedback {
    pub movie_id: i64,
    pub event_type: RecommendationFeedbackKind,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationFeedbackRead {
    pub movie_id: i64,
    pub event_type: RecommendationFeedbackKind,
    pub active: bool,
    pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationEventKind {
    Impression,
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEvent {
    pub movie_id: i64,
    pub event_type: RecommendationEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEventRead {
    pub movie_id: i64,
    pub event_type: RecommendationEventKind,
    pub recorded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketScanRequest {
    pub qr_token: String,
}

/// Outcome of a staff scan. `result` is the backend's verdict
/// (`VALID`, `ALREADY_USED`, ...) and `message` is meant for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketScanResponse {
    pub result: String,
    pub ticket_id: Option<i64>,
    pub order_id: Option<i64>,
    pub showtime_id: Option<i64>,
    pub seat_code: Option<String>,
    pub used_at: Option<DateTime<Utc>>,
    pub message: String,
}

impl TicketScanResponse {
    pub fn is_valid(&self) -> bool {
        self.result == "VALID"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowtimeSales {
    pub showtime_id: i64,
    pub movie_title: String,
    pub theater_name: String,
    pub starts_at: DateTime<Utc>,
    pub sold_seats: i64,
    pub capacity: i64,
    pub occupancy_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub paid_orders: i64,
    pub gross_revenue_cents: i64,
    #[serde(default)]
    pub tickets_sold: i64,
    #[serde(default)]
    pub active_holds: i64,
    #[serde(default)]
    pub showtimes: Vec<ShowtimeSales>,
    #[serde(default)]
    pub recommendation_impressions: i64,
    #[serde(default)]
    pub recommendation_clicks: i64,
    #[serde(default)]
    pub recommendation_saved: i64,
    #[serde(default)]
    pub recommendation_hidden: i64,
    #[serde(default)]
    pub recommendation_ctr_percent: f64,
    #[serde(default)]
    pub recommendation_save_rate_percent: f64,
    #[serde(default)]
    pub recommendation_hide_rate_percent: f64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn feedback_kinds_use_backend_spelling() {
        let body = serde_json::to_value(RecommendationFeedback {
            movie_id: 4,
            event_type: RecommendationFeedbackKind::NotInterested,
            active: true,
        })
        .expect("serializable");

        assert_eq!(
            body,
            json!({"movie_id": 4, "event_type": "NOT_INTERESTED", "active": true})
        );
    }

    #[test]
    fn sparse_sales_report_fills_defaults() {
        let report: SalesReport = serde_json::from_value(json!({
            "paid_orders": 0,
            "gross_revenue_cents": 0,
            "showtimes": []
        }))
        .expect("valid report");

        assert_eq!(report.tickets_sold, 0);
        assert_eq!(report.recommendation_ctr_percent, 0.0);
    }
}
