use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_CHECKOUT_PROVIDER: &str = "MOCK_STRIPE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionCreate {
    pub reservation_id: i64,
    pub provider: String,
}

impl CheckoutSessionCreate {
    pub fn new(reservation_id: i64) -> Self {
        Self {
            reservation_id,
            provider: DEFAULT_CHECKOUT_PROVIDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub order_id: i64,
    pub reservation_id: i64,
    pub provider: String,
    pub provider_session_id: String,
    pub status: String,
    pub total_cents: i64,
    pub currency: String,
    pub checkout_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfirmRequest {
    pub order_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedTicket {
    pub id: i64,
    pub seat_id: i64,
    pub qr_token: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFinalize {
    pub order_id: i64,
    pub order_status: String,
    pub ticket_count: i64,
    #[serde(default)]
    pub tickets: Vec<IssuedTicket>,
}

/// Order state as polled while waiting for payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    #[serde(alias = "order_status")]
    pub status: String,
    #[serde(default)]
    pub reservation_id: Option<i64>,
    #[serde(default)]
    pub total_cents: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub ticket_count: i64,
    #[serde(default)]
    pub tickets: Vec<IssuedTicket>,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.status == "PAID"
    }
}
