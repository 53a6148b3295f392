use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /book-tenant`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub room_id: i64,
    pub property_id: i64,
    pub lease_start_date: NaiveDate,
    pub lease_end_date: NaiveDate,
    pub rent_amount: f64,
    pub security_deposit: f64,
    pub payment_due_day: u8,
    #[serde(default)]
    pub notes: String,
}

/// Body of `POST /contact`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// What the API answers after a successful submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub message: Option<String>,
}

impl Confirmation {
    /// Reads `message` from any JSON answer, wrapped in `data` or not
    pub fn from_value(value: &serde_json::Value) -> Self {
        let message = value
            .get("message")
            .or_else(|| value.get("data").and_then(|d| d.get("message")))
            .and_then(|m| m.as_str())
            .map(str::to_string);
        Self { message }
    }
}
