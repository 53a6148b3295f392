//! Records exchanged with the rental API

pub(crate) mod de;
mod booking;
mod property;
mod room_filter;
mod tariff;

pub use booking::*;
pub use property::*;
pub use room_filter::*;
pub use tariff::*;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Active/inactive switch shared by the admin master records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        *self == RecordStatus::Active
    }
}

// Case-insensitive; booleans and 0/1 are accepted. Anything unrecognised
// counts as inactive, a missing or null value as active.
impl<'de> Deserialize<'de> for RecordStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let active = match Value::deserialize(deserializer)? {
            Value::Null => true,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_i64() == Some(1),
            Value::String(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "active" | "1" | "true"
            ),
            _ => false,
        };
        Ok(if active {
            RecordStatus::Active
        } else {
            RecordStatus::Inactive
        })
    }
}
