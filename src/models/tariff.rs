use serde::{Deserialize, Serialize};

use super::{de, RecordStatus};

/// Per-property meal pricing row of the meal-tariff master
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTariff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub property_id: Option<i64>,
    #[serde(default, deserialize_with = "de::f64_or_zero")]
    pub breakfast_price: f64,
    #[serde(default, deserialize_with = "de::f64_or_zero")]
    pub lunch_price: f64,
    #[serde(default, deserialize_with = "de::f64_or_zero")]
    pub dinner_price: f64,
    #[serde(default)]
    pub status: RecordStatus,
}

impl MealTariff {
    pub fn daily_total(&self) -> f64 {
        self.breakfast_price + self.lunch_price + self.dinner_price
    }
}
