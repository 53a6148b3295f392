//! Meal-tariff master screen

use serde::Serialize;

use super::{CrudScreen, Resource};
use crate::forms::ValidationErrors;
use crate::models::{MealTariff, Property};

impl Resource for MealTariff {
    const PATH: &'static str = "/meal-tariff-master";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self, others: &[Self]) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match self.property_id {
            None => errors.add("property_id", "Select a property"),
            Some(property_id) => {
                // One active tariff per property. The API does not enforce this.
                if self.status.is_active() && has_active_tariff(others, property_id) {
                    errors.add("property_id", "This property already has an active tariff");
                }
            }
        }

        for (field, price) in [
            ("breakfast_price", self.breakfast_price),
            ("lunch_price", self.lunch_price),
            ("dinner_price", self.dinner_price),
        ] {
            if !price.is_finite() || price < 0.0 {
                errors.add(field, "Price cannot be negative");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn has_active_tariff(tariffs: &[MealTariff], property_id: i64) -> bool {
    tariffs
        .iter()
        .any(|t| t.status.is_active() && t.property_id == Some(property_id))
}

/// One entry of the property select in the tariff modal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyOption {
    pub property_id: i64,
    pub label: String,
    pub disabled: bool,
}

/// Properties for the select, with those already holding an active tariff
/// disabled. The tariff being edited does not block its own property.
pub fn tariff_property_options(
    properties: &[Property],
    tariffs: &[MealTariff],
    editing_id: Option<i64>,
) -> Vec<PropertyOption> {
    let others: Vec<MealTariff> = tariffs
        .iter()
        .filter(|t| editing_id.is_none() || t.id != editing_id)
        .cloned()
        .collect();

    properties
        .iter()
        .map(|p| PropertyOption {
            property_id: p.id,
            label: match &p.location {
                Some(location) if !location.is_empty() => format!("{} ({})", p.name, location),
                _ => p.name.clone(),
            },
            disabled: has_active_tariff(&others, p.id),
        })
        .collect()
}

impl CrudScreen<MealTariff> {
    /// Property select options for the currently open editor
    pub fn property_options(&self, properties: &[Property]) -> Vec<PropertyOption> {
        let editing_id = self.editor().and_then(|e| e.editing_id);
        tariff_property_options(properties, self.records(), editing_id)
    }
}
