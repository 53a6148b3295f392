//! Room-filter master screen

use super::Resource;
use crate::forms::ValidationErrors;
use crate::models::RoomFilter;

impl Resource for RoomFilter {
    const PATH: &'static str = "/room-filters";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self, others: &[Self]) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required");
        } else if others.iter().any(|f| f.name.trim().eq_ignore_ascii_case(name)) {
            errors.add("name", "A filter with this name already exists");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
