//! Client-side room filtering for the listing page

use std::collections::BTreeSet;

use crate::models::{Amenity, Room, RoomFilter};

/// Narrows a room list by availability, amenities and rent ceiling
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomQuery {
    available_only: bool,
    amenities: BTreeSet<Amenity>,
    max_rent: Option<f64>,
    category: Option<String>,
}

impl RoomQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available_only(mut self, value: bool) -> Self {
        self.available_only = value;
        self
    }

    /// Require an amenity
    pub fn with_amenity(mut self, amenity: Amenity) -> Self {
        self.amenities.insert(amenity);
        self
    }

    /// Require the amenities of the active admin filters the user ticked
    pub fn with_filters<'a, I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = &'a RoomFilter>,
    {
        self.amenities.extend(
            filters
                .into_iter()
                .filter(|f| f.status.is_active())
                .map(|f| f.amenity),
        );
        self
    }

    pub fn max_rent(mut self, value: f64) -> Self {
        self.max_rent = Some(value);
        self
    }

    pub fn category(mut self, value: &str) -> Self {
        self.category = Some(value.to_string());
        self
    }

    pub fn matches(&self, room: &Room) -> bool {
        if self.available_only && !room.is_available() {
            return false;
        }
        if !self.amenities.iter().all(|a| room.has(*a)) {
            return false;
        }
        if let Some(max) = self.max_rent {
            // Unpriced rooms cannot satisfy a ceiling.
            match room.base_rent {
                Some(rent) if rent <= max => {}
                _ => return false,
            }
        }
        if let Some(category) = &self.category {
            let (room_category, _) = super::catalog::bucket_key(room);
            if &room_category != category {
                return false;
            }
        }
        true
    }

    /// Rooms matching the query, in input order
    pub fn apply<'a>(&self, rooms: &'a [Room]) -> Vec<&'a Room> {
        rooms.iter().filter(|r| self.matches(r)).collect()
    }
}
