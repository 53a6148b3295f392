//! Properties and the rooms they own

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::de;

/// A PG property as the listing API returns it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de::vec_or_empty")]
    pub images: Vec<String>,
    /// Nested rooms. Empty when the API links rooms instead of embedding them.
    #[serde(default, deserialize_with = "de::vec_or_empty")]
    pub rooms: Vec<Room>,
}

/// Occupancy status of a room
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
    /// Anything else the backend sends, kept verbatim
    Other(String),
}

impl RoomStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::Reserved => "reserved",
            RoomStatus::Other(other) => other,
        }
    }

    pub fn is_available(&self) -> bool {
        *self == RoomStatus::Available
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Other(String::new())
    }
}

// Matching is exact: "Available" is not "available".
impl From<String> for RoomStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "available" => RoomStatus::Available,
            "occupied" => RoomStatus::Occupied,
            "maintenance" => RoomStatus::Maintenance,
            "reserved" => RoomStatus::Reserved,
            _ => RoomStatus::Other(value),
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RoomStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoomStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(RoomStatus::from).unwrap_or_default())
    }
}

/// Boolean amenity flags carried by every room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Ac,
    Tv,
    Furnished,
    Internet,
    Balcony,
    PrivateBathroom,
}

impl Amenity {
    pub const ALL: [Amenity; 6] = [
        Amenity::Ac,
        Amenity::Tv,
        Amenity::Furnished,
        Amenity::Internet,
        Amenity::Balcony,
        Amenity::PrivateBathroom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Amenity::Ac => "ac",
            Amenity::Tv => "tv",
            Amenity::Furnished => "furnished",
            Amenity::Internet => "internet",
            Amenity::Balcony => "balcony",
            Amenity::PrivateBathroom => "private_bathroom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Amenity::Ac => "Air conditioning",
            Amenity::Tv => "TV",
            Amenity::Furnished => "Furnished",
            Amenity::Internet => "Wi-Fi",
            Amenity::Balcony => "Balcony",
            Amenity::PrivateBathroom => "Private bathroom",
        }
    }
}

/// A single rentable room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub property_id: Option<i64>,
    #[serde(default)]
    pub room_no: Option<String>,
    #[serde(default)]
    pub room_category: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub status: RoomStatus,

    #[serde(default, deserialize_with = "de::opt_f64")]
    pub base_rent: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub security_deposit: Option<f64>,

    // Per-duration prices
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub daily_rent: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub weekly_rent: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub monthly_rent: Option<f64>,

    // Meal-plan prices
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub rent_with_breakfast: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub rent_with_two_meals: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub rent_with_all_meals: Option<f64>,

    #[serde(default, deserialize_with = "de::flag")]
    pub ac: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub tv: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub furnished: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub internet: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub balcony: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub private_bathroom: bool,

    #[serde(default, deserialize_with = "de::opt_f64")]
    pub area_sqft: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub floor: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::vec_or_empty")]
    pub images: Vec<String>,
}

impl Room {
    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Ac => self.ac,
            Amenity::Tv => self.tv,
            Amenity::Furnished => self.furnished,
            Amenity::Internet => self.internet,
            Amenity::Balcony => self.balcony,
            Amenity::PrivateBathroom => self.private_bathroom,
        }
    }

    pub fn amenities(&self) -> Vec<Amenity> {
        Amenity::ALL.iter().copied().filter(|a| self.has(*a)).collect()
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn room_from_loose_json() {
        let room: Room = serde_json::from_value(json!({
            "id": 12,
            "property_id": "3",
            "room_no": "101",
            "room_category": "Deluxe",
            "room_type": "Double",
            "status": "available",
            "base_rent": "7500.00",
            "security_deposit": 15000,
            "ac": 1,
            "tv": "0",
            "private_bathroom": true,
            "images": null
        }))
        .unwrap();

        assert_eq!(room.property_id, Some(3));
        assert_eq!(room.base_rent, Some(7500.0));
        assert!(room.is_available());
        assert_eq!(room.amenities(), vec![Amenity::Ac, Amenity::PrivateBathroom]);
        assert!(room.images.is_empty());
    }

    #[test]
    fn status_is_case_sensitive() {
        assert_eq!(RoomStatus::from("available".to_string()), RoomStatus::Available);
        assert_eq!(
            RoomStatus::from("Available".to_string()),
            RoomStatus::Other("Available".to_string())
        );
        let room: Room = serde_json::from_value(json!({"id": 1, "status": null})).unwrap();
        assert!(!room.is_available());
    }

    #[test]
    fn property_without_rooms() {
        let property: Property =
            serde_json::from_value(json!({"id": 4, "name": "Green Nest", "rooms": null})).unwrap();
        assert!(property.rooms.is_empty());
        assert!(property.images.is_empty());
    }
}
