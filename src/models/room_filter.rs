use serde::{Deserialize, Serialize};

use super::{Amenity, RecordStatus};

/// Admin-managed browse filter offered on the room listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub amenity: Amenity,
    #[serde(default)]
    pub status: RecordStatus,
}

impl Default for RoomFilter {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            amenity: Amenity::Ac,
            status: RecordStatus::Active,
        }
    }
}
