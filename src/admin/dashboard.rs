//! Occupancy summary for the admin dashboard

use serde::Serialize;

use crate::models::{Property, RoomStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub properties: usize,
    pub rooms: usize,
    pub available_rooms: usize,
    pub occupied_rooms: usize,
    /// Occupied share of all rooms, 0.0 to 1.0
    pub occupancy_rate: f64,
}

impl DashboardStats {
    pub fn from_properties(properties: &[Property]) -> Self {
        let rooms = properties.iter().flat_map(|p| p.rooms.iter());

        let mut stats = DashboardStats {
            properties: properties.len(),
            ..Default::default()
        };
        for room in rooms {
            stats.rooms += 1;
            match room.status {
                RoomStatus::Available => stats.available_rooms += 1,
                RoomStatus::Occupied => stats.occupied_rooms += 1,
                _ => {}
            }
        }
        if stats.rooms > 0 {
            stats.occupancy_rate = stats.occupied_rooms as f64 / stats.rooms as f64;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Room;

    #[test]
    fn counts_and_rate() {
        let properties = vec![
            Property {
                id: 1,
                name: "Sunrise PG".to_string(),
                rooms: vec![
                    Room { id: 1, status: RoomStatus::Occupied, ..Default::default() },
                    Room { id: 2, status: RoomStatus::Available, ..Default::default() },
                    Room { id: 3, status: RoomStatus::Maintenance, ..Default::default() },
                ],
                ..Default::default()
            },
            Property {
                id: 2,
                name: "Green Nest".to_string(),
                rooms: vec![Room { id: 4, status: RoomStatus::Occupied, ..Default::default() }],
                ..Default::default()
            },
        ];

        let stats = DashboardStats::from_properties(&properties);
        assert_eq!(stats.properties, 2);
        assert_eq!(stats.rooms, 4);
        assert_eq!(stats.available_rooms, 1);
        assert_eq!(stats.occupied_rooms, 2);
        assert_eq!(stats.occupancy_rate, 0.5);
    }

    #[test]
    fn empty_portfolio() {
        let stats = DashboardStats::from_properties(&[]);
        assert_eq!(stats.occupancy_rate, 0.0);
        assert_eq!(stats.rooms, 0);
    }
}
