//! Grouping of a property's rooms into category × type buckets

use std::collections::BTreeMap;

use serde::Serialize;
use url::form_urlencoded;

use crate::models::Room;

pub const DEFAULT_CATEGORY: &str = "Classic";
pub const DEFAULT_ROOM_TYPE: &str = "Single";

/// Display grouping of rooms sharing a category and type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomCategoryBucket {
    pub category: String,
    pub room_type: String,
    /// `"{category} - {type}"`
    pub key: String,
    /// Member room ids, in input order
    pub room_ids: Vec<i64>,
    pub count: usize,
    pub has_available: bool,
    /// Cheapest `base_rent` among available members
    pub lowest_price: Option<f64>,
    pub image: String,
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

/// Bucket key of a room, with defaults applied
pub fn bucket_key(room: &Room) -> (String, String) {
    (
        or_default(room.room_category.as_deref(), DEFAULT_CATEGORY).to_string(),
        or_default(room.room_type.as_deref(), DEFAULT_ROOM_TYPE).to_string(),
    )
}

/// Deterministic placeholder image for a bucket key
pub fn placeholder_image(base: &str, key: &str) -> String {
    let text: String = form_urlencoded::byte_serialize(key.as_bytes()).collect();
    format!("{}?text={}", base.trim_end_matches('/'), text)
}

/// Groups `rooms` into buckets sorted by (category, type).
///
/// Every room lands in exactly one bucket. Rooms without a category or type
/// fall into the `Classic - Single` bucket.
pub fn categorize_rooms(rooms: &[Room], placeholder_base: &str) -> Vec<RoomCategoryBucket> {
    // BTreeMap over (category, type) gives the ordinal sort for free.
    let mut groups: BTreeMap<(String, String), Vec<&Room>> = BTreeMap::new();
    for room in rooms {
        groups.entry(bucket_key(room)).or_default().push(room);
    }

    groups
        .into_iter()
        .map(|((category, room_type), members)| {
            let key = format!("{} - {}", category, room_type);
            let has_available = members.iter().any(|r| r.is_available());
            let lowest_price = members
                .iter()
                .filter(|r| r.is_available())
                .filter_map(|r| r.base_rent)
                .filter(|rent| rent.is_finite())
                .fold(None, |min: Option<f64>, rent| {
                    Some(min.map_or(rent, |m| m.min(rent)))
                });
            let image = members
                .first()
                .and_then(|r| r.images.first())
                .cloned()
                .unwrap_or_else(|| placeholder_image(placeholder_base, &key));

            RoomCategoryBucket {
                room_ids: members.iter().map(|r| r.id).collect(),
                count: members.len(),
                category,
                room_type,
                key,
                has_available,
                lowest_price,
                image,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomStatus;

    const BASE: &str = "https://placehold.co/600x400";

    fn room(id: i64, category: Option<&str>, room_type: Option<&str>, status: &str, rent: Option<f64>) -> Room {
        Room {
            id,
            room_category: category.map(str::to_string),
            room_type: room_type.map(str::to_string),
            status: RoomStatus::from(status.to_string()),
            base_rent: rent,
            ..Default::default()
        }
    }

    #[test]
    fn classic_single_example() {
        let rooms = vec![
            room(1, Some("Classic"), Some("Single"), "available", Some(5000.0)),
            room(2, Some("Classic"), Some("Single"), "occupied", Some(4000.0)),
        ];
        let buckets = categorize_rooms(&rooms, BASE);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "Classic - Single");
        assert_eq!(buckets[0].count, 2);
        assert!(buckets[0].has_available);
        assert_eq!(buckets[0].lowest_price, Some(5000.0));
    }

    #[test]
    fn every_room_in_exactly_one_bucket() {
        let rooms = vec![
            room(1, Some("Deluxe"), Some("Double"), "available", Some(9000.0)),
            room(2, None, None, "occupied", None),
            room(3, Some("Classic"), Some("Single"), "available", Some(4500.0)),
            room(4, Some("Deluxe"), Some("Double"), "maintenance", Some(8000.0)),
            room(5, Some(""), Some("Triple"), "available", Some(3000.0)),
        ];
        let buckets = categorize_rooms(&rooms, BASE);

        let mut seen: Vec<i64> = buckets.iter().flat_map(|b| b.room_ids.clone()).collect();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), rooms.len());
    }

    #[test]
    fn missing_fields_fold_into_default_bucket() {
        let rooms = vec![
            room(1, None, None, "available", Some(4200.0)),
            room(2, Some("Classic"), Some("  "), "available", Some(4100.0)),
            room(3, Some("Classic"), Some("Single"), "occupied", Some(1000.0)),
        ];
        let buckets = categorize_rooms(&rooms, BASE);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].category, DEFAULT_CATEGORY);
        assert_eq!(buckets[0].room_type, DEFAULT_ROOM_TYPE);
        assert_eq!(buckets[0].room_ids, vec![1, 2, 3]);
        assert_eq!(buckets[0].lowest_price, Some(4100.0));
    }

    #[test]
    fn no_available_rooms_means_no_price() {
        let rooms = vec![
            room(1, Some("Premium"), Some("Single"), "occupied", Some(7000.0)),
            room(2, Some("Premium"), Some("Single"), "Available", Some(6000.0)),
        ];
        let buckets = categorize_rooms(&rooms, BASE);

        assert!(!buckets[0].has_available);
        assert_eq!(buckets[0].lowest_price, None);
    }

    #[test]
    fn available_rooms_without_rent_are_excluded_from_min() {
        let rooms = vec![
            room(1, Some("Classic"), Some("Double"), "available", None),
            room(2, Some("Classic"), Some("Double"), "available", Some(6500.0)),
            room(3, Some("Classic"), Some("Double"), "available", Some(f64::NAN)),
        ];
        let buckets = categorize_rooms(&rooms, BASE);
        assert_eq!(buckets[0].lowest_price, Some(6500.0));
    }

    #[test]
    fn sorted_by_category_then_type_ordinally() {
        let rooms = vec![
            room(1, Some("deluxe"), Some("Single"), "available", Some(1.0)),
            room(2, Some("Deluxe"), Some("Triple"), "available", Some(1.0)),
            room(3, Some("Deluxe"), Some("Double"), "available", Some(1.0)),
            room(4, Some("Classic"), Some("Single"), "available", Some(1.0)),
        ];
        let keys: Vec<String> = categorize_rooms(&rooms, BASE).into_iter().map(|b| b.key).collect();
        assert_eq!(
            keys,
            vec![
                "Classic - Single",
                "Deluxe - Double",
                "Deluxe - Triple",
                "deluxe - Single",
            ]
        );
    }

    #[test]
    fn image_from_first_room_or_placeholder() {
        let mut first = room(1, Some("Deluxe"), Some("Double"), "available", Some(1.0));
        first.images = vec!["https://cdn.example.com/r1.jpg".to_string()];
        let mut second = room(2, Some("Deluxe"), Some("Double"), "available", Some(1.0));
        second.images = vec!["https://cdn.example.com/r2.jpg".to_string()];
        let plain = room(3, Some("Classic"), Some("Single"), "available", Some(1.0));

        let buckets = categorize_rooms(&[plain, first, second], BASE);
        assert_eq!(buckets[0].image, "https://placehold.co/600x400?text=Classic+-+Single");
        assert_eq!(buckets[1].image, "https://cdn.example.com/r1.jpg");
    }

    #[test]
    fn empty_input() {
        assert!(categorize_rooms(&[], BASE).is_empty());
    }
}
