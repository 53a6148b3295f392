//! Room listing, detail composition and the derived bucket view model

mod catalog;
mod query;

use log::debug;
use std::collections::HashMap;

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Property, Room};

pub use catalog::*;
pub use query::*;

/// Client for the room endpoints
#[derive(Clone)]
pub struct RoomsClient {
    api: ApiClient,
}

impl RoomsClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /rooms/{id}`
    pub async fn get(&self, id: i64) -> Result<Room> {
        self.api.get(&format!("/rooms/{}", id)).await
    }

    /// `GET /rooms?property_id={id}`
    pub async fn list_for_property(&self, property_id: i64) -> Result<Vec<Room>> {
        let mut query = HashMap::new();
        query.insert("property_id".to_string(), property_id.to_string());
        self.api.list_with_query("/rooms", query).await
    }
}

/// Client for the property endpoints
#[derive(Clone)]
pub struct PropertiesClient {
    api: ApiClient,
}

impl PropertiesClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /properties`
    pub async fn list(&self) -> Result<Vec<Property>> {
        self.api.list("/properties").await
    }

    /// `GET /properties/{id}`
    pub async fn get(&self, id: i64) -> Result<Property> {
        self.api.get(&format!("/properties/{}", id)).await
    }

    /// Property plus its buckets, fetching linked rooms when none are nested
    pub async fn detail(&self, id: i64) -> Result<PropertyDetail> {
        let mut property = self.get(id).await?;
        if property.rooms.is_empty() {
            debug!("property {} has no nested rooms, fetching linked rooms", id);
            property.rooms = RoomsClient::new(self.api.clone())
                .list_for_property(id)
                .await?;
        }
        Ok(PropertyDetail::new(
            property,
            &self.api.options().placeholder_image_base,
        ))
    }
}

/// View model of the property detail page
#[derive(Debug, Clone)]
pub struct PropertyDetail {
    pub property: Property,
    pub buckets: Vec<RoomCategoryBucket>,
}

impl PropertyDetail {
    pub fn new(property: Property, placeholder_base: &str) -> Self {
        let buckets = categorize_rooms(&property.rooms, placeholder_base);
        Self { property, buckets }
    }

    pub fn room(&self, id: i64) -> Option<&Room> {
        self.property.rooms.iter().find(|r| r.id == id)
    }

    /// Rooms belonging to one bucket, in listing order
    pub fn rooms_in(&self, bucket: &RoomCategoryBucket) -> Vec<&Room> {
        bucket.room_ids.iter().filter_map(|id| self.room(*id)).collect()
    }

    /// Cheapest available rent across the whole property
    pub fn starting_price(&self) -> Option<f64> {
        self.buckets
            .iter()
            .filter_map(|b| b.lowest_price)
            .fold(None, |min: Option<f64>, p| Some(min.map_or(p, |m| m.min(p))))
    }
}
