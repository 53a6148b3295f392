//! PgStay Rust Client Library
//!
//! A Rust client for the PgStay paying-guest rental API: property and room
//! browsing, the room bucket view model, booking/contact/auth forms, and the
//! admin master-data screens.

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod rooms;
pub mod routes;

use reqwest::Client;

use crate::admin::{CrudClient, CrudScreen, DashboardStats};
use crate::api::ApiClient;
use crate::auth::{HttpAuthProvider, SessionStore};
use crate::config::{ClientOptions, Config};
use crate::error::Result;
use crate::forms::{BookingsClient, ContactClient};
use crate::models::{MealTariff, RoomFilter};
use crate::rooms::{PropertiesClient, RoomsClient};

/// The main entry point for the PgStay client
#[derive(Clone)]
pub struct PgStay {
    api: ApiClient,
    session: SessionStore,
}

impl PgStay {
    /// Create a new client with default options
    ///
    /// # Example
    ///
    /// ```
    /// use pgstay_client::PgStay;
    ///
    /// let pgstay = PgStay::new("https://api.pgstay.example.com").unwrap();
    /// ```
    pub fn new(api_url: &str) -> Result<Self> {
        Self::from_config(Config::new(api_url)?)
    }

    /// Create a new client with custom options
    pub fn new_with_options(api_url: &str, options: ClientOptions) -> Result<Self> {
        Self::from_config(Config::new(api_url)?.with_options(options))
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let session = SessionStore::default();
        let api = ApiClient::new(
            config.api_url.as_str(),
            http_client,
            config.options,
            session.clone(),
        );
        Ok(Self { api, session })
    }

    /// The raw JSON client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn options(&self) -> &ClientOptions {
        self.api.options()
    }

    /// The session slot shared with every request this client makes
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn auth(&self) -> HttpAuthProvider {
        HttpAuthProvider::new(self.api.clone(), self.session.clone())
    }

    pub fn properties(&self) -> PropertiesClient {
        PropertiesClient::new(self.api.clone())
    }

    pub fn rooms(&self) -> RoomsClient {
        RoomsClient::new(self.api.clone())
    }

    pub fn bookings(&self) -> BookingsClient {
        BookingsClient::new(self.api.clone())
    }

    pub fn contact(&self) -> ContactClient {
        ContactClient::new(self.api.clone())
    }

    pub fn meal_tariffs(&self) -> CrudClient<MealTariff> {
        CrudClient::new(self.api.clone())
    }

    pub fn room_filters(&self) -> CrudClient<RoomFilter> {
        CrudClient::new(self.api.clone())
    }

    /// State for the meal-tariff master screen; call `load()` on mount
    pub fn meal_tariff_screen(&self) -> CrudScreen<MealTariff> {
        CrudScreen::new(self.meal_tariffs())
    }

    /// State for the room-filter master screen; call `load()` on mount
    pub fn room_filter_screen(&self) -> CrudScreen<RoomFilter> {
        CrudScreen::new(self.room_filters())
    }

    /// Occupancy summary across all properties
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let properties = self.properties().list().await?;
        Ok(DashboardStats::from_properties(&properties))
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::{ClientOptions, Config};
    pub use crate::context::AppContext;
    pub use crate::error::Error;
    pub use crate::forms::{Form, FormController, FormState};
    pub use crate::routes::Route;
    pub use crate::PgStay;
}
