//! Configuration for the PgStay client

use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "PGSTAY_API_URL";

/// Environment variable holding an optional request timeout in seconds
pub const REQUEST_TIMEOUT_ENV: &str = "PGSTAY_REQUEST_TIMEOUT_SECS";

/// Configuration options for the PgStay client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout, `None` keeps the transport default
    pub request_timeout: Option<Duration>,

    /// Value sent in the `X-Client-Info` header
    pub client_info: String,

    /// Base URL for generated room placeholder images
    pub placeholder_image_base: String,

    /// Message shown when a failed call carries no server message
    pub generic_error_message: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: None,
            client_info: format!("pgstay-client/{}", env!("CARGO_PKG_VERSION")),
            placeholder_image_base: "https://placehold.co/600x400".to_string(),
            generic_error_message: crate::error::GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Set the placeholder image base URL
    pub fn with_placeholder_image_base(mut self, value: &str) -> Self {
        self.placeholder_image_base = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the generic error message
    pub fn with_generic_error_message(mut self, value: &str) -> Self {
        self.generic_error_message = value.to_string();
        self
    }
}

/// Connection settings: where the API lives plus client options
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub options: ClientOptions,
}

impl Config {
    /// Creates a new configuration, validating the URL.
    pub fn new(api_url: &str) -> Result<Self> {
        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(Error::config(format!("{} cannot be used as a base URL", api_url)));
        }
        Ok(Self {
            api_url,
            options: ClientOptions::default(),
        })
    }

    /// Attempts to create configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var(API_URL_ENV)
            .map_err(|_| Error::config(format!("{} environment variable not found", API_URL_ENV)))?;
        let mut config = Self::new(&api_url)?;

        if let Ok(raw) = std::env::var(REQUEST_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a whole number of seconds", REQUEST_TIMEOUT_ENV))
            })?;
            config.options = config
                .options
                .with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(config)
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }
}
