//! Thin JSON client over the rental API's base URL

use log::debug;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::auth::SessionStore;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::fetch::{FetchBuilder, ItemResponse, ListResponse};

/// Issues requests against the configured base URL.
///
/// Every failure surfaces immediately: there are no retries and no backoff.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: Client,
    options: ClientOptions,
    session: SessionStore,
}

impl ApiClient {
    pub(crate) fn new(
        base_url: &str,
        http_client: Client,
        options: ClientOptions,
        session: SessionStore,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            options,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Absolute URL for an API path such as `/properties/3`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn builder(&self, method: Method, path: &str) -> FetchBuilder<'_> {
        let url = self.url(path);
        let mut builder = FetchBuilder::new(&self.http_client, &url, method)
            .header("X-Client-Info", &self.options.client_info);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(&token);
        }
        builder
    }

    /// `request(method, path, body?)`: the raw JSON answer or an error
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let mut builder = self.builder(method, path);
        if let Some(body) = body {
            builder = builder.json(body)?;
        }
        builder.execute_value().await
    }

    /// GET a single record, unwrapping `{"data": ...}` when present
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .builder(Method::GET, path)
            .execute::<ItemResponse<T>>()
            .await?;
        Ok(response.into_inner())
    }

    /// GET a list, accepting both a bare array and `{"data": [...]}`
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        self.list_with_query(path, HashMap::new()).await
    }

    pub async fn list_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: HashMap<String, String>,
    ) -> Result<Vec<T>> {
        let mut builder = self.builder(Method::GET, path);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let items = builder.execute::<ListResponse>().await?.into_items()?;
        debug!("{} returned {} records", path, items.len());
        Ok(items)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request::<Value>(Method::DELETE, path, None).await
    }
}
