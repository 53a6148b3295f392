//! HTTP request building and the response-shape adapter

use log::{debug, warn};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

use crate::error::{Error, Result};

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Option<HashMap<String, String>>,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: None,
            body: None,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(_) => warn!("dropping header {}: value is not a valid header value", name),
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(mut self, token: &str) -> Self {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                self.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("dropping bearer token: it contains invalid header characters"),
        }
        self
    }

    /// Add query parameters to the request
    pub fn query(mut self, params: HashMap<String, String>) -> Self {
        self.query_params = Some(params);
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    fn build(&self) -> Result<RequestBuilder> {
        let mut url = Url::parse(&self.url)?;

        if let Some(params) = &self.query_params {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and return the body as JSON.
    ///
    /// An empty 2xx body decodes as `Value::Null`. Non-2xx answers become
    /// `Error::HttpStatus` carrying the server's message when there is one.
    pub async fn execute_value(&self) -> Result<Value> {
        let req = self.build()?;
        debug!("{} {}", self.method, self.url);

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("{} {} failed with status {}", self.method, self.url, status);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                message: server_message(&text),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute the request and parse the response into `T`
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.execute_value().await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Pulls `message` (or `error`) out of a JSON error body
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| v.as_str())
        .map(str::to_string)
}

/// A list endpoint answers either `[...]` or `{"data": [...]}`.
///
/// Only the envelope is matched here; rows are decoded one by one in
/// [`ListResponse::into_items`] so a bad row reports its own error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Bare(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl ListResponse {
    pub fn into_values(self) -> Vec<Value> {
        match self {
            ListResponse::Bare(items) => items,
            ListResponse::Wrapped { data } => data,
        }
    }

    /// Decode every row into `T`
    pub fn into_items<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        self.into_values()
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                serde_json::from_value(row).map_err(|err| {
                    warn!("list row {} could not be decoded: {}", index, err);
                    Error::from(err)
                })
            })
            .collect()
    }
}

/// A single-record endpoint answers either the record or `{"data": record}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemResponse<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemResponse<T> {
    pub fn into_inner(self) -> T {
        match self {
            ItemResponse::Wrapped { data } => data,
            ItemResponse::Bare(item) => item,
        }
    }
}
