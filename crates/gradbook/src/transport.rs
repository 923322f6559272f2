//! Transport-neutral request/response types and the [`Transport`] seam.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. `/admin/users`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Filled in by the client from the token store.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Flatten a filter struct into query pairs; `None` fields are omitted.
    pub fn with_filters<F: Serialize>(self, filters: &F) -> Result<Self> {
        let query = query_pairs(filters)?;
        Ok(self.with_query(query))
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Status and raw body as received from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request to the backend and returns what came back.
///
/// Non-2xx statuses are returned as responses, not errors; only failures to
/// exchange the request at all are `Err`.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> impl Future<Output = Result<RawResponse>> + Send;
}

pub fn query_pairs<F: Serialize>(filters: &F) -> Result<Vec<(String, String)>> {
    match serde_json::to_value(filters)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::Null => None,
                Value::String(s) => Some((k, s)),
                other => Some((k, other.to_string())),
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::Message(format!(
            "query filters must serialize to an object, got {}",
            other
        ))),
    }
}

#[cfg(feature = "http")]
pub use self::http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use reqwest::header::CONTENT_TYPE;

    use super::{ApiRequest, Method, RawResponse, Transport};
    use crate::config::ClientConfig;
    use crate::error::Result;

    /// [`Transport`] over reqwest.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
        config: ClientConfig,
    }

    impl HttpTransport {
        pub fn new(config: ClientConfig) -> Result<Self> {
            let client = reqwest::Client::builder().timeout(config.timeout).build()?;
            Ok(Self { client, config })
        }

        pub fn config(&self) -> &ClientConfig {
            &self.config
        }
    }

    impl From<Method> for reqwest::Method {
        fn from(m: Method) -> Self {
            match m {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            }
        }
    }

    impl Transport for HttpTransport {
        async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
            let url = self.config.url_for(&request.path);
            let mut builder = self
                .client
                .request(request.method.into(), url)
                .header(CONTENT_TYPE, "application/json");
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(token) = &request.bearer {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &request.body {
                builder = builder.body(serde_json::to_vec(body)?);
            }

            let resp = builder.send().await?;
            let status = resp.status().as_u16();
            let body = resp.text().await?;
            Ok(RawResponse { status, body })
        }
    }
}
