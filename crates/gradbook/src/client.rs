//! Request pipeline shared by every resource call.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::normalize::normalize_in_place;
use crate::options::Options;
use crate::parse_body;
use crate::store::{KeyValueStore, TOKEN_KEY};
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Authenticated client over a [`Transport`].
///
/// Each call attaches the stored bearer token, normalizes the body of a
/// successful response, and clears the token when the backend answers 401.
pub struct ApiClient<T> {
    transport: T,
    store: Arc<dyn KeyValueStore>,
    options: Options,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            transport,
            store,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub async fn execute(&self, mut request: ApiRequest) -> Result<Value> {
        if let Some(token) = self.store.get(TOKEN_KEY)? {
            request.bearer = Some(token);
        }

        let response = match self.transport.send(&request).await {
            Ok(r) => r,
            Err(e) => {
                error!(method = %request.method, path = %request.path, error = %e, "API request failed");
                return Err(e);
            }
        };

        if response.is_success() {
            debug!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                "API response"
            );
            let mut body = match parse_body(&response.body) {
                Ok(v) => v,
                Err(e) => {
                    debug!(path = %request.path, error = %e, "non-JSON body, passing through as text");
                    Value::String(response.body)
                }
            };
            normalize_in_place(&mut body, &self.options);
            return Ok(body);
        }

        error!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            body = %response.body,
            "API error"
        );

        if response.status == 401 {
            warn!("clearing stored token after 401");
            if let Err(e) = self.store.remove(TOKEN_KEY) {
                error!(error = %e, "failed to clear stored token");
            }
            return Err(Error::Unauthorized);
        }

        Err(Error::Api {
            status: response.status,
            message: error_message(&response),
        })
    }

    pub async fn envelope(&self, request: ApiRequest) -> Result<Envelope> {
        Ok(Envelope::from_value(self.execute(request).await?))
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::get(path)).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        self.execute(ApiRequest::post(path).with_json(body)?).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        self.execute(ApiRequest::put(path).with_json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::delete(path)).await
    }
}

fn error_message(response: &RawResponse) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&response.body) {
        for key in ["message", "error"] {
            if let Some(msg) = map.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    if response.body.trim().is_empty() {
        format!("request failed with status {}", response.status)
    } else {
        response.body.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_envelope() {
        let r = RawResponse::new(400, r#"{"success": false, "message": "name is required"}"#);
        assert_eq!(error_message(&r), "name is required");
        let r = RawResponse::new(502, "");
        assert_eq!(error_message(&r), "request failed with status 502");
        let r = RawResponse::new(500, "boom");
        assert_eq!(error_message(&r), "boom");
    }
}
