//! BNet backend client.
//!
//! # Responsibilities
//! - Issue GET/POST calls against the configured backend endpoint
//! - Bound every call with the fail-fast timeout from config
//! - Normalize every backend failure into a plain response value
//!
//! # Design Decisions
//! - One handle constructed at startup, shared read-only by handlers
//! - Transport errors never escape this module; JSON fetches collapse
//!   to (500, {}), relayed POSTs collapse to a 502 relay
//! - Bodies are buffered with a fixed cap; the backend serves small
//!   JSON state blobs, not streams

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, Response, StatusCode},
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::Value;
use thiserror::Error;

use crate::bnet::paths::Resource;
use crate::bnet::relay::RelayedResponse;
use crate::config::schema::{BackendConfig, TimeoutConfig};

/// Cap on a buffered backend body.
const MAX_RELAY_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Errors a single backend call can hit. Internal to this layer; the
/// public operations convert them into response values.
#[derive(Debug, Error)]
enum BackendCallError {
    #[error("request build failed: {0}")]
    Request(#[from] axum::http::Error),

    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("response body error: {0}")]
    Body(#[from] axum::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Client for the BNet backend server.
///
/// Wraps the endpoint resolved at startup; immutable afterwards.
pub struct BNetClient {
    base_url: String,
    timeout: Duration,
    http: Client<HttpConnector, Body>,
}

impl BNetClient {
    /// Create a client for the configured endpoint.
    pub fn new(backend: &BackendConfig, timeouts: &TimeoutConfig) -> Self {
        Self {
            base_url: backend.base_url(),
            timeout: Duration::from_millis(timeouts.backend_request_ms),
            http: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
        }
    }

    /// Fetch a JSON resource from the backend.
    ///
    /// Returns the backend's status with the parsed value on success.
    /// Every failure collapses to a status plus an empty JSON object:
    /// the backend's own status for a non-200 reply, 500 for a 200
    /// reply that is not `application/json`, and 500 for any transport
    /// failure. Nothing propagates as an error past this method.
    pub async fn fetch_json(&self, resource: Resource) -> (StatusCode, Value) {
        match self.try_fetch_json(resource).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    resource = resource.name(),
                    error = %e,
                    "Backend fetch failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, empty_object())
            }
        }
    }

    async fn try_fetch_json(
        &self,
        resource: Resource,
    ) -> Result<(StatusCode, Value), BackendCallError> {
        let uri = format!("{}{}", self.base_url, resource.backend_path());
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())?;

        let (status, headers, body) = self.send(request).await?;

        if status != StatusCode::OK {
            tracing::warn!(
                resource = resource.name(),
                status = %status,
                "Backend returned non-success status"
            );
            return Ok((status, empty_object()));
        }

        if !is_json(&headers) {
            tracing::warn!(
                resource = resource.name(),
                content_type = content_type_str(&headers),
                "Backend returned non-JSON content type, expected `application/json`"
            );
            return Ok((StatusCode::INTERNAL_SERVER_ERROR, empty_object()));
        }

        match serde_json::from_slice(&body) {
            Ok(value) => Ok((StatusCode::OK, value)),
            Err(e) => {
                tracing::warn!(
                    resource = resource.name(),
                    error = %e,
                    "Backend body is not valid JSON"
                );
                Ok((StatusCode::INTERNAL_SERVER_ERROR, empty_object()))
            }
        }
    }

    /// Trigger a manual transition on the backend.
    ///
    /// Relays the backend's raw response, whatever its status. A
    /// transport failure becomes an empty 502 relay.
    pub async fn trigger_transition(&self, transition_id: &str) -> RelayedResponse {
        let uri = format!(
            "{}{}/{}",
            self.base_url,
            Resource::Transition.backend_path(),
            transition_id
        );

        match self.relay_post(&uri, None).await {
            Ok(relayed) => {
                if relayed.status != StatusCode::OK {
                    tracing::warn!(
                        transition_id,
                        status = %relayed.status,
                        "Transition trigger returned non-success status"
                    );
                }
                relayed
            }
            Err(e) => {
                tracing::error!(transition_id, error = %e, "Transition trigger failed");
                RelayedResponse::error(StatusCode::BAD_GATEWAY)
            }
        }
    }

    /// Add a token by posting the JSON payload to the backend.
    ///
    /// Same timeout and relay semantics as [`trigger_transition`].
    ///
    /// [`trigger_transition`]: BNetClient::trigger_transition
    pub async fn add_token(&self, payload: Value) -> RelayedResponse {
        let uri = format!("{}{}", self.base_url, Resource::Token.backend_path());

        match self.relay_post(&uri, Some(payload)).await {
            Ok(relayed) => {
                if relayed.status != StatusCode::OK {
                    tracing::warn!(
                        status = %relayed.status,
                        "Token add returned non-success status"
                    );
                }
                relayed
            }
            Err(e) => {
                tracing::error!(error = %e, "Token add failed");
                RelayedResponse::error(StatusCode::BAD_GATEWAY)
            }
        }
    }

    async fn relay_post(
        &self,
        uri: &str,
        payload: Option<Value>,
    ) -> Result<RelayedResponse, BackendCallError> {
        let mut builder = Request::builder().method(Method::POST).uri(uri);

        let body = match payload {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value)?)
            }
            None => Body::empty(),
        };
        let request = builder.body(body)?;

        let (status, headers, bytes) = self.send(request).await?;
        Ok(RelayedResponse::new(status, headers, bytes))
    }

    /// Issue the request and buffer the response body. One timeout
    /// covers both phases, so a call never runs past the configured
    /// budget.
    async fn send(
        &self,
        request: Request<Body>,
    ) -> Result<(StatusCode, HeaderMap, Bytes), BackendCallError> {
        let send_and_buffer = async {
            let response: Response<Incoming> = self.http.request(request).await?;
            let (parts, body) = response.into_parts();
            let bytes = axum::body::to_bytes(Body::new(body), MAX_RELAY_BODY_BYTES).await?;
            Ok::<_, BackendCallError>((parts.status, parts.headers, bytes))
        };

        tokio::time::timeout(self.timeout, send_and_buffer)
            .await
            .map_err(|_| BackendCallError::Timeout(self.timeout))?
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn is_json(headers: &HeaderMap) -> bool {
    content_type_str(headers).starts_with("application/json")
}

fn content_type_str(headers: &HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_json_content_type_check() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        assert!(is_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));

        assert!(!is_json(&HeaderMap::new()));
    }
}
