//! Relayed response type.
//!
//! # Responsibilities
//! - Hold a backend response as plain data: status, headers, body bytes
//! - Convert into the framework response type for the client
//! - Strip hop-by-hop headers that only applied to the backend leg
//!
//! # Design Decisions
//! - Body is fully buffered; backend payloads are small JSON blobs
//! - Content-Length is dropped and recomputed from the buffered body
//! - The type has no reference to the HTTP client library, so the
//!   gateway's response model survives a client swap

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};

/// Headers that describe the backend connection, not the payload.
/// Relaying them verbatim would corrupt the client-side response.
const HOP_BY_HOP: [HeaderName; 4] = [
    header::CONNECTION,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    HeaderName::from_static("keep-alive"),
];

/// A backend response captured as plain data, ready to relay.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RelayedResponse {
    /// Capture a backend response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// An empty-bodied response carrying only an error status.
    pub fn error(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        for (name, value) in self.headers.iter() {
            if HOP_BY_HOP.contains(name) {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }

        response
    }
}
