//! The I/O seam between the dispatcher and the network.
//!
//! A [`Transport`] executes an [`HttpRequest`] and reports whatever status
//! came back as data. Only faults that leave no HTTP response behind
//! (refused connection, DNS, TLS, timeout) become [`ApiError::Transport`].
//! Redirects are not followed: a 3xx is a status like any other.

use std::time::Duration;

use ureq::{Agent, RequestBuilder};

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Upper bound on a response body read into memory.
pub const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Executes one request and returns the response as received.
///
/// Implementations must return every status as `Ok`, leaving its
/// interpretation to the dispatcher.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport on a shared `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// `timeout` bounds the whole round-trip; `None` keeps ureq's defaults.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = request.path.as_str();
        let body = request.body.as_deref().map(str::as_bytes);

        let outcome = match (request.method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), request).call(),
            (HttpMethod::Delete, None) => with_headers(self.agent.delete(url), request).call(),
            (HttpMethod::Delete, Some(body)) => {
                with_headers(self.agent.delete(url).force_send_body(), request).send(body)
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(url), request).send(body)
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(url), request).send(body),
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), request).send_empty(),
        };
        let mut response = outcome.map_err(ApiError::transport)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let bytes = match response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
        {
            Ok(bytes) => bytes,
            Err(ureq::Error::BodyExceedsLimit(limit)) => {
                return Err(ApiError::InvalidResponse {
                    status,
                    message: format!("response body exceeds {limit} bytes"),
                })
            }
            // A connection dropped mid-body leaves no usable response either.
            Err(err) => return Err(ApiError::transport(err)),
        };
        // Error pages are not always UTF-8; the status must survive regardless.
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
