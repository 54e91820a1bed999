//! Request construction and response interpretation for the Baruwa API.
//!
//! # Design
//! `Dispatcher` holds only the immutable [`ClientConfig`]. Each call is split
//! into `build_request`, which produces an `HttpRequest`, and
//! `parse_response`, which turns an `HttpResponse` into JSON or an
//! [`ApiError`]. Whoever sits between the two performs the I/O; see
//! [`Transport`](crate::Transport).

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::endpoints::Endpoint;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse};

/// Message of the payload synthesized for an empty success body.
pub const COMPLETED_MESSAGE: &str = "Completed successfully";

/// Turns endpoints into requests and responses into results.
///
/// Holds no per-call state, so one instance serves any number of
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: ClientConfig,
}

impl Dispatcher {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve the path, attach auth and content headers and serialize the
    /// body.
    ///
    /// # Errors
    /// `MalformedRequest` when `args` does not fit the template or the body
    /// fails to serialize.
    pub fn build_request<B>(
        &self,
        endpoint: Endpoint,
        args: &[&str],
        body: Option<&B>,
    ) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let path = endpoint.resolve(args)?;
        let body = body
            .map(|b| {
                serde_json::to_string(b).map_err(|e| {
                    ApiError::MalformedRequest(format!("request body is not serializable: {e}"))
                })
            })
            .transpose()?;

        Ok(HttpRequest {
            method: endpoint.method,
            path: format!("{}{path}", self.config.base_url),
            headers: self.headers(),
            body,
        })
    }

    /// Interpret a response: JSON (or a synthesized completion payload) for
    /// 200/201/204, an error for everything else.
    ///
    /// # Errors
    /// `Api` for non-success statuses, `InvalidResponse` for a success status
    /// whose body is not JSON.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        if !response.is_success() {
            return Err(ApiError::Api {
                status: response.status,
                message: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(json!({
                "code": response.status,
                "message": COMPLETED_MESSAGE,
            }));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidResponse {
            status: response.status,
            message: format!("response body is not JSON: {e}"),
        })
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.config.token),
            ),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }
}
