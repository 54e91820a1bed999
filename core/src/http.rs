//! HTTP request and response described as plain data.
//!
//! # Design
//! The dispatcher builds `HttpRequest` values and interprets `HttpResponse`
//! values without touching the network. A [`Transport`](crate::Transport)
//! executes the round-trip in between, which keeps request construction and
//! error mapping deterministic and testable without a server.

/// Statuses the remote API uses to signal success.
pub const SUCCESS_STATUSES: [u16; 3] = [200, 201, 204];

/// HTTP verbs used by the endpoint catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request: absolute URL, headers and optional JSON body.
///
/// Created per call by `Dispatcher::build_request` and dropped once the
/// transport has executed it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as the transport received it, whatever its status.
///
/// Handed to `Dispatcher::parse_response`, which decides between success
/// and error.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        SUCCESS_STATUSES.contains(&self.status)
    }
}
