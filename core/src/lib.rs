//! Blocking client for the Baruwa mail-filtering management API.
//!
//! # Overview
//! Each public operation on [`BaruwaClient`] maps to one REST endpoint under
//! `/api/v1`. The request carries a bearer token, and the reply comes back as
//! parsed JSON or as an [`ApiError`] with a numeric code and a message.
//!
//! # Design
//! - [`endpoints`] is the static catalog of `(method, path template)` pairs.
//! - [`Dispatcher`] is pure: `build_request` produces an `HttpRequest`,
//!   `parse_response` interprets an `HttpResponse`.
//! - [`Transport`] is the only I/O seam. [`UreqTransport`] is the default,
//!   and tests substitute their own.
//! - No retries, caching or pagination. A call is a single round-trip.
//!
//! ```no_run
//! use baruwa_core::{BaruwaClient, ClientConfig};
//!
//! let client = BaruwaClient::new(ClientConfig::new("https://mail.example.com", "token"));
//! let status = client.get_status()?;
//! println!("{status}");
//! # Ok::<(), baruwa_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod transport;

pub use client::BaruwaClient;
pub use config::ClientConfig;
pub use dispatcher::{Dispatcher, COMPLETED_MESSAGE};
pub use endpoints::{Endpoint, API_PREFIX};
pub use error::{ApiError, ErrorPayload, Result, TRANSPORT_FAILURE_CODE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
