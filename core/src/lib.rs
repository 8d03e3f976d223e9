//! Client core for the subscriber consumption dashboard.
//!
//! # Overview
//! Fetches consumption records (balance, data usage, minute usage) from the
//! consumption API and holds them in a [`ConsumptionStore`] that the
//! presentation layer renders from.
//!
//! # Design
//! - `ConsumptionClient` is stateless: `build_*` produces requests, `parse_*`
//!   consumes responses. A [`Transport`] performs the I/O in between.
//! - `ConsumptionStore` caches the full list for [`CACHE_EXPIRY`] and fences
//!   overlapping requests so only the newest of each kind commits.
//! - Every failure becomes an [`ApiError`]; nothing panics into the view.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::{parse_client_id, ConsumptionClient};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClientConfig, API_BASE_URL_ENV, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{Commit, ConsumptionStore, PendingRequest, RequestKind, Ticket, CACHE_EXPIRY};
pub use transport::{Transport, UreqTransport};
pub use types::{ConsumptionRecord, ErrorResponse, UsageLevel};
