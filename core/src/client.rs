//! Stateless HTTP request builder and response parser for the consumption API.
//!
//! # Design
//! `ConsumptionClient` holds only a `base_url`. Each endpoint is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`; the round-trip in between belongs to a
//! [`Transport`](crate::transport::Transport).

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ConsumptionRecord, ErrorResponse};

/// Synchronous, stateless client for the consumption API.
#[derive(Debug, Clone)]
pub struct ConsumptionClient {
    base_url: String,
}

impl ConsumptionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_clients(&self) -> HttpRequest {
        get(format!("{}/client/", self.base_url))
    }

    /// Ids are positive integers; 0 is rejected before any I/O happens.
    pub fn build_get_client(&self, id: u32) -> Result<HttpRequest, ApiError> {
        if id == 0 {
            return Err(ApiError::local("client id must be a positive integer"));
        }
        Ok(get(format!("{}/client/{id}", self.base_url)))
    }

    pub fn parse_list_clients(&self, response: HttpResponse) -> Result<Vec<ConsumptionRecord>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_client(&self, response: HttpResponse) -> Result<ConsumptionRecord, ApiError> {
        parse_json(response)
    }
}

/// Parse user-typed lookup input into a client id.
///
/// Anything other than an unsigned integer is a `Local` error. Zero passes
/// here and is rejected by `build_get_client`.
pub fn parse_client_id(input: &str) -> Result<u32, ApiError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| ApiError::local(format!("`{trimmed}` is not a valid client id")))
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url,
        headers: vec![("accept".to_string(), "application/json".to_string())],
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Map non-success status codes to `ApiError::Remote`, preferring the
/// server's own `message` over a generic one.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorResponse>(&response.body)
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("Error {}", response.status));
    Err(ApiError::remote(response.status, message))
}
