//! Execution of `HttpRequest` values against the network.
//!
//! The store only ever sees the [`Transport`] trait. `UreqTransport` is the
//! blocking implementation used by the dashboard binary and the integration
//! tests; unit tests substitute scripted fakes.

use std::time::Duration;

use crate::config::REQUEST_TIMEOUT;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status; status interpretation belongs to `ConsumptionClient`. `Err` is
/// reserved for requests that got no response or could not be sent.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        // 4xx/5xx come back as data so the client can read the error body.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(REQUEST_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(map_ureq_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(map_ureq_error)?;

        tracing::debug!(status, url = %request.url, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Malformed requests are local failures; everything else means no usable
/// response reached us.
fn map_ureq_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::BadUri(message) => ApiError::local(message),
        ureq::Error::Http(err) => ApiError::local(err.to_string()),
        other => {
            tracing::warn!(error = %other, "request did not reach the server");
            ApiError::connectivity(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transport_uses_ten_second_timeout() {
        assert_eq!(UreqTransport::default().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn malformed_url_is_a_local_error() {
        let transport = UreqTransport::default();
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "not a url".to_string(),
            headers: Vec::new(),
        };
        let err = transport.execute(&request).unwrap_err();
        assert!(matches!(err, ApiError::Local { .. }), "got {err:?}");
    }
}
