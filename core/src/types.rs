//! Domain DTOs for the consumption API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Usage figures
//! are display data only: nothing here checks that `used <= total`.

use serde::{Deserialize, Serialize};

/// Usage percentage above which a meter is flagged as critical.
pub const CRITICAL_USAGE_PERCENT: f64 = 80.0;

/// One subscriber's consumption snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsumptionRecord {
    /// Server-assigned identifier. Older payloads omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub client_name: String,
    pub balance: f64,
    pub currency: String,
    pub data_used: f64,
    pub data_total: f64,
    pub data_unit: String,
    pub minutes_used: f64,
    pub minutes_total: f64,
    pub minutes_unit: String,
}

impl ConsumptionRecord {
    pub fn data_usage_percent(&self) -> f64 {
        usage_percent(self.data_used, self.data_total)
    }

    pub fn minutes_usage_percent(&self) -> f64 {
        usage_percent(self.minutes_used, self.minutes_total)
    }

    pub fn data_remaining(&self) -> f64 {
        self.data_total - self.data_used
    }

    pub fn minutes_remaining(&self) -> f64 {
        self.minutes_total - self.minutes_used
    }
}

/// Error body returned by the API alongside non-2xx statuses.
///
/// Only `message` is relied on. The backend emits `code` as a number and
/// `status` as text, but neither is guaranteed, so both stay untyped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
    pub message: String,
}

/// `used / total` as a percentage, or 0 when the plan total is not positive.
pub fn usage_percent(used: f64, total: f64) -> f64 {
    if total > 0.0 {
        used / total * 100.0
    } else {
        0.0
    }
}

/// Severity bucket for a usage meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    Critical,
}

impl UsageLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent > CRITICAL_USAGE_PERCENT {
            UsageLevel::Critical
        } else {
            UsageLevel::Normal
        }
    }
}
