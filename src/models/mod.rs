use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Format of `last_updated` in the envelope
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Direction of the latest price move
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

/// One city's quote, as read from a single info box card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CityRate {
    pub city: String,
    pub price: String,
    pub trend: Trend,
    pub change: String,
    pub open_rate: String,
    pub close_rate: String,
    pub doc_rate: String,
}

/// Document written once per run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RatesEnvelope {
    Success {
        last_updated: String,
        source: String,
        data: Vec<CityRate>,
    },
    Error {
        message: String,
    },
}

impl RatesEnvelope {
    pub fn success<Tz>(data: Vec<CityRate>, source: impl Into<String>, at: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self::Success {
            last_updated: at.format(TIMESTAMP_FORMAT).to_string(),
            source: source.into(),
            data,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Records of a successful run; empty for an error envelope
    pub fn records(&self) -> &[CityRate] {
        match self {
            Self::Success { data, .. } => data,
            Self::Error { .. } => &[],
        }
    }
}
