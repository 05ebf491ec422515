use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Collection names
// ---------------------------------------------------------------------------

pub const CROPS_COLLECTION: &str = "crops";
pub const PRICES_COLLECTION: &str = "prices";
pub const SCHEMES_COLLECTION: &str = "schemes";
pub const USERS_COLLECTION: &str = "users";

// ---------------------------------------------------------------------------
// Core domain enums
// ---------------------------------------------------------------------------

/// Price movement since the previous reading, carried on the wire as an
/// arrow glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn symbol(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat => "→",
        }
    }

    /// Any glyph other than the up/down arrows reads as flat.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "↑" => Trend::Up,
            "↓" => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Body of `POST /api/prices`. Everything is optional at the parse stage;
/// validation decides what is actually required.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct NewPrice {
    pub crop: Option<String>,
    pub price: Option<f64>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub date: Option<String>,
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A priced crop record as consumed by the viewer: every field is optional
/// because records arrive from loosely schematized documents or from the
/// embedded mock dataset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
}

fn required_string(value: Option<&String>, field: &'static str) -> Result<(), ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// A price submission needs a crop name and a non-zero price. Zero is
/// rejected the same way a missing value is.
pub fn validate_new_price(payload: &NewPrice) -> Result<(), ValidationError> {
    required_string(payload.crop.as_ref(), "crop")?;
    match payload.price {
        Some(price) if price != 0.0 => Ok(()),
        _ => Err(ValidationError::MissingField("price")),
    }
}

pub fn validate_new_user(payload: &NewUser) -> Result<(), ValidationError> {
    required_string(payload.name.as_ref(), "name")?;
    required_string(payload.email.as_ref(), "email")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Time helpers — shared by the service and the viewer cache
// ---------------------------------------------------------------------------

pub fn unix_timestamp_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Current instant as an RFC 3339 string, the format the API uses for
/// health timestamps and defaulted document dates.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
