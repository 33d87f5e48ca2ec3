use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AnniversaryError, Result};

/// Canonical text form of `anniversaryDate`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    /// Accepted values come from the schema document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street_address.is_none()
            && self.municipality.is_none()
            && self.province.is_none()
            && self.postal_code.is_none()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Anniversary {
    pub names: String,
    pub anniversary_date: NaiveDate,
    pub anniversary_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Anniversary {
    pub fn new(
        names: impl Into<String>,
        anniversary_date: NaiveDate,
        anniversary_type: impl Into<String>,
    ) -> Self {
        Self {
            names: names.into(),
            anniversary_date,
            anniversary_type: anniversary_type.into(),
            description: None,
            email: None,
            phone: None,
            address: None,
        }
    }
}

/// Parse a `yyyy-mm-dd` calendar date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| AnniversaryError::MalformedDate(text.to_string()))
}

/// Stored dates must already be in canonical form: no padding slack, no surrounding space.
pub fn parse_canonical_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == text)
        .ok_or_else(|| AnniversaryError::MalformedDate(text.to_string()))
}
