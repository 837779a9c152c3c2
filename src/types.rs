//! Shared types used across the codebase

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("expected YYYY.MM.DD, got '{0}'")]
    Shape(String),

    #[error("non-numeric date component '{0}'")]
    Component(String),

    #[error("no such calendar date: {0}")]
    OutOfRange(String),
}

/// Parse a release date written as `YYYY.MM.DD`.
///
/// Exactly three dot-separated integer components are accepted. The result is
/// a date-only value; impossible dates such as `2020.02.30` are rejected.
pub fn parse_release_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 3 {
        return Err(DateParseError::Shape(input.to_string()));
    }

    let year: i32 = parse_component(parts[0])?;
    let month: u32 = parse_component(parts[1])?;
    let day: u32 = parse_component(parts[2])?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateParseError::OutOfRange(input.to_string()))
}

fn parse_component<T: std::str::FromStr>(part: &str) -> Result<T, DateParseError> {
    part.parse()
        .map_err(|_| DateParseError::Component(part.to_string()))
}

/// Deserialize an optional calendar date from JSON.
///
/// Accepts `null`, an empty string, `YYYY-MM-DD`, or an RFC 3339 timestamp
/// (the time part is dropped). The zero timestamp `0001-01-01T00:00:00Z`
/// counts as absent.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(None),
    };

    let date = if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        date
    } else {
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.date_naive())
            .map_err(|_| serde::de::Error::custom(format!("invalid date '{}'", raw)))?
    };

    if NaiveDate::from_ymd_opt(1, 1, 1) == Some(date) {
        return Ok(None);
    }
    Ok(Some(date))
}
