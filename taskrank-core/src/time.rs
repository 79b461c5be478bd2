//! Time utilities: strict due-date parsing and a time-zone-aware "today".

use std::sync::LazyLock;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::error::ParseError;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"));

/// Parse a due date in strict `YYYY-MM-DD` form.
///
/// chrono alone accepts unpadded fields ("2025-1-5"), so the shape is checked first.
pub fn parse_due_date(s: &str) -> Result<NaiveDate, ParseError> {
    if !ISO_DATE.is_match(s) {
        return Err(ParseError::new(s));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ParseError::new(s))
}

/// A due date as callers hand it over: already a date, or still text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    Date(NaiveDate),
    Text(String),
}

impl DueDate {
    pub fn resolve(&self) -> Result<NaiveDate, ParseError> {
        match self {
            DueDate::Date(d) => Ok(*d),
            DueDate::Text(s) => parse_due_date(s),
        }
    }
}

impl From<NaiveDate> for DueDate {
    fn from(d: NaiveDate) -> Self {
        DueDate::Date(d)
    }
}

impl From<&str> for DueDate {
    fn from(s: &str) -> Self {
        DueDate::Text(s.to_string())
    }
}

impl From<String> for DueDate {
    fn from(s: String) -> Self {
        DueDate::Text(s)
    }
}

/// Source of the evaluation date used for urgency.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock read in a configured IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    tz: Tz,
}

impl ZonedClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from a zone name like "America/Chicago".
    pub fn from_name(tz: &str) -> Result<Self> {
        Ok(Self::new(parse_timezone(tz)?))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Calendar day in this zone at `instant`.
    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }
}

impl Clock for ZonedClock {
    fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }
}

/// Always reports the same day. Used by tests and the offline CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}
