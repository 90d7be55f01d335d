use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Calendar date a snapshot was observed, ISO `yyyy-mm-dd`.
///
/// The diff engine treats this as an opaque caller-supplied tag; it never
/// generates one itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationDate(Date);

impl ObservationDate {
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub fn from_date(value: Date) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("ObservationDate must be ISO formattable")
    }
}

impl Display for ObservationDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for ObservationDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for ObservationDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let parsed = ObservationDate::parse("2026-08-08").expect("must parse");
        assert_eq!(parsed.format_iso(), "2026-08-08");
    }

    #[test]
    fn rejects_non_iso_date() {
        for raw in ["08/08/2026", "2026-8-8", "20260808", "not a date"] {
            let err = ObservationDate::parse(raw).expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidDate { .. }), "'{raw}'");
        }
    }

    #[test]
    fn serializes_as_iso_string() {
        let date = ObservationDate::parse("2026-01-31").expect("must parse");
        let json = serde_json::to_string(&date).expect("serialize");
        assert_eq!(json, "\"2026-01-31\"");
    }
}
