use crate::utils::error::{PlannerError, Result};
use chrono::NaiveDate;

/// Boundary text form for calendar dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts unpadded fields, so the layout is checked first.
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !well_formed {
        return Err(PlannerError::invalid_argument(
            "date",
            text,
            "expected YYYY-MM-DD",
        ));
    }

    NaiveDate::parse_from_str(text, ISO_DATE_FORMAT).map_err(|e| {
        PlannerError::invalid_argument("date", text, format!("not a calendar date: {}", e))
    })
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// `#[serde(with = "iso_date")]` for `NaiveDate` fields.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_iso_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_iso_date(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2024-11-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 11, 15).unwrap());
        assert_eq!(format_iso_date(date), "2024-11-15");
    }

    #[test]
    fn test_parse_iso_date_rejects_loose_forms() {
        assert!(parse_iso_date("2024-1-5").is_err());
        assert!(parse_iso_date("15/11/2024").is_err());
        assert!(parse_iso_date("2024-11-15T00:00:00").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn test_parse_iso_date_rejects_impossible_dates() {
        assert!(parse_iso_date("2023-02-29").is_err());
        assert!(parse_iso_date("2024-13-01").is_err());
        assert!(parse_iso_date("2024-02-29").is_ok());
    }

    #[test]
    fn test_invalid_date_is_invalid_argument() {
        let err = parse_iso_date("tomorrow").unwrap_err();
        assert!(matches!(err, PlannerError::InvalidArgument { .. }));
    }
}
