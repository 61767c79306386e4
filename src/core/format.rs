use crate::utils::error::{PlannerError, Result};

/// `("2024-11-15", "2024-11-19")` becomes `"15/11/2024 - 19/11/2024"`.
///
/// Display only; the text is reordered, not checked against the calendar.
pub fn format_date_range(start_date: &str, end_date: &str) -> Result<String> {
    Ok(format!(
        "{} - {}",
        to_display_date(start_date)?,
        to_display_date(end_date)?
    ))
}

fn to_display_date(iso: &str) -> Result<String> {
    let parts: Vec<&str> = iso.split('-').collect();
    match parts.as_slice() {
        [year, month, day] if !year.is_empty() && !month.is_empty() && !day.is_empty() => {
            Ok(format!("{}/{}/{}", day, month, year))
        }
        _ => Err(PlannerError::invalid_argument(
            "date",
            iso,
            "expected YYYY-MM-DD",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_range() {
        assert_eq!(
            format_date_range("2024-11-15", "2024-11-19").unwrap(),
            "15/11/2024 - 19/11/2024"
        );
        assert_eq!(
            format_date_range("2024-11-20", "2025-03-14").unwrap(),
            "20/11/2024 - 14/03/2025"
        );
    }

    #[test]
    fn test_format_date_range_malformed() {
        assert!(format_date_range("15/11/2024", "2024-11-19").is_err());
        assert!(format_date_range("2024-11-15", "").is_err());
    }
}
