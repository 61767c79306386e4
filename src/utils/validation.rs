use crate::domain::date::parse_iso_date;
use crate::utils::error::{PlannerError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: i64, min_value: i64) -> Result<()> {
    if value < min_value {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_iso_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    parse_iso_date(value).map_err(|_| PlannerError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: "Date must be a calendar date written YYYY-MM-DD".to_string(),
    })
}

pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    if values.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: format!("At least one of {} is required", allowed.join(", ")),
        });
    }

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(PlannerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PlannerError::MissingConfigError {
        field: field_name.to_string(),
    })
}
