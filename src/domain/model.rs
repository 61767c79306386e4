use crate::domain::date::iso_date;
use crate::utils::error::PlannerError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque lot identifier. The variant seen on input is the variant written on output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LotId {
    Int(i64),
    Text(String),
}

impl LotId {
    /// Text that is the canonical form of an integer becomes `Int`; anything else,
    /// including `007` or `+5`, stays `Text` so it is written back unchanged.
    pub fn from_text(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(value) if value.to_string() == raw => LotId::Int(value),
            _ => LotId::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for LotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotId::Int(value) => write!(f, "{}", value),
            LotId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for LotId {
    fn from(value: i64) -> Self {
        LotId::Int(value)
    }
}

impl From<&str> for LotId {
    fn from(value: &str) -> Self {
        LotId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotInput {
    pub id: LotId,
    pub total_amount: f64,
}

impl LotInput {
    pub fn new(id: impl Into<LotId>, total_amount: f64) -> Self {
        Self {
            id: id.into(),
            total_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageDuration {
    pub lot_id: LotId,
    pub duration_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageDateRange {
    pub lot_id: LotId,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AllocationMethod {
    #[default]
    Proportional,
    Equal,
}

impl AllocationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationMethod::Proportional => "proportional",
            AllocationMethod::Equal => "equal",
        }
    }
}

impl fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationMethod {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proportional" => Ok(AllocationMethod::Proportional),
            "equal" => Ok(AllocationMethod::Equal),
            other => Err(PlannerError::invalid_argument(
                "method",
                other,
                "expected 'proportional' or 'equal'",
            )),
        }
    }
}

/// One row of a planned schedule: the allocated duration joined with its date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledStage {
    pub lot_id: LotId,
    pub duration_days: i64,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub method: AllocationMethod,
    pub requested_duration_days: i64,
    /// Sum of the allocated durations; may differ from the request (equal split, floor).
    pub allocated_duration_days: i64,
    #[serde(with = "iso_date")]
    pub project_start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_end_date: Option<NaiveDate>,
    pub stages: Vec<ScheduledStage>,
}

impl Schedule {
    pub fn durations(&self) -> Vec<StageDuration> {
        self.stages
            .iter()
            .map(|stage| StageDuration {
                lot_id: stage.lot_id.clone(),
                duration_days: stage.duration_days,
            })
            .collect()
    }

    pub fn date_ranges(&self) -> Vec<StageDateRange> {
        self.stages
            .iter()
            .map(|stage| StageDateRange {
                lot_id: stage.lot_id.clone(),
                start_date: stage.start_date,
                end_date: stage.end_date,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleOutput {
    pub schedule: Schedule,
    pub csv_output: String,
    pub json_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lot_id_keeps_its_type_through_json() {
        let lots: Vec<LotInput> = serde_json::from_str(
            r#"[{"id": 7, "totalAmount": 10.0}, {"id": "GO-02", "totalAmount": 0}]"#,
        )
        .unwrap();

        assert_eq!(lots[0].id, LotId::Int(7));
        assert_eq!(lots[1].id, LotId::Text("GO-02".to_string()));

        let json = serde_json::to_value(&lots).unwrap();
        assert_eq!(json[0]["id"], serde_json::json!(7));
        assert_eq!(json[1]["id"], serde_json::json!("GO-02"));
    }

    #[test]
    fn test_lot_id_from_text() {
        assert_eq!(LotId::from_text("42"), LotId::Int(42));
        assert_eq!(LotId::from_text("-3"), LotId::Int(-3));
        assert_eq!(LotId::from_text("lot-42"), LotId::Text("lot-42".to_string()));
        assert_eq!(LotId::from_text("007"), LotId::Text("007".to_string()));
        assert_eq!(LotId::from_text("+5"), LotId::Text("+5".to_string()));
    }

    #[test]
    fn test_date_range_serializes_iso_dates() {
        let range = StageDateRange {
            lot_id: LotId::Int(1),
            start_date: NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 11, 19).unwrap(),
        };

        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"lotId": 1, "startDate": "2024-11-15", "endDate": "2024-11-19"})
        );

        let bad = r#"{"lotId": 1, "startDate": "2024-11-5", "endDate": "2024-11-19"}"#;
        assert!(serde_json::from_str::<StageDateRange>(bad).is_err());
    }

    #[test]
    fn test_allocation_method_parsing() {
        assert_eq!(
            "proportional".parse::<AllocationMethod>().unwrap(),
            AllocationMethod::Proportional
        );
        assert_eq!("Equal".parse::<AllocationMethod>().unwrap(), AllocationMethod::Equal);
        assert!("weighted".parse::<AllocationMethod>().is_err());
        assert_eq!(
            serde_json::to_string(&AllocationMethod::Equal).unwrap(),
            "\"equal\""
        );
    }
}
