//! Lays stages end to end on the calendar, starting at the project start date.

use crate::domain::date::parse_iso_date;
use crate::domain::model::{StageDateRange, StageDuration};
use crate::utils::error::{PlannerError, Result};
use chrono::{Days, NaiveDate};

/// The start day counts as day one, so a one-day stage starts and ends on the same date.
/// Each stage begins the day after the previous one ends.
pub fn calculate_stage_dates(
    stages: &[StageDuration],
    project_start_date: NaiveDate,
) -> Result<Vec<StageDateRange>> {
    let mut ranges = Vec::with_capacity(stages.len());
    let mut cursor = Some(project_start_date);

    for stage in stages {
        if stage.duration_days <= 0 {
            return Err(PlannerError::invalid_argument(
                format!("stages[{}].duration_days", stage.lot_id),
                stage.duration_days,
                "must be at least one day",
            ));
        }

        let start_date = cursor.ok_or_else(|| out_of_range(stage))?;
        let end_date = start_date
            .checked_add_days(Days::new(stage.duration_days as u64 - 1))
            .ok_or_else(|| out_of_range(stage))?;

        ranges.push(StageDateRange {
            lot_id: stage.lot_id.clone(),
            start_date,
            end_date,
        });

        cursor = end_date.succ_opt();
    }

    Ok(ranges)
}

/// Same as [`calculate_stage_dates`] with the start date in `YYYY-MM-DD` form.
pub fn calculate_stage_dates_from_str(
    stages: &[StageDuration],
    project_start_date: &str,
) -> Result<Vec<StageDateRange>> {
    let start = parse_iso_date(project_start_date)?;
    calculate_stage_dates(stages, start)
}

fn out_of_range(stage: &StageDuration) -> PlannerError {
    PlannerError::invalid_argument(
        format!("stages[{}].duration_days", stage.lot_id),
        stage.duration_days,
        "schedule runs past the supported calendar range",
    )
}
