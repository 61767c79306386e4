use crate::core::allocator::{calculate_stage_durations, total_days};
use crate::core::format::format_date_range;
use crate::core::sequencer::calculate_stage_dates;
use crate::domain::date::format_iso_date;
use crate::domain::model::{AllocationMethod, LotInput, Schedule, ScheduledStage};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Allocates durations then lays them out from `project_start_date`.
///
/// Recomputed on every call; nothing is cached between schedules.
pub fn plan_schedule(
    lots: &[LotInput],
    total_duration_days: i64,
    method: AllocationMethod,
    project_start_date: NaiveDate,
) -> Result<Schedule> {
    let durations = calculate_stage_durations(lots, total_duration_days, method)?;
    let ranges = calculate_stage_dates(&durations, project_start_date)?;

    let stages: Vec<ScheduledStage> = durations
        .iter()
        .zip(ranges)
        .map(|(duration, range)| ScheduledStage {
            lot_id: range.lot_id,
            duration_days: duration.duration_days,
            start_date: range.start_date,
            end_date: range.end_date,
        })
        .collect();

    Ok(Schedule {
        method,
        requested_duration_days: total_duration_days,
        allocated_duration_days: total_days(&durations),
        project_start_date,
        project_end_date: stages.last().map(|stage| stage.end_date),
        stages,
    })
}

impl ScheduledStage {
    /// `DD/MM/YYYY - DD/MM/YYYY` for people, never for stored data.
    pub fn display_range(&self) -> Result<String> {
        format_date_range(
            &format_iso_date(self.start_date),
            &format_iso_date(self.end_date),
        )
    }
}
