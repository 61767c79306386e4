//! Turns lot budgets and a project length into whole-day stage durations.

use crate::domain::model::{AllocationMethod, LotInput, StageDuration};
use crate::utils::error::{PlannerError, Result};

/// No stage is ever scheduled shorter than this.
pub const MIN_STAGE_DAYS: i64 = 5;

/// Longest project accepted, about 2700 years. Keeps day sums far from `i64` overflow.
pub const MAX_TOTAL_DURATION_DAYS: i64 = 1_000_000;

/// Rounds half away from zero: `12.5 -> 13`, `-12.5 -> -13`.
pub fn round_days(value: f64) -> i64 {
    value.round() as i64
}

/// Allocates `total_duration_days` across `lots`, preserving input order.
///
/// The equal method gives every lot `max(5, round(total / count))` and does not
/// renormalise, so its sum can drift from the request. The proportional method
/// splits by budget share, then moves the rounding difference onto the first
/// longest stage when that keeps it at or above the floor. A zero total budget
/// falls back to the equal split.
pub fn calculate_stage_durations(
    lots: &[LotInput],
    total_duration_days: i64,
    method: AllocationMethod,
) -> Result<Vec<StageDuration>> {
    validate_inputs(lots, total_duration_days)?;

    if lots.is_empty() {
        return Ok(Vec::new());
    }

    let durations = match method {
        AllocationMethod::Equal => equal_split(lots, total_duration_days),
        AllocationMethod::Proportional => proportional_split(lots, total_duration_days),
    };

    tracing::debug!(
        method = %method,
        lots = lots.len(),
        requested = total_duration_days,
        allocated = total_days(&durations),
        "allocated stage durations"
    );

    Ok(durations)
}

pub fn total_days(durations: &[StageDuration]) -> i64 {
    durations.iter().map(|d| d.duration_days).sum()
}

fn validate_inputs(lots: &[LotInput], total_duration_days: i64) -> Result<()> {
    if total_duration_days <= 0 {
        return Err(PlannerError::invalid_argument(
            "total_duration_days",
            total_duration_days,
            "must be greater than zero",
        ));
    }

    if total_duration_days > MAX_TOTAL_DURATION_DAYS {
        return Err(PlannerError::invalid_argument(
            "total_duration_days",
            total_duration_days,
            format!("must not exceed {} days", MAX_TOTAL_DURATION_DAYS),
        ));
    }

    for lot in lots {
        if !lot.total_amount.is_finite() || lot.total_amount < 0.0 {
            return Err(PlannerError::invalid_argument(
                format!("lots[{}].total_amount", lot.id),
                lot.total_amount,
                "must be a finite, non-negative amount",
            ));
        }
    }

    Ok(())
}

fn equal_split(lots: &[LotInput], total_duration_days: i64) -> Vec<StageDuration> {
    let per_lot = round_days(total_duration_days as f64 / lots.len() as f64).max(MIN_STAGE_DAYS);

    lots.iter()
        .map(|lot| StageDuration {
            lot_id: lot.id.clone(),
            duration_days: per_lot,
        })
        .collect()
}

fn proportional_split(lots: &[LotInput], total_duration_days: i64) -> Vec<StageDuration> {
    let total_amount: f64 = lots.iter().map(|lot| lot.total_amount).sum();

    if total_amount == 0.0 {
        tracing::debug!("total budget is zero, falling back to equal split");
        return equal_split(lots, total_duration_days);
    }

    let mut durations: Vec<StageDuration> = lots
        .iter()
        .map(|lot| {
            let proportion = lot.total_amount / total_amount;
            let raw_days = round_days(proportion * total_duration_days as f64);
            StageDuration {
                lot_id: lot.id.clone(),
                duration_days: raw_days.max(MIN_STAGE_DAYS),
            }
        })
        .collect();

    reconcile(&mut durations, total_duration_days);
    durations
}

fn reconcile(durations: &mut [StageDuration], total_duration_days: i64) {
    let difference = total_duration_days - total_days(durations);
    if difference == 0 {
        return;
    }

    let Some(index) = first_longest(durations) else {
        return;
    };

    let adjusted = durations[index].duration_days + difference;
    if adjusted >= MIN_STAGE_DAYS {
        tracing::debug!(
            lot_id = %durations[index].lot_id,
            difference,
            "absorbed rounding difference"
        );
        durations[index].duration_days = adjusted;
    } else {
        tracing::debug!(
            lot_id = %durations[index].lot_id,
            difference,
            "rounding difference would break the minimum stage length, left as is"
        );
    }
}

/// Earliest index among the stages with the greatest duration.
fn first_longest(durations: &[StageDuration]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, stage) in durations.iter().enumerate() {
        match best {
            Some(current) if durations[current].duration_days >= stage.duration_days => {}
            _ => best = Some(index),
        }
    }
    best
}
