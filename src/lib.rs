pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{
    allocator::{calculate_stage_durations, MIN_STAGE_DAYS},
    engine::PlannerEngine,
    format::format_date_range,
    pipeline::SchedulePipeline,
    planner::plan_schedule,
    sequencer::{calculate_stage_dates, calculate_stage_dates_from_str},
};
pub use domain::date::{format_iso_date, parse_iso_date};
pub use domain::model::{
    AllocationMethod, LotId, LotInput, Schedule, ScheduledStage, StageDateRange, StageDuration,
};
pub use utils::error::{PlannerError, Result};
