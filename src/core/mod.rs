pub mod allocator;
pub mod engine;
pub mod format;
pub mod pipeline;
pub mod planner;
pub mod sequencer;

pub use crate::domain::model::{
    AllocationMethod, LotId, LotInput, Schedule, ScheduleOutput, ScheduledStage, StageDateRange,
    StageDuration,
};
pub use crate::domain::ports::{ConfigProvider, LotsFormat, Pipeline, Storage};
pub use crate::utils::error::Result;
