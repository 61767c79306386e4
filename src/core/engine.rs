use crate::core::{Pipeline, ScheduleOutput};
use crate::utils::error::Result;

pub struct PlannerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PlannerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extract and transform only; nothing is written.
    pub async fn plan(&self) -> Result<ScheduleOutput> {
        tracing::info!("Reading lots...");
        let lots = self.pipeline.extract().await?;
        tracing::info!("Read {} lots", lots.len());

        tracing::info!("Planning stages...");
        let output = self.pipeline.transform(lots).await?;
        tracing::info!(
            "Planned {} stages over {} days",
            output.schedule.stages.len(),
            output.schedule.allocated_duration_days
        );

        Ok(output)
    }

    pub async fn run(&self) -> Result<String> {
        let output = self.plan().await?;

        tracing::info!("Writing schedule...");
        let output_path = self.pipeline.load(output).await?;
        tracing::info!("Schedule saved to: {}", output_path);

        Ok(output_path)
    }
}
