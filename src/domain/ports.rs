use crate::domain::model::{AllocationMethod, LotInput, ScheduleOutput};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Encoding of a lots file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotsFormat {
    Csv,
    Json,
}

pub trait ConfigProvider: Send + Sync {
    fn lots_file(&self) -> &str;
    fn lots_format(&self) -> Result<LotsFormat>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn start_date(&self) -> Result<NaiveDate>;
    fn total_duration_days(&self) -> i64;
    fn method(&self) -> AllocationMethod;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<LotInput>>;
    async fn transform(&self, lots: Vec<LotInput>) -> Result<ScheduleOutput>;
    async fn load(&self, output: ScheduleOutput) -> Result<String>;
}
