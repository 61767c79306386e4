use crate::core::planner::plan_schedule;
use crate::core::{ConfigProvider, LotInput, Pipeline, Result, Schedule, ScheduleOutput, Storage};
use crate::domain::date::format_iso_date;
use crate::domain::model::LotId;
use crate::domain::ports::LotsFormat;
use crate::utils::error::PlannerError;
use std::path::Path;

pub const CSV_FILENAME: &str = "schedule.csv";
pub const JSON_FILENAME: &str = "schedule.json";

const CSV_HEADER: [&str; 5] = ["lot_id", "duration_days", "start_date", "end_date", "display_range"];

/// Reads a lots file, plans the schedule and writes it back as CSV and/or JSON.
pub struct SchedulePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SchedulePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_file(&self, filename: &str) -> String {
        Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SchedulePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<LotInput>> {
        let path = self.config.lots_file();
        tracing::debug!("Reading lots from: {}", path);

        let data = self.storage.read_file(path).await?;
        let lots = match self.config.lots_format()? {
            LotsFormat::Csv => parse_lots_csv(&data)?,
            LotsFormat::Json => serde_json::from_slice(&data)?,
        };

        if lots.is_empty() {
            tracing::warn!("Lots file {} contains no lots", path);
        }

        Ok(lots)
    }

    async fn transform(&self, lots: Vec<LotInput>) -> Result<ScheduleOutput> {
        let start_date = self.config.start_date()?;
        let schedule = plan_schedule(
            &lots,
            self.config.total_duration_days(),
            self.config.method(),
            start_date,
        )?;

        if schedule.allocated_duration_days != schedule.requested_duration_days {
            tracing::warn!(
                "Allocated {} days for a requested {} ({} method)",
                schedule.allocated_duration_days,
                schedule.requested_duration_days,
                schedule.method
            );
        }

        let csv_output = render_csv(&schedule)?;
        let json_output = serde_json::to_string_pretty(&schedule)?;

        Ok(ScheduleOutput {
            schedule,
            csv_output,
            json_output,
        })
    }

    async fn load(&self, output: ScheduleOutput) -> Result<String> {
        for format in self.config.output_formats() {
            let (filename, body) = match format.as_str() {
                "csv" => (CSV_FILENAME, &output.csv_output),
                "json" => (JSON_FILENAME, &output.json_output),
                other => {
                    return Err(PlannerError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format. Valid formats: csv, json".to_string(),
                    })
                }
            };

            let path = self.output_file(filename);
            self.storage.write_file(&path, body.as_bytes()).await?;
            tracing::debug!("Wrote {}", path);
        }

        Ok(self.config.output_path().to_string())
    }
}

/// Lots CSV: an `id` column and a `total_amount` (or `totalAmount`) column.
/// Canonical integer ids become integer lot ids; a blank amount counts as zero.
pub fn parse_lots_csv(data: &[u8]) -> Result<Vec<LotInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let id_column = find_column(&headers, &["id", "lot_id", "lotId"])?;
    let amount_column = find_column(&headers, &["total_amount", "totalAmount"])?;

    let mut lots = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let raw_id = record.get(id_column).unwrap_or_default();
        let raw_amount = record.get(amount_column).unwrap_or_default();

        let total_amount = if raw_amount.is_empty() {
            0.0
        } else {
            raw_amount.parse::<f64>().map_err(|_| {
                PlannerError::invalid_argument(
                    format!("lots row {} total_amount", row + 1),
                    raw_amount,
                    "not a number",
                )
            })?
        };

        lots.push(LotInput {
            id: LotId::from_text(raw_id),
            total_amount,
        });
    }

    Ok(lots)
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|header| names.contains(&header))
        .ok_or_else(|| {
            PlannerError::invalid_argument(
                "lots header",
                headers.iter().collect::<Vec<_>>().join(","),
                format!("missing column '{}'", names[0]),
            )
        })
}

pub fn render_csv(schedule: &Schedule) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for stage in &schedule.stages {
        writer.write_record([
            stage.lot_id.to_string(),
            stage.duration_days.to_string(),
            format_iso_date(stage.start_date),
            format_iso_date(stage.end_date),
            stage.display_range()?,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PlannerError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PlannerError::ConfigError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}
