pub mod cli;
pub mod toml_config;

use crate::core::LotsFormat;
use crate::utils::error::{PlannerError, Result};
use std::path::Path;

/// An explicit format wins; otherwise the file extension decides.
pub fn resolve_lots_format(lots_file: &str, explicit: Option<&str>) -> Result<LotsFormat> {
    let name = match explicit {
        Some(format) => format.to_ascii_lowercase(),
        None => Path::new(lots_file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default(),
    };

    match name.as_str() {
        "csv" => Ok(LotsFormat::Csv),
        "json" => Ok(LotsFormat::Json),
        other => Err(PlannerError::InvalidConfigValueError {
            field: "lots_format".to_string(),
            value: other.to_string(),
            reason: format!(
                "Cannot read lots file '{}'. Supported formats: csv, json",
                lots_file
            ),
        }),
    }
}

pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::{resolve_lots_format, OUTPUT_FORMATS};
    use crate::core::{AllocationMethod, ConfigProvider, LotsFormat};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use chrono::NaiveDate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "stage-planner")]
    #[command(about = "Plan project stage dates from a DQE lot breakdown")]
    pub struct CliConfig {
        /// Lots file (CSV with id,total_amount or a JSON array)
        #[arg(long)]
        pub lots_file: String,

        /// csv or json; inferred from the extension when omitted
        #[arg(long)]
        pub lots_format: Option<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_values = ["csv", "json"])]
        pub output_formats: Vec<String>,

        /// Project start date, YYYY-MM-DD
        #[arg(long)]
        pub start_date: String,

        #[arg(long)]
        pub total_days: i64,

        #[arg(long, value_enum, default_value_t = AllocationMethod::Proportional)]
        pub method: AllocationMethod,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn lots_file(&self) -> &str {
            &self.lots_file
        }

        fn lots_format(&self) -> Result<LotsFormat> {
            resolve_lots_format(&self.lots_file, self.lots_format.as_deref())
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn start_date(&self) -> Result<NaiveDate> {
            validation::validate_iso_date("start_date", &self.start_date)
        }

        fn total_duration_days(&self) -> i64 {
            self.total_days
        }

        fn method(&self) -> AllocationMethod {
            self.method
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("lots_file", &self.lots_file)?;
            validation::validate_path("output_path", &self.output_path)?;
            self.lots_format()?;
            self.start_date()?;
            validation::validate_positive_number("total_days", self.total_days, 1)?;
            validation::validate_allowed_values("output_formats", &self.output_formats, &OUTPUT_FORMATS)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_cli_flags() {
            let config = CliConfig::try_parse_from([
                "stage-planner",
                "--lots-file",
                "dqe.json",
                "--start-date",
                "2024-11-15",
                "--total-days",
                "120",
                "--method",
                "equal",
                "--output-formats",
                "json",
            ])
            .unwrap();

            assert_eq!(config.method, AllocationMethod::Equal);
            assert_eq!(config.output_formats, vec!["json".to_string()]);
            assert_eq!(config.lots_format().unwrap(), LotsFormat::Json);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_cli_defaults() {
            let config = CliConfig::try_parse_from([
                "stage-planner",
                "--lots-file",
                "dqe.csv",
                "--start-date",
                "2024-11-15",
                "--total-days",
                "30",
            ])
            .unwrap();

            assert_eq!(config.method, AllocationMethod::Proportional);
            assert_eq!(config.output_formats, vec!["csv".to_string(), "json".to_string()]);
            assert_eq!(config.output_path, "./output");
        }

        #[test]
        fn test_cli_validation_failures() {
            let base = [
                "stage-planner",
                "--lots-file",
                "dqe.csv",
                "--start-date",
                "2024-11-15",
                "--total-days",
                "30",
            ];

            let mut config = CliConfig::try_parse_from(base).unwrap();
            config.total_days = 0;
            assert!(config.validate().is_err());

            let mut config = CliConfig::try_parse_from(base).unwrap();
            config.start_date = "15/11/2024".to_string();
            assert!(config.validate().is_err());

            let mut config = CliConfig::try_parse_from(base).unwrap();
            config.lots_file = "dqe.xlsx".to_string();
            assert!(config.validate().is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_lots_format() {
        assert_eq!(resolve_lots_format("dqe.csv", None).unwrap(), LotsFormat::Csv);
        assert_eq!(resolve_lots_format("dqe.JSON", None).unwrap(), LotsFormat::Json);
        assert_eq!(resolve_lots_format("export.txt", Some("csv")).unwrap(), LotsFormat::Csv);
        assert!(resolve_lots_format("dqe", None).is_err());
        assert!(resolve_lots_format("dqe.csv", Some("xml")).is_err());
    }
}
