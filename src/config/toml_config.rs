use crate::config::{resolve_lots_format, OUTPUT_FORMATS};
use crate::core::{AllocationMethod, ConfigProvider, LotsFormat};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub project: ProjectConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub start_date: Option<String>,
    pub total_duration_days: i64,
    #[serde(default)]
    pub method: AllocationMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_output_formats() -> Vec<String> {
    OUTPUT_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl TomlConfig {
    /// Loads and parses a TOML project file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        self.lots_format()?;
        self.start_date()?;
        validation::validate_positive_number(
            "project.total_duration_days",
            self.project.total_duration_days,
            1,
        )?;
        validation::validate_allowed_values(
            "load.output_formats",
            &self.load.output_formats,
            &OUTPUT_FORMATS,
        )
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn lots_file(&self) -> &str {
        &self.source.path
    }

    fn lots_format(&self) -> Result<LotsFormat> {
        resolve_lots_format(&self.source.path, self.source.format.as_deref())
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn start_date(&self) -> Result<NaiveDate> {
        let raw = validation::validate_required_field("project.start_date", &self.project.start_date)?;
        validation::validate_iso_date("project.start_date", raw)
    }

    fn total_duration_days(&self) -> i64 {
        self.project.total_duration_days
    }

    fn method(&self) -> AllocationMethod {
        self.project.method
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
