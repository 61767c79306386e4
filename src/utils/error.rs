use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid argument '{field}' = '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' = '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        PlannerError::InvalidArgument {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::InvalidArgument { .. } => ErrorCategory::Input,
            PlannerError::IoError(_) => ErrorCategory::Io,
            PlannerError::CsvError(_) | PlannerError::SerializationError(_) => ErrorCategory::Data,
            PlannerError::TomlError(_)
            | PlannerError::ConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlannerError::InvalidArgument { field, .. } => {
                format!("Check the value supplied for '{}'", field)
            }
            PlannerError::IoError(_) => {
                "Check that the lots file exists and the output directory is writable".to_string()
            }
            PlannerError::CsvError(_) => {
                "Lots CSV needs an 'id' column and a 'total_amount' column".to_string()
            }
            PlannerError::SerializationError(_) => {
                "Lots JSON must be an array of {\"id\", \"totalAmount\"} objects".to_string()
            }
            PlannerError::TomlError(_) => "Fix the TOML syntax of the configuration file".to_string(),
            PlannerError::ConfigError { .. } => "Review the configuration file".to_string(),
            PlannerError::InvalidConfigValueError { field, .. } => {
                format!("Correct the configuration field '{}'", field)
            }
            PlannerError::MissingConfigError { field } => {
                format!("Add the required configuration field '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::InvalidArgument { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            PlannerError::IoError(e) => format!("File access failed: {}", e),
            PlannerError::CsvError(e) => format!("Could not read lots CSV: {}", e),
            PlannerError::SerializationError(e) => format!("Could not read lots JSON: {}", e),
            other => other.to_string(),
        }
    }
}
