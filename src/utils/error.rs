use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sheets API returned {status}: {body}")]
    RemoteServiceError { status: u16, body: String },

    #[error("No data found in sheet '{tab}'")]
    EmptyDataError { tab: String },

    #[error("Failed to write artifact '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate column header '{header}'")]
    DuplicateHeaderError { header: String },

    #[error("Column '{column}' is required for country filtering but missing from the sheet")]
    MissingColumnError { column: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SyncError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::ConfigError { .. }
            | SyncError::MissingConfigError { .. }
            | SyncError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SyncError::RemoteServiceError { .. } | SyncError::ApiError(_) => {
                ErrorCategory::Network
            }
            SyncError::EmptyDataError { .. }
            | SyncError::DuplicateHeaderError { .. }
            | SyncError::MissingColumnError { .. }
            | SyncError::CsvError(_)
            | SyncError::SerializationError(_) => ErrorCategory::Data,
            SyncError::WriteError { .. } | SyncError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error; never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SyncError::RemoteServiceError { status, body } => {
                format!(
                    "Google Sheets API error {}: {}",
                    status,
                    truncate(body, 200)
                )
            }
            SyncError::EmptyDataError { tab } => {
                format!("The sheet '{}' returned no rows, not even a header", tab)
            }
            SyncError::WriteError { path, .. } => {
                format!("Could not write output file '{}'", path)
            }
            SyncError::ApiError(e) if e.is_timeout() => {
                "The Google Sheets request timed out".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SyncError::RemoteServiceError { status: 403, .. } => {
                "Check that the API key is valid and the Sheets API is enabled"
            }
            SyncError::RemoteServiceError { status: 404, .. } => {
                "Check the spreadsheet id and that the sheet is shared"
            }
            SyncError::RemoteServiceError { status: 400, .. } => {
                "Check that the tab name exists in the spreadsheet"
            }
            SyncError::RemoteServiceError { .. } | SyncError::ApiError(_) => {
                "Check network connectivity and try again"
            }
            SyncError::EmptyDataError { .. } => "Add a header row to the sheet",
            SyncError::DuplicateHeaderError { .. } => {
                "Rename the duplicate column or set duplicate_headers = \"last_wins\""
            }
            SyncError::MissingColumnError { .. } => {
                "Add a Country column or clear the destination's country list"
            }
            SyncError::WriteError { .. } | SyncError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            SyncError::ConfigError { .. }
            | SyncError::MissingConfigError { .. }
            | SyncError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or environment variables"
            }
            SyncError::CsvError(_) | SyncError::SerializationError(_) => {
                "Check the sheet for malformed cell values"
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
