use crate::domain::model::Role;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("Missing role data: {}", format_roles(.roles))]
    MissingRoleData { roles: Vec<Role> },

    #[error("Render failure: {message}")]
    RenderFailure { message: String },

    #[error("Workbook could not be read: {message}")]
    WorkbookError { message: String },

    #[error("Upload could not be processed: {message}")]
    UploadError { message: String },

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("Background task failed: {message}")]
    TaskFailure { message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Rendering,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RosterError::NoFileUploaded
            | RosterError::MissingRoleData { .. }
            | RosterError::WorkbookError { .. }
            | RosterError::UploadError { .. }
            | RosterError::PayloadTooLarge { .. }
            | RosterError::ZipError(_)
            | RosterError::CsvError(_) => ErrorCategory::Input,
            RosterError::RenderFailure { .. } => ErrorCategory::Rendering,
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. }
            | RosterError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RosterError::IoError(_)
            | RosterError::SerializationError(_)
            | RosterError::TaskFailure { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Rendering | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Errors caused by what the caller sent, as opposed to server-side faults.
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::NoFileUploaded => "No file uploaded.".to_string(),
            RosterError::MissingRoleData { roles } => format!(
                "Missing required sheets. Please ensure you have sheets for Developers, \
                 Business Analysts, and Data Analysts. Missing: {}.",
                format_roles(roles)
            ),
            RosterError::WorkbookError { .. }
            | RosterError::ZipError(_)
            | RosterError::CsvError(_) => {
                "The uploaded file could not be read as a spreadsheet.".to_string()
            }
            RosterError::UploadError { message } => format!("Invalid upload: {}", message),
            RosterError::PayloadTooLarge { limit } => format!(
                "File too large. Uploads are limited to {} bytes.",
                limit
            ),
            RosterError::RenderFailure { .. } => "Failed to generate the team report.".to_string(),
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. }
            | RosterError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            RosterError::IoError(_)
            | RosterError::SerializationError(_)
            | RosterError::TaskFailure { .. } => {
                "An internal error occurred.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RosterError::NoFileUploaded => "Attach the workbook in the 'file' form field",
            RosterError::MissingRoleData { .. } => {
                "Name the sheets so they contain 'Developer', 'Business' and 'Data', each with at least one row"
            }
            RosterError::WorkbookError { .. }
            | RosterError::ZipError(_)
            | RosterError::CsvError(_) => {
                "Upload an .xlsx/.xls/.ods workbook or a .zip of CSV files with a header row"
            }
            RosterError::UploadError { .. } => "Send the request as multipart/form-data",
            RosterError::PayloadTooLarge { .. } => {
                "Upload a smaller workbook or raise --max-upload-bytes"
            }
            RosterError::RenderFailure { .. } => "Retry the request; check server memory if it persists",
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. }
            | RosterError::MissingConfigError { .. } => {
                "Check the configuration file and command line flags"
            }
            RosterError::IoError(_) => "Check that the upload directory exists and is writable",
            RosterError::SerializationError(_) => "Check the input data format",
            RosterError::TaskFailure { .. } => "Retry the request; check the server logs if it persists",
        }
    }
}

fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|role| role.pool_name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_role_data_names_every_role() {
        let err = RosterError::MissingRoleData {
            roles: vec![Role::Developer, Role::DataAnalyst],
        };
        assert_eq!(err.to_string(), "Missing role data: developers, data analysts");
        assert!(err.user_friendly_message().contains("Missing: developers, data analysts."));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_render_failure_is_not_client_error() {
        let err = RosterError::RenderFailure {
            message: "out of memory".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Rendering);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_client_error());
        assert!(!err.user_friendly_message().contains("out of memory"));
    }

    #[test]
    fn test_payload_too_large_states_limit() {
        let err = RosterError::PayloadTooLarge { limit: 1024 };
        assert!(err.is_client_error());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("1024 bytes"));
    }
}
