use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    CoverageError,
    OperationError,
    DefinitionError,
    RoutingError,
    ConfigError,
    SerializationError,
    IoError,
    InternalError,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Fatal,
    Error,
    Warning,
    Info,
}

impl ErrorCategory {
    /// Definition and configuration problems stop startup; everything else
    /// only fails the message at hand.
    pub fn default_severity(self) -> ErrorSeverity {
        match self {
            ErrorCategory::DefinitionError | ErrorCategory::ConfigError => ErrorSeverity::Fatal,
            ErrorCategory::ValidationError
            | ErrorCategory::CoverageError
            | ErrorCategory::OperationError
            | ErrorCategory::RoutingError
            | ErrorCategory::SerializationError
            | ErrorCategory::IoError
            | ErrorCategory::InternalError => ErrorSeverity::Error,
            ErrorCategory::Unknown => ErrorSeverity::Info,
        }
    }
}
