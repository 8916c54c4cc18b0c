use crate::core::router::RouteError;
use crate::core::transformer::{DefinitionError, TransformError};
use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: HashMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        AppError {
            category,
            severity: category.default_severity(),
            code: format!("ERR-{}", uuid::Uuid::new_v4()),
            message: message.into(),
            context: HashMap::new(),
            recovery_suggestions: vec![],
            occurred_at: Utc::now(),
            source: None,
        }
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(anyhow::anyhow!(source));
        error
    }

    pub fn with_context<T: Into<String>>(mut self, context: T) -> Self {
        self.context.insert("context".to_string(), context.into());
        self
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_suggestion<T: Into<String>>(mut self, suggestion: T) -> Self {
        self.recovery_suggestions.push(suggestion.into());
        self
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if !self.context.is_empty() {
            let mut pairs: Vec<_> = self.context.iter().collect();
            pairs.sort();
            write!(f, " (Context: {:?})", pairs)?;
        }
        if let Some(ref source) = self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<TransformError> for AppError {
    fn from(e: TransformError) -> Self {
        let category = match &e {
            TransformError::TypeMismatch { .. } => ErrorCategory::ValidationError,
            TransformError::MissingRequired { .. } => ErrorCategory::CoverageError,
            TransformError::UnknownOperation { .. } | TransformError::Operation { .. } => {
                ErrorCategory::OperationError
            }
        };
        let mut error = AppError::new(category, e.to_string()).with_code(e.code());
        error.add_context("transformer", e.transformer());
        match &e {
            TransformError::TypeMismatch { expected_tag, .. } => {
                error.add_context("expected_tag", expected_tag);
                error = error.with_suggestion("Route the message to the transformer for its type");
            }
            TransformError::MissingRequired { missing, .. } => {
                error.add_context("missing", &missing.join(","));
                error = error.with_suggestion("Add the missing operations to the pipeline");
            }
            TransformError::UnknownOperation { operation, .. }
            | TransformError::Operation { operation, .. } => {
                error.add_context("operation", operation);
            }
        }
        error.source = Some(anyhow::Error::new(e));
        error
    }
}

impl From<DefinitionError> for AppError {
    fn from(e: DefinitionError) -> Self {
        let mut error = AppError::new(ErrorCategory::DefinitionError, e.to_string())
            .with_code(e.code())
            .with_suggestion("Fix the transformer declaration before processing messages");
        error.source = Some(anyhow::Error::new(e));
        error
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let mut error =
            AppError::new(ErrorCategory::RoutingError, e.to_string()).with_code(e.code());
        error.source = Some(anyhow::Error::new(e));
        error
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError {
            category: ErrorCategory::InternalError,
            severity: ErrorSeverity::Error,
            code: "ANYHOW_ERROR".to_string(),
            message: e.to_string(),
            context: HashMap::new(),
            recovery_suggestions: vec!["Check the error details".to_string()],
            occurred_at: Utc::now(),
            source: Some(e),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError {
            category: ErrorCategory::IoError,
            severity: ErrorSeverity::Error,
            code: "IO_ERROR".to_string(),
            message: e.to_string(),
            context: HashMap::new(),
            recovery_suggestions: vec!["Check file permissions and paths".to_string()],
            occurred_at: Utc::now(),
            source: Some(anyhow::anyhow!(e)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        let mut error = AppError::new(ErrorCategory::SerializationError, e.to_string())
            .with_code("SERDE_JSON_ERROR");
        error.source = Some(anyhow::Error::new(e));
        error
    }
}
