use crate::core::transformer::operation::OperationError;

/// Failure of a single `transform` call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("payload rejected by transformer '{transformer}': expected message type '{expected_tag}'")]
    TypeMismatch {
        transformer: String,
        expected_tag: String,
    },

    #[error(
        "mandatory operations of transformer '{transformer}' were not applied: {}",
        missing.join(", ")
    )]
    MissingRequired {
        transformer: String,
        /// Sorted, never empty.
        missing: Vec<String>,
    },

    #[error("transformer '{transformer}' has no operation named '{operation}'")]
    UnknownOperation {
        transformer: String,
        operation: String,
    },

    #[error("operation '{operation}' of transformer '{transformer}' failed: {source}")]
    Operation {
        transformer: String,
        operation: String,
        #[source]
        source: OperationError,
    },
}

impl TransformError {
    /// Stable diagnostic code for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            TransformError::TypeMismatch { .. } => "MDT-TYPE-001",
            TransformError::MissingRequired { .. } => "MDT-COVERAGE-001",
            TransformError::UnknownOperation { .. } => "MDT-OP-001",
            TransformError::Operation { .. } => "MDT-OP-002",
        }
    }

    pub fn transformer(&self) -> &str {
        match self {
            TransformError::TypeMismatch { transformer, .. }
            | TransformError::MissingRequired { transformer, .. }
            | TransformError::UnknownOperation { transformer, .. }
            | TransformError::Operation { transformer, .. } => transformer,
        }
    }

    /// Missing operation names when this is a coverage failure.
    pub fn missing_operations(&self) -> Option<&[String]> {
        match self {
            TransformError::MissingRequired { missing, .. } => Some(missing),
            _ => None,
        }
    }
}

/// Programmer error raised while a transformer type is being defined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("transformer name cannot be empty")]
    EmptyName,

    #[error("transformer '{transformer}' declares an operation with an empty name")]
    EmptyOperationName { transformer: String },

    #[error("transformer '{transformer}' declares operation '{operation}' more than once")]
    DuplicateOperation {
        transformer: String,
        operation: String,
    },

    #[error("transformer '{transformer}' has no type validator")]
    MissingValidator { transformer: String },

    #[error("transformer '{transformer}' marks unknown operation '{operation}' as required")]
    UnknownRequired {
        transformer: String,
        operation: String,
    },
}

impl DefinitionError {
    pub fn code(&self) -> &'static str {
        "MDT-DEF-001"
    }
}
