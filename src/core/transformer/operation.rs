use mandate_types::{BoundArgs, Payload, Requirement};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Function body of an operation. Mutates the payload in place.
pub type OperationFn =
    Arc<dyn Fn(&mut Payload, &BoundArgs) -> Result<(), OperationError> + Send + Sync>;

/// Failure raised by an operation body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperationError {
    #[error("missing bound argument '{0}'")]
    MissingArgument(String),

    #[error("invalid bound argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("payload has no field '{0}'")]
    MissingField(String),

    #[error("{0}")]
    Failed(String),
}

/// Named unit of transformation logic registered on a transformer type.
#[derive(Clone)]
pub struct Operation {
    name: String,
    requirement: Requirement,
    func: OperationFn,
}

impl Operation {
    pub fn new<F>(name: impl Into<String>, requirement: Requirement, func: F) -> Self
    where
        F: Fn(&mut Payload, &BoundArgs) -> Result<(), OperationError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            requirement,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }

    pub fn is_required(&self) -> bool {
        self.requirement.is_required()
    }

    pub(crate) fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub(crate) fn invoke(&self, payload: &mut Payload, args: &BoundArgs) -> Result<(), OperationError> {
        (self.func)(payload, args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("requirement", &self.requirement)
            .finish_non_exhaustive()
    }
}

/// Fetch a bound argument that must be present.
pub fn required_arg<'a>(args: &'a BoundArgs, name: &str) -> Result<&'a Value, OperationError> {
    args.get(name)
        .ok_or_else(|| OperationError::MissingArgument(name.to_string()))
}

/// Fetch a bound argument, falling back to JSON `null`.
pub fn optional_arg(args: &BoundArgs, name: &str) -> Value {
    args.get(name).cloned().unwrap_or(Value::Null)
}

/// Fetch a bound argument that must be a string.
pub fn string_arg<'a>(args: &'a BoundArgs, name: &str) -> Result<&'a str, OperationError> {
    required_arg(args, name)?
        .as_str()
        .ok_or_else(|| OperationError::InvalidArgument {
            argument: name.to_string(),
            reason: "expected a string".to_string(),
        })
}
