//! Shared data model for mandate transformers and their configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One message being transformed. Keys keep their insertion order.
pub type Payload = Map<String, Value>;

/// Keyword arguments bound to an invocation ahead of execution.
pub type BoundArgs = Map<String, Value>;

/// Marker fixed on an operation when its transformer type is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Required,
    #[default]
    Optional,
}

impl Requirement {
    pub fn is_required(self) -> bool {
        matches!(self, Requirement::Required)
    }
}

impl From<bool> for Requirement {
    fn from(required: bool) -> Self {
        if required {
            Requirement::Required
        } else {
            Requirement::Optional
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Required => write!(f, "required"),
            Requirement::Optional => write!(f, "optional"),
        }
    }
}

/// An operation identity paired with the arguments bound to it.
///
/// Binding arguments never changes the identity: two `BoundOperation`s naming
/// the same operation count once for coverage, whatever their arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundOperation {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub args: BoundArgs,
}

impl BoundOperation {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            args: BoundArgs::new(),
        }
    }

    /// Bind one more keyword argument.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    pub fn with_args(operation: impl Into<String>, args: BoundArgs) -> Self {
        Self {
            operation: operation.into(),
            args,
        }
    }

    /// Underlying operation name used for coverage.
    pub fn identity(&self) -> &str {
        &self.operation
    }
}

impl fmt::Display for BoundOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.operation)
        } else {
            write!(f, "{}({})", self.operation, Value::Object(self.args.clone()))
        }
    }
}
