//! Built-in operation bodies that can be declared from configuration.

use crate::core::transformer::{string_arg, Operation, OperationError};
use mandate_types::{BoundArgs, Payload, Requirement};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation body selected by `kind` in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationKind {
    /// `payload[target] = args[argument]`, or `default` when the argument is
    /// not bound.
    SetField {
        target: String,
        argument: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<Value>,
    },
    /// Move `payload[from]` to `payload[to]`. Fails when `from` is absent.
    RenameField { from: String, to: String },
    /// Drop `payload[target]` if present.
    RemoveField { target: String },
    /// Write a bound string argument through a template with a `{}` slot.
    FormatField {
        target: String,
        argument: String,
        template: String,
    },
}

impl OperationKind {
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::SetField { .. } => "set_field",
            OperationKind::RenameField { .. } => "rename_field",
            OperationKind::RemoveField { .. } => "remove_field",
            OperationKind::FormatField { .. } => "format_field",
        }
    }

    pub fn apply(&self, payload: &mut Payload, args: &BoundArgs) -> Result<(), OperationError> {
        match self {
            OperationKind::SetField {
                target,
                argument,
                default,
            } => {
                let value = match (args.get(argument), default) {
                    (Some(value), _) => value.clone(),
                    (None, Some(default)) => default.clone(),
                    (None, None) => return Err(OperationError::MissingArgument(argument.clone())),
                };
                payload.insert(target.clone(), value);
                Ok(())
            }
            OperationKind::RenameField { from, to } => {
                let value = payload
                    .shift_remove(from)
                    .ok_or_else(|| OperationError::MissingField(from.clone()))?;
                payload.insert(to.clone(), value);
                Ok(())
            }
            OperationKind::RemoveField { target } => {
                payload.shift_remove(target);
                Ok(())
            }
            OperationKind::FormatField {
                target,
                argument,
                template,
            } => {
                let value = string_arg(args, argument)?;
                payload.insert(target.clone(), Value::String(template.replacen("{}", value, 1)));
                Ok(())
            }
        }
    }

    /// Bind this body to a name and marker.
    pub fn into_operation(self, name: impl Into<String>, requirement: Requirement) -> Operation {
        Operation::new(name, requirement, move |payload, args| self.apply(payload, args))
    }
}
