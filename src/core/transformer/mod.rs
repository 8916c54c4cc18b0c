//! Transformers with mandatory operations.
//!
//! A transformer type declares its operations once, marking some of them as
//! required. Every [`Transformer::transform`] call then checks the payload's
//! discriminator, runs the caller's invocation list in order and refuses to
//! succeed unless each required operation ran at least once.

mod enforcement;
mod error;
mod executor;
mod facade;
mod operation;
mod registry;
mod validator;

pub use enforcement::{enforce, CoverageReport};
pub use error::{DefinitionError, TransformError};
pub use executor::{InvokedSet, PipelineExecutor};
pub use facade::Transformer;
pub use operation::{
    optional_arg, required_arg, string_arg, Operation, OperationError, OperationFn,
};
pub use registry::{CapabilityRegistry, TransformerBuilder, TransformerDefinition};
pub use validator::{validate, FieldEquals, FieldMatches, PredicateValidator, TypeValidator};
