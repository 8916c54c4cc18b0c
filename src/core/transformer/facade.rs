use crate::core::transformer::enforcement::{enforce, CoverageReport};
use crate::core::transformer::error::{DefinitionError, TransformError};
use crate::core::transformer::executor::PipelineExecutor;
use crate::core::transformer::registry::{TransformerBuilder, TransformerDefinition};
use crate::core::transformer::validator::validate;
use mandate_types::{BoundOperation, Payload};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Shareable handle used by callers to transform messages.
///
/// Holds no per-call state, so one instance can serve concurrent calls on
/// different payloads without locking.
#[derive(Debug, Clone)]
pub struct Transformer {
    definition: Arc<TransformerDefinition>,
}

impl Transformer {
    pub fn builder(name: impl Into<String>) -> TransformerBuilder {
        TransformerDefinition::builder(name)
    }

    /// Finish a builder straight into a handle.
    pub fn define(builder: TransformerBuilder) -> Result<Self, DefinitionError> {
        builder.build().map(Self::from)
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn tag(&self) -> &str {
        self.definition.tag()
    }

    pub fn definition(&self) -> &TransformerDefinition {
        &self.definition
    }

    pub fn required_operations(&self) -> &BTreeSet<String> {
        self.definition.registry().required()
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.definition.operations().map(|op| op.name())
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.definition.operation(name).is_some()
    }

    /// Discriminator check alone.
    pub fn validate(&self, payload: &Payload) -> Result<(), TransformError> {
        validate(self.name(), self.definition.validator(), payload)
    }

    /// Validate, run the pipeline and enforce coverage, returning the mutated
    /// payload. On failure the payload is dropped.
    pub fn transform(
        &self,
        payload: Payload,
        invocations: &[BoundOperation],
    ) -> Result<Payload, TransformError> {
        let mut payload = payload;
        self.validate(&payload)?;
        self.run(&mut payload, invocations)?;
        Ok(payload)
    }

    /// Like [`Transformer::transform`], but only writes back into `payload`
    /// when the whole call succeeded.
    pub fn transform_in_place(
        &self,
        payload: &mut Payload,
        invocations: &[BoundOperation],
    ) -> Result<CoverageReport, TransformError> {
        self.validate(payload)?;
        let mut working = payload.clone();
        let report = self.run(&mut working, invocations)?;
        *payload = working;
        Ok(report)
    }

    fn run(
        &self,
        payload: &mut Payload,
        invocations: &[BoundOperation],
    ) -> Result<CoverageReport, TransformError> {
        let _span = tracing::debug_span!(
            "transform",
            transformer = %self.name(),
            steps = invocations.len()
        )
        .entered();

        let invoked = PipelineExecutor::new(&self.definition).execute(payload, invocations)?;
        enforce(self.name(), self.definition.registry(), &invoked)
    }
}

impl From<TransformerDefinition> for Transformer {
    fn from(definition: TransformerDefinition) -> Self {
        Self {
            definition: Arc::new(definition),
        }
    }
}
