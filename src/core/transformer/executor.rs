use crate::core::transformer::error::TransformError;
use crate::core::transformer::registry::TransformerDefinition;
use mandate_types::{BoundOperation, Payload};
use std::collections::BTreeSet;

/// Operation identities executed during one call. A set, not a multiset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokedSet(BTreeSet<String>);

impl InvokedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, operation: impl Into<String>) -> bool {
        self.0.insert(operation.into())
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.0.contains(operation)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.0
    }

    pub fn into_inner(self) -> BTreeSet<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for InvokedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Applies an invocation list to a payload, strictly in order.
pub struct PipelineExecutor<'a> {
    definition: &'a TransformerDefinition,
}

impl<'a> PipelineExecutor<'a> {
    pub fn new(definition: &'a TransformerDefinition) -> Self {
        Self { definition }
    }

    /// Run every invocation against `payload`, recording each operation
    /// identity once it returned successfully.
    ///
    /// The first unknown or failing operation aborts the run; the payload may
    /// already carry the effects of earlier steps.
    pub fn execute(
        &self,
        payload: &mut Payload,
        invocations: &[BoundOperation],
    ) -> Result<InvokedSet, TransformError> {
        let transformer = self.definition.name();
        let mut invoked = InvokedSet::new();

        for (step, invocation) in invocations.iter().enumerate() {
            let identity = invocation.identity();
            let operation = self.definition.operation(identity).ok_or_else(|| {
                TransformError::UnknownOperation {
                    transformer: transformer.to_string(),
                    operation: identity.to_string(),
                }
            })?;

            tracing::debug!(
                transformer,
                operation = identity,
                step,
                args = ?invocation.args,
                "invoking operation"
            );

            operation
                .invoke(payload, &invocation.args)
                .map_err(|source| TransformError::Operation {
                    transformer: transformer.to_string(),
                    operation: identity.to_string(),
                    source,
                })?;

            invoked.insert(identity);
        }

        Ok(invoked)
    }
}
