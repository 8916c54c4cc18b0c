use crate::core::transformer::error::DefinitionError;
use crate::core::transformer::operation::{Operation, OperationError};
use crate::core::transformer::validator::{FieldEquals, TypeValidator};
use indexmap::IndexMap;
use mandate_types::{BoundArgs, Payload, Requirement};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

/// Names of the operations a transformer type requires. Frozen at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityRegistry {
    required: BTreeSet<String>,
}

impl CapabilityRegistry {
    fn from_operations<'a>(operations: impl IntoIterator<Item = &'a Operation>) -> Self {
        Self {
            required: operations
                .into_iter()
                .filter(|op| op.is_required())
                .map(|op| op.name().to_string())
                .collect(),
        }
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.required.contains(operation)
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

/// Builder used to declare a transformer type before any message is processed.
pub struct TransformerBuilder {
    name: String,
    validator: Option<Arc<dyn TypeValidator>>,
    inherited_validator: Option<Arc<dyn TypeValidator>>,
    operations: IndexMap<String, Operation>,
    declared: HashSet<String>,
    marked: Vec<String>,
    errors: Vec<DefinitionError>,
}

impl TransformerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validator: None,
            inherited_validator: None,
            operations: IndexMap::new(),
            declared: HashSet::new(),
            marked: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Use a string-equality discriminator on `field`.
    pub fn discriminator(&mut self, field: impl Into<String>, tag: impl Into<String>) -> &mut Self {
        self.validator(FieldEquals::new(field, tag))
    }

    pub fn validator<V: TypeValidator>(&mut self, validator: V) -> &mut Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Compose the operations and markers of an ancestor type.
    ///
    /// Operations declared on this builder win over inherited ones, marker
    /// included, regardless of call order.
    pub fn inherit(&mut self, parent: &TransformerDefinition) -> &mut Self {
        for operation in parent.operations.values() {
            if !self.declared.contains(operation.name()) {
                self.operations
                    .insert(operation.name().to_string(), operation.clone());
            }
        }
        if self.inherited_validator.is_none() {
            self.inherited_validator = Some(Arc::clone(&parent.validator));
        }
        self
    }

    /// Declare an optional operation.
    pub fn operation<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(&mut Payload, &BoundArgs) -> Result<(), OperationError> + Send + Sync + 'static,
    {
        self.add(Operation::new(name, Requirement::Optional, func))
    }

    /// Declare an operation every `transform` call must invoke.
    pub fn required<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(&mut Payload, &BoundArgs) -> Result<(), OperationError> + Send + Sync + 'static,
    {
        self.add(Operation::new(name, Requirement::Required, func))
    }

    pub fn add(&mut self, operation: Operation) -> &mut Self {
        let name = operation.name().to_string();
        if name.trim().is_empty() {
            self.errors.push(DefinitionError::EmptyOperationName {
                transformer: self.name.clone(),
            });
            return self;
        }
        if !self.declared.insert(name.clone()) {
            self.errors.push(DefinitionError::DuplicateOperation {
                transformer: self.name.clone(),
                operation: name,
            });
            return self;
        }
        self.operations.insert(name, operation);
        self
    }

    /// Flag an already declared or inherited operation as required.
    pub fn mark_required(&mut self, name: impl Into<String>) -> &mut Self {
        self.marked.push(name.into());
        self
    }

    pub fn build(self) -> Result<TransformerDefinition, DefinitionError> {
        let TransformerBuilder {
            name,
            validator,
            inherited_validator,
            mut operations,
            marked,
            errors,
            ..
        } = self;

        if name.trim().is_empty() {
            return Err(DefinitionError::EmptyName);
        }
        if let Some(error) = errors.into_iter().next() {
            return Err(error);
        }
        let validator = validator.or(inherited_validator).ok_or_else(|| {
            DefinitionError::MissingValidator {
                transformer: name.clone(),
            }
        })?;

        for operation in marked {
            let Some(existing) = operations.get_mut(&operation) else {
                return Err(DefinitionError::UnknownRequired {
                    transformer: name,
                    operation,
                });
            };
            *existing = existing.clone().with_requirement(Requirement::Required);
        }

        let registry = CapabilityRegistry::from_operations(operations.values());
        tracing::debug!(
            transformer = %name,
            operations = operations.len(),
            required = ?registry.required(),
            "transformer defined"
        );

        Ok(TransformerDefinition {
            name,
            validator,
            operations,
            registry,
        })
    }
}

/// Immutable description of a transformer type.
pub struct TransformerDefinition {
    name: String,
    validator: Arc<dyn TypeValidator>,
    operations: IndexMap<String, Operation>,
    registry: CapabilityRegistry,
}

impl TransformerDefinition {
    pub fn builder(name: impl Into<String>) -> TransformerBuilder {
        TransformerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        self.validator.expected_tag()
    }

    pub fn validator(&self) -> &dyn TypeValidator {
        self.validator.as_ref()
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Operations in declaration order, inherited ones first.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }
}

impl fmt::Debug for TransformerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerDefinition")
            .field("name", &self.name)
            .field("tag", &self.tag())
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .field("required", self.registry.required())
            .finish()
    }
}
