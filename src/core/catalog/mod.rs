#![allow(clippy::result_large_err)]

//! Transformers, router and pipelines assembled from configuration.

use crate::core::config::{MandateConfig, TransformerConfig};
use crate::core::error::AppError;
use crate::core::router::TransformerRouter;
use crate::core::transformer::{Transformer, TransformerBuilder};
use crate::core::types::ErrorCategory;
use indexmap::IndexMap;
use mandate_types::{BoundOperation, Payload, Requirement};

/// Everything a worker needs to process messages.
#[derive(Debug, Clone)]
pub struct Catalog {
    router: TransformerRouter,
    pipelines: IndexMap<String, Vec<BoundOperation>>,
}

impl Catalog {
    /// Assemble a catalog from programmatically defined parts.
    pub fn new(router: TransformerRouter, pipelines: IndexMap<String, Vec<BoundOperation>>) -> Self {
        Self { router, pipelines }
    }

    /// Build every declared transformer. Definition problems surface here,
    /// before any message is read.
    pub fn from_config(config: &MandateConfig) -> Result<Self, AppError> {
        let mut defined: IndexMap<String, Transformer> = IndexMap::new();
        let mut pipelines = IndexMap::new();

        for declared in &config.transformers {
            let transformer = build_transformer(config, declared, &defined)?;
            check_pipeline(&transformer, &declared.pipeline)?;
            pipelines.insert(declared.name.clone(), declared.pipeline.clone());
            defined.insert(declared.name.clone(), transformer);
        }

        let mut router = TransformerRouter::builder(config.router.tag_field.clone());
        for transformer in defined.into_values() {
            router.register(transformer);
        }

        let catalog = Self {
            router: router.build()?,
            pipelines,
        };
        tracing::info!(
            transformers = catalog.router.len(),
            tag_field = catalog.router.tag_field(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn router(&self) -> &TransformerRouter {
        &self.router
    }

    /// Invocation list configured for a transformer; empty when none is.
    pub fn pipeline(&self, transformer: &str) -> &[BoundOperation] {
        self.pipelines
            .get(transformer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Route a payload and apply its configured pipeline.
    pub fn process(&self, payload: Payload) -> Result<Payload, AppError> {
        let transformer = self.router.route(&payload)?;
        let output = transformer.transform(payload, self.pipeline(transformer.name()))?;
        Ok(output)
    }
}

fn build_transformer(
    config: &MandateConfig,
    declared: &TransformerConfig,
    defined: &IndexMap<String, Transformer>,
) -> Result<Transformer, AppError> {
    let mut builder = TransformerBuilder::new(declared.name.clone());
    if let Some(parent) = &declared.inherits {
        let parent = defined.get(parent).ok_or_else(|| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!(
                    "transformer '{}' inherits from unknown transformer '{}'",
                    declared.name, parent
                ),
            )
        })?;
        builder.inherit(parent.definition());
    }

    builder.discriminator(declared.discriminator_field(&config.router), declared.tag.clone());
    for operation in &declared.operations {
        builder.add(
            operation
                .kind
                .clone()
                .into_operation(operation.name.clone(), Requirement::from(operation.required)),
        );
    }

    Ok(Transformer::define(builder)?)
}

/// Reject pipelines that can never succeed: unknown operations or a required
/// operation that is never invoked.
fn check_pipeline(transformer: &Transformer, pipeline: &[BoundOperation]) -> Result<(), AppError> {
    for step in pipeline {
        if !transformer.has_operation(step.identity()) {
            return Err(AppError::new(
                ErrorCategory::ConfigError,
                format!(
                    "pipeline of transformer '{}' invokes unknown operation '{}'",
                    transformer.name(),
                    step.identity()
                ),
            )
            .with_code("MDT-CONFIG-003"));
        }
    }

    let missing: Vec<&str> = transformer
        .required_operations()
        .iter()
        .filter(|required| !pipeline.iter().any(|step| step.identity() == required.as_str()))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::new(
            ErrorCategory::ConfigError,
            format!(
                "pipeline of transformer '{}' never invokes required operations: {}",
                transformer.name(),
                missing.join(", ")
            ),
        )
        .with_code("MDT-CONFIG-004"));
    }
    Ok(())
}
