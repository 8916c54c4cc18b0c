//! Tag-keyed lookup from a payload's discriminator value to its transformer.

use crate::core::transformer::Transformer;
use indexmap::IndexMap;
use mandate_types::Payload;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("payload has no string field '{field}' to route on")]
    MissingTag { field: String },

    #[error("no transformer registered for {field} '{tag}'")]
    UnknownTag { field: String, tag: String },

    #[error("tag '{tag}' is claimed by both '{existing}' and '{duplicate}'")]
    DuplicateTag {
        tag: String,
        existing: String,
        duplicate: String,
    },
}

impl RouteError {
    pub fn code(&self) -> &'static str {
        match self {
            RouteError::MissingTag { .. } => "MDT-ROUTE-001",
            RouteError::UnknownTag { .. } => "MDT-ROUTE-002",
            RouteError::DuplicateTag { .. } => "MDT-ROUTE-003",
        }
    }
}

/// Builder used to register transformers before routing starts.
pub struct TransformerRouterBuilder {
    tag_field: String,
    transformers: IndexMap<String, Transformer>,
    errors: Vec<RouteError>,
}

impl TransformerRouterBuilder {
    pub fn new(tag_field: impl Into<String>) -> Self {
        Self {
            tag_field: tag_field.into(),
            transformers: IndexMap::new(),
            errors: Vec::new(),
        }
    }

    pub fn register(&mut self, transformer: Transformer) -> &mut Self {
        let tag = transformer.tag().to_string();
        if let Some(existing) = self.transformers.get(&tag) {
            self.errors.push(RouteError::DuplicateTag {
                tag,
                existing: existing.name().to_string(),
                duplicate: transformer.name().to_string(),
            });
            return self;
        }
        self.transformers.insert(tag, transformer);
        self
    }

    pub fn build(self) -> Result<TransformerRouter, RouteError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(TransformerRouter {
            tag_field: self.tag_field,
            by_tag: Arc::new(self.transformers),
        })
    }
}

/// Immutable router shared by every worker.
#[derive(Debug, Clone)]
pub struct TransformerRouter {
    tag_field: String,
    by_tag: Arc<IndexMap<String, Transformer>>,
}

impl TransformerRouter {
    pub fn builder(tag_field: impl Into<String>) -> TransformerRouterBuilder {
        TransformerRouterBuilder::new(tag_field)
    }

    pub fn tag_field(&self) -> &str {
        &self.tag_field
    }

    pub fn get(&self, tag: &str) -> Option<&Transformer> {
        self.by_tag.get(tag)
    }

    pub fn transformers(&self) -> impl Iterator<Item = &Transformer> {
        self.by_tag.values()
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Pick the transformer registered for the payload's tag.
    pub fn route(&self, payload: &Payload) -> Result<&Transformer, RouteError> {
        let tag = payload
            .get(&self.tag_field)
            .and_then(Value::as_str)
            .ok_or_else(|| RouteError::MissingTag {
                field: self.tag_field.clone(),
            })?;
        self.get(tag).ok_or_else(|| RouteError::UnknownTag {
            field: self.tag_field.clone(),
            tag: tag.to_string(),
        })
    }
}
