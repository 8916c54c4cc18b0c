use crate::core::transformer::error::TransformError;
use mandate_types::Payload;
use regex::Regex;
use serde_json::Value;

/// Discriminator check confirming a payload belongs to a transformer's
/// message family.
pub trait TypeValidator: Send + Sync + 'static {
    /// Tag reported when the check fails and used as the routing key.
    fn expected_tag(&self) -> &str;

    /// Payload field the check reads, when it reads exactly one.
    fn discriminator_field(&self) -> Option<&str> {
        None
    }

    fn matches(&self, payload: &Payload) -> bool;
}

/// Passes when `payload[field]` is the string `tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEquals {
    field: String,
    tag: String,
}

impl FieldEquals {
    pub fn new(field: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            tag: tag.into(),
        }
    }
}

impl TypeValidator for FieldEquals {
    fn expected_tag(&self) -> &str {
        &self.tag
    }

    fn discriminator_field(&self) -> Option<&str> {
        Some(&self.field)
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.get(&self.field).and_then(Value::as_str) == Some(self.tag.as_str())
    }
}

/// Passes when `payload[field]` is a string matching `pattern`.
#[derive(Debug, Clone)]
pub struct FieldMatches {
    field: String,
    tag: String,
    pattern: Regex,
}

impl FieldMatches {
    pub fn new(
        field: impl Into<String>,
        tag: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            field: field.into(),
            tag: tag.into(),
            pattern: Regex::new(pattern)?,
        })
    }
}

impl TypeValidator for FieldMatches {
    fn expected_tag(&self) -> &str {
        &self.tag
    }

    fn discriminator_field(&self) -> Option<&str> {
        Some(&self.field)
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload
            .get(&self.field)
            .and_then(Value::as_str)
            .is_some_and(|value| self.pattern.is_match(value))
    }
}

/// Arbitrary predicate with a fixed tag for reporting.
pub struct PredicateValidator<F> {
    tag: String,
    predicate: F,
}

impl<F> PredicateValidator<F>
where
    F: Fn(&Payload) -> bool + Send + Sync + 'static,
{
    pub fn new(tag: impl Into<String>, predicate: F) -> Self {
        Self {
            tag: tag.into(),
            predicate,
        }
    }
}

impl<F> TypeValidator for PredicateValidator<F>
where
    F: Fn(&Payload) -> bool + Send + Sync + 'static,
{
    fn expected_tag(&self) -> &str {
        &self.tag
    }

    fn matches(&self, payload: &Payload) -> bool {
        (self.predicate)(payload)
    }
}

/// Run the discriminator check for `transformer`. Never mutates the payload.
pub fn validate(
    transformer: &str,
    validator: &dyn TypeValidator,
    payload: &Payload,
) -> Result<(), TransformError> {
    if validator.matches(payload) {
        Ok(())
    } else {
        Err(TransformError::TypeMismatch {
            transformer: transformer.to_string(),
            expected_tag: validator.expected_tag().to_string(),
        })
    }
}
