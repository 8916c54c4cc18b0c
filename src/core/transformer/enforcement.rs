use crate::core::transformer::error::TransformError;
use crate::core::transformer::executor::InvokedSet;
use crate::core::transformer::registry::CapabilityRegistry;
use serde::Serialize;
use std::collections::BTreeSet;

/// Reconciliation of required against invoked operations for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub required: BTreeSet<String>,
    pub invoked: BTreeSet<String>,
    /// `required - invoked`.
    pub missing: BTreeSet<String>,
    /// Invoked operations that are not required. Never an error.
    pub extra: BTreeSet<String>,
}

impl CoverageReport {
    pub fn compute(registry: &CapabilityRegistry, invoked: &InvokedSet) -> Self {
        let required = registry.required().clone();
        let invoked = invoked.as_set().clone();
        let missing = required.difference(&invoked).cloned().collect();
        let extra = invoked.difference(&required).cloned().collect();
        Self {
            required,
            invoked,
            missing,
            extra,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Fail with `MissingRequired` unless every required operation was invoked.
pub fn enforce(
    transformer: &str,
    registry: &CapabilityRegistry,
    invoked: &InvokedSet,
) -> Result<CoverageReport, TransformError> {
    let report = CoverageReport::compute(registry, invoked);
    if report.is_satisfied() {
        if !report.extra.is_empty() {
            tracing::trace!(transformer, extra = ?report.extra, "optional operations applied");
        }
        return Ok(report);
    }

    tracing::debug!(transformer, missing = ?report.missing, "coverage check failed");
    Err(TransformError::MissingRequired {
        transformer: transformer.to_string(),
        missing: report.missing.into_iter().collect(),
    })
}
