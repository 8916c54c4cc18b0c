use mandate::core::transformer::{enforce, CoverageReport, InvokedSet, TransformError, Transformer};
use std::collections::BTreeSet;

const OPERATIONS: [&str; 5] = ["a", "b", "c", "d", "e"];
const REQUIRED: [&str; 3] = ["a", "c", "e"];

fn transformer() -> Transformer {
    let mut builder = Transformer::builder("Coverage");
    builder.discriminator("kind", "coverage");
    for name in OPERATIONS {
        if REQUIRED.contains(&name) {
            builder.required(name, |_, _| Ok(()));
        } else {
            builder.operation(name, |_, _| Ok(()));
        }
    }
    Transformer::define(builder).unwrap()
}

/// Every subset of the declared operations, as bitmasks.
fn subsets() -> impl Iterator<Item = InvokedSet> {
    (0u32..1 << OPERATIONS.len()).map(|mask| {
        OPERATIONS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, name)| *name)
            .collect()
    })
}

#[test]
fn test_success_iff_required_is_subset_of_invoked() {
    let transformer = transformer();
    let registry = transformer.definition().registry();
    let required: BTreeSet<String> = REQUIRED.iter().map(|s| s.to_string()).collect();

    for invoked in subsets() {
        let expected_ok = required.is_subset(invoked.as_set());
        let result = enforce("Coverage", registry, &invoked);
        assert_eq!(result.is_ok(), expected_ok, "invoked: {:?}", invoked);

        if let Err(TransformError::MissingRequired { missing, .. }) = result {
            let expected: Vec<String> = required.difference(invoked.as_set()).cloned().collect();
            assert_eq!(missing, expected);
            let mut sorted = missing.clone();
            sorted.sort();
            assert_eq!(missing, sorted);
            assert!(!missing.is_empty());
        }
    }
}

#[test]
fn test_report_partitions_invoked_operations() {
    let transformer = transformer();
    let registry = transformer.definition().registry();

    for invoked in subsets() {
        let report = CoverageReport::compute(registry, &invoked);
        let rebuilt: BTreeSet<String> = report
            .invoked
            .intersection(&report.required)
            .chain(report.extra.iter())
            .cloned()
            .collect();
        assert_eq!(&rebuilt, invoked.as_set());
        assert!(report.extra.is_disjoint(&report.required));
        assert!(report.missing.is_disjoint(&report.invoked));
        assert_eq!(report.is_satisfied(), report.missing.is_empty());
    }
}

#[test]
fn test_enforcement_is_deterministic() {
    let transformer = transformer();
    let registry = transformer.definition().registry();
    let invoked: InvokedSet = ["b", "a"].into_iter().collect();

    let first = enforce("Coverage", registry, &invoked).unwrap_err();
    let second = enforce("Coverage", registry, &invoked).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(first.missing_operations(), Some(&["c".to_string(), "e".to_string()][..]));
}

#[test]
fn test_report_serializes_for_diagnostics() {
    let transformer = transformer();
    let invoked: InvokedSet = ["a", "b", "c", "e"].into_iter().collect();
    let report = enforce("Coverage", transformer.definition().registry(), &invoked).unwrap();

    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({
            "required": ["a", "c", "e"],
            "invoked": ["a", "b", "c", "e"],
            "missing": [],
            "extra": ["b"]
        })
    );
}
