use mandate::core::transformer::{
    required_arg, string_arg, InvokedSet, OperationError, PipelineExecutor, TransformError,
    Transformer,
};
use mandate_types::{BoundOperation, Payload};
use serde_json::json;

fn ledger() -> Transformer {
    let mut builder = Transformer::builder("Ledger");
    builder
        .discriminator("kind", "ledger")
        .required("append", |payload, args| {
            let entry = required_arg(args, "entry")?.clone();
            let entries = payload
                .entry("entries".to_string())
                .or_insert_with(|| json!([]));
            entries
                .as_array_mut()
                .ok_or_else(|| OperationError::Failed("entries is not a list".to_string()))?
                .push(entry);
            Ok(())
        })
        .operation("label", |payload, args| {
            let label = string_arg(args, "label")?;
            payload.insert("label".to_string(), json!(label));
            Ok(())
        });
    Transformer::define(builder).unwrap()
}

fn ledger_payload() -> Payload {
    json!({"kind": "ledger"}).as_object().cloned().unwrap()
}

#[test]
fn test_steps_run_in_order() {
    let transformer = ledger();
    let mut payload = ledger_payload();
    let invoked = PipelineExecutor::new(transformer.definition())
        .execute(
            &mut payload,
            &[
                BoundOperation::new("append").arg("entry", 1),
                BoundOperation::new("label").arg("label", "first"),
                BoundOperation::new("append").arg("entry", 2),
            ],
        )
        .unwrap();

    assert_eq!(payload["entries"], json!([1, 2]));
    assert_eq!(payload["label"], json!("first"));
    assert_eq!(invoked, ["append", "label"].into_iter().collect::<InvokedSet>());
}

#[test]
fn test_unknown_operation_stops_execution() {
    let transformer = ledger();
    let mut payload = ledger_payload();
    let err = PipelineExecutor::new(transformer.definition())
        .execute(
            &mut payload,
            &[
                BoundOperation::new("append").arg("entry", 1),
                BoundOperation::new("shred"),
                BoundOperation::new("label").arg("label", "never"),
            ],
        )
        .unwrap_err();

    assert_eq!(
        err,
        TransformError::UnknownOperation {
            transformer: "Ledger".to_string(),
            operation: "shred".to_string()
        }
    );
    assert_eq!(err.code(), "MDT-OP-001");
    assert!(!payload.contains_key("label"));
}

#[test]
fn test_missing_argument_is_reported_with_operation() {
    let transformer = ledger();
    let err = transformer
        .transform(ledger_payload(), &[BoundOperation::new("append")])
        .unwrap_err();

    match err {
        TransformError::Operation {
            operation, source, ..
        } => {
            assert_eq!(operation, "append");
            assert_eq!(source, OperationError::MissingArgument("entry".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_wrong_argument_type_is_invalid() {
    let transformer = ledger();
    let err = transformer
        .transform(
            ledger_payload(),
            &[
                BoundOperation::new("append").arg("entry", 1),
                BoundOperation::new("label").arg("label", 42),
            ],
        )
        .unwrap_err();
    assert!(matches!(
        err,
        TransformError::Operation {
            source: OperationError::InvalidArgument { .. },
            ..
        }
    ));
}

#[test]
fn test_failing_step_aborts_remaining_steps() {
    let transformer = ledger();
    let mut payload = json!({"kind": "ledger", "entries": "oops"})
        .as_object()
        .cloned()
        .unwrap();
    let result = PipelineExecutor::new(transformer.definition()).execute(
        &mut payload,
        &[
            BoundOperation::new("append").arg("entry", 1),
            BoundOperation::new("label").arg("label", "after"),
        ],
    );
    assert!(matches!(
        result,
        Err(TransformError::Operation {
            source: OperationError::Failed(_),
            ..
        })
    ));
    assert!(!payload.contains_key("label"));
}

#[test]
fn test_failing_required_step_earns_no_coverage() {
    let transformer = ledger();
    let payload = json!({"kind": "ledger", "entries": "oops"})
        .as_object()
        .cloned()
        .unwrap();

    let err = transformer
        .transform(payload, &[BoundOperation::new("append").arg("entry", 1)])
        .unwrap_err();
    assert_eq!(err.code(), "MDT-OP-002");
    assert_eq!(err.transformer(), "Ledger");

    let mut kept = json!({"kind": "ledger", "entries": "oops"})
        .as_object()
        .cloned()
        .unwrap();
    let before = kept.clone();
    assert!(transformer
        .transform_in_place(&mut kept, &[BoundOperation::new("append").arg("entry", 1)])
        .is_err());
    assert_eq!(kept, before);
}

#[test]
fn test_bound_operations_deserialize_from_json() {
    let steps: Vec<BoundOperation> = serde_json::from_value(json!([
        {"operation": "append", "args": {"entry": {"amount": 120}}},
        {"operation": "label", "args": {"label": "statement"}}
    ]))
    .unwrap();

    let output = ledger().transform(ledger_payload(), &steps).unwrap();
    assert_eq!(output["entries"], json!([{"amount": 120}]));
    assert_eq!(output["label"], json!("statement"));
}
