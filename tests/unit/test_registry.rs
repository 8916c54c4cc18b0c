use mandate::core::transformer::{
    DefinitionError, FieldMatches, Operation, PredicateValidator, Transformer, TransformerBuilder,
};
use mandate_types::{Payload, Requirement};
use serde_json::json;

fn payload(value: serde_json::Value) -> Payload {
    value.as_object().cloned().unwrap()
}

fn base_statement() -> Transformer {
    let mut builder = Transformer::builder("BaseStatement");
    builder
        .discriminator("correspondence", "base")
        .required("replace_account_number", |p, _| {
            p.insert("accountNumber".to_string(), json!("base"));
            Ok(())
        })
        .operation("stamp", |p, _| {
            p.insert("stamped".to_string(), json!(true));
            Ok(())
        });
    Transformer::define(builder).unwrap()
}

#[test]
fn test_required_set_is_computed_from_markers() {
    let mut builder = TransformerBuilder::new("Mixed");
    builder
        .discriminator("kind", "mixed")
        .required("b", |_, _| Ok(()))
        .operation("c", |_, _| Ok(()))
        .required("a", |_, _| Ok(()));
    let transformer = Transformer::define(builder).unwrap();

    let required: Vec<&str> = transformer
        .required_operations()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(required, vec!["a", "b"]);
    assert_eq!(
        transformer.operation_names().collect::<Vec<_>>(),
        vec!["b", "c", "a"]
    );
    assert_eq!(transformer.definition().registry().len(), 2);
    assert!(!transformer.definition().registry().contains("c"));
}

#[test]
fn test_no_required_operations_gives_empty_registry() {
    let mut builder = TransformerBuilder::new("Loose");
    builder
        .discriminator("kind", "loose")
        .operation("x", |_, _| Ok(()));
    let transformer = Transformer::define(builder).unwrap();
    assert!(transformer.definition().registry().is_empty());
}

#[test]
fn test_inherited_operations_and_markers_carry_over() {
    let base = base_statement();
    let mut builder = TransformerBuilder::new("HSBCTransformer");
    builder
        .inherit(base.definition())
        .discriminator("correspondence", "HSBC Bank USA")
        .operation("replace_account_name", |_, _| Ok(()));
    let hsbc = Transformer::define(builder).unwrap();

    assert!(hsbc.required_operations().contains("replace_account_number"));
    assert_eq!(
        hsbc.operation_names().collect::<Vec<_>>(),
        vec!["replace_account_number", "stamp", "replace_account_name"]
    );
    assert_eq!(hsbc.tag(), "HSBC Bank USA");
}

#[test]
fn test_child_override_marker_wins() {
    let base = base_statement();
    let mut builder = TransformerBuilder::new("Relaxed");
    builder
        .operation("replace_account_number", |_, _| Ok(()))
        .inherit(base.definition());
    let relaxed = Transformer::define(builder).unwrap();

    assert!(relaxed.required_operations().is_empty());
    // the discriminator is inherited when none is declared
    assert_eq!(relaxed.tag(), "base");
}

#[test]
fn test_mark_required_promotes_inherited_operation() {
    let base = base_statement();
    let mut builder = TransformerBuilder::new("Strict");
    builder
        .inherit(base.definition())
        .discriminator("correspondence", "strict")
        .mark_required("stamp");
    let strict = Transformer::define(builder).unwrap();

    assert!(strict.required_operations().contains("stamp"));
    assert!(!base.required_operations().contains("stamp"));
}

#[test]
fn test_definition_errors() {
    let mut builder = TransformerBuilder::new("  ");
    builder.discriminator("kind", "x");
    assert_eq!(builder.build().unwrap_err(), DefinitionError::EmptyName);

    let builder = TransformerBuilder::new("NoValidator");
    assert_eq!(
        builder.build().unwrap_err(),
        DefinitionError::MissingValidator {
            transformer: "NoValidator".to_string()
        }
    );

    let mut builder = TransformerBuilder::new("Dup");
    builder
        .discriminator("kind", "dup")
        .operation("a", |_, _| Ok(()))
        .required("a", |_, _| Ok(()));
    assert_eq!(
        builder.build().unwrap_err(),
        DefinitionError::DuplicateOperation {
            transformer: "Dup".to_string(),
            operation: "a".to_string()
        }
    );

    let mut builder = TransformerBuilder::new("Blank");
    builder
        .discriminator("kind", "blank")
        .add(Operation::new("", Requirement::Optional, |_, _| Ok(())));
    assert_eq!(
        builder.build().unwrap_err(),
        DefinitionError::EmptyOperationName {
            transformer: "Blank".to_string()
        }
    );

    let mut builder = TransformerBuilder::new("Ghost");
    builder.discriminator("kind", "ghost").mark_required("ghost");
    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        DefinitionError::UnknownRequired {
            transformer: "Ghost".to_string(),
            operation: "ghost".to_string()
        }
    );
    assert_eq!(err.code(), "MDT-DEF-001");
}

#[test]
fn test_custom_validators() {
    let mut builder = TransformerBuilder::new("Pattern");
    builder.validator(FieldMatches::new("correspondence", "HSBC", "^HSBC ").unwrap());
    let pattern = Transformer::define(builder).unwrap();
    assert!(pattern
        .validate(&payload(json!({"correspondence": "HSBC Bank USA"})))
        .is_ok());
    assert!(pattern
        .validate(&payload(json!({"correspondence": "Barclays"})))
        .is_err());
    assert_eq!(
        pattern.definition().validator().discriminator_field(),
        Some("correspondence")
    );

    let mut builder = TransformerBuilder::new("Predicate");
    builder.validator(PredicateValidator::new("statement", |p: &Payload| {
        p.contains_key("transactions")
    }));
    let predicate = Transformer::define(builder).unwrap();
    assert!(predicate
        .validate(&payload(json!({"transactions": []})))
        .is_ok());
    assert!(predicate.validate(&payload(json!({}))).is_err());
    assert_eq!(predicate.definition().validator().discriminator_field(), None);
}
