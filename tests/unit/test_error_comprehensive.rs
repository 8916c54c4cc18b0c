use mandate::core::error::AppError;
use mandate::core::router::RouteError;
use mandate::core::transformer::{DefinitionError, OperationError, TransformError};
use mandate::core::types::{ErrorCategory, ErrorSeverity};

#[test]
fn test_error_creation_all_categories() {
    let categories = vec![
        ErrorCategory::ValidationError,
        ErrorCategory::CoverageError,
        ErrorCategory::OperationError,
        ErrorCategory::DefinitionError,
        ErrorCategory::RoutingError,
        ErrorCategory::ConfigError,
        ErrorCategory::SerializationError,
        ErrorCategory::IoError,
        ErrorCategory::InternalError,
        ErrorCategory::Unknown,
    ];

    for category in categories {
        let error = AppError::new(category, "test message");
        assert_eq!(error.category, category);
        assert_eq!(error.message, "test message");
        assert_eq!(error.context.len(), 0);
        assert_eq!(error.recovery_suggestions.len(), 0);
        assert!(error.occurred_at <= chrono::Utc::now());
        assert!(error.source.is_none());
        assert!(error.code.starts_with("ERR-"));
    }
}

#[test]
fn test_error_severity_mapping() {
    let test_cases = vec![
        (ErrorCategory::ValidationError, ErrorSeverity::Error),
        (ErrorCategory::CoverageError, ErrorSeverity::Error),
        (ErrorCategory::OperationError, ErrorSeverity::Error),
        (ErrorCategory::DefinitionError, ErrorSeverity::Fatal),
        (ErrorCategory::RoutingError, ErrorSeverity::Error),
        (ErrorCategory::ConfigError, ErrorSeverity::Fatal),
        (ErrorCategory::SerializationError, ErrorSeverity::Error),
        (ErrorCategory::IoError, ErrorSeverity::Error),
        (ErrorCategory::InternalError, ErrorSeverity::Error),
        (ErrorCategory::Unknown, ErrorSeverity::Info),
    ];

    for (category, expected_severity) in test_cases {
        let error = AppError::new(category, "test");
        assert_eq!(error.severity(), expected_severity);
    }
}

#[test]
fn test_error_builders_chain() {
    let error = AppError::new(ErrorCategory::ConfigError, "bad config")
        .with_code("MDT-CONFIG-002")
        .with_context("mandate.toml")
        .with_suggestion("Fix the file");

    assert_eq!(error.code, "MDT-CONFIG-002");
    assert_eq!(error.context.get("context").map(String::as_str), Some("mandate.toml"));
    assert_eq!(error.recovery_suggestions, vec!["Fix the file".to_string()]);
}

#[test]
fn test_error_display_sorts_context() {
    let mut error = AppError::new(ErrorCategory::RoutingError, "no route").with_code("MDT-ROUTE-002");
    error.add_context("tag", "Other Bank");
    error.add_context("field", "correspondence");

    insta::assert_snapshot!(error.to_string(), @r###"[MDT-ROUTE-002] RoutingError: no route (Context: [("field", "correspondence"), ("tag", "Other Bank")])"###);
}

#[test]
fn test_transform_errors_map_to_categories() {
    let mismatch: AppError = TransformError::TypeMismatch {
        transformer: "HSBCTransformer".to_string(),
        expected_tag: "HSBC Bank USA".to_string(),
    }
    .into();
    assert_eq!(mismatch.category, ErrorCategory::ValidationError);
    assert_eq!(mismatch.code, "MDT-TYPE-001");
    assert_eq!(
        mismatch.context.get("expected_tag").map(String::as_str),
        Some("HSBC Bank USA")
    );

    let missing: AppError = TransformError::MissingRequired {
        transformer: "HSBCTransformer".to_string(),
        missing: vec!["a".to_string(), "b".to_string()],
    }
    .into();
    assert_eq!(missing.category, ErrorCategory::CoverageError);
    assert_eq!(missing.context.get("missing").map(String::as_str), Some("a,b"));
    assert_eq!(
        missing.context.get("transformer").map(String::as_str),
        Some("HSBCTransformer")
    );

    let failed: AppError = TransformError::Operation {
        transformer: "HSBCTransformer".to_string(),
        operation: "replace_account_number".to_string(),
        source: OperationError::MissingField("accountNumber".to_string()),
    }
    .into();
    assert_eq!(failed.category, ErrorCategory::OperationError);
    assert_eq!(failed.code, "MDT-OP-002");
    assert!(failed.source.is_some());
}

#[test]
fn test_definition_and_route_errors_convert() {
    let definition: AppError = DefinitionError::EmptyName.into();
    assert_eq!(definition.category, ErrorCategory::DefinitionError);
    assert_eq!(definition.severity(), ErrorSeverity::Fatal);
    assert_eq!(definition.code, "MDT-DEF-001");

    let route: AppError = RouteError::UnknownTag {
        field: "correspondence".to_string(),
        tag: "Other Bank".to_string(),
    }
    .into();
    assert_eq!(route.category, ErrorCategory::RoutingError);
    assert_eq!(route.code, "MDT-ROUTE-002");
}

#[test]
fn test_std_errors_convert() {
    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert_eq!(io.category, ErrorCategory::IoError);
    assert_eq!(io.code, "IO_ERROR");

    let json: AppError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
    assert_eq!(json.category, ErrorCategory::SerializationError);
    assert_eq!(json.code, "SERDE_JSON_ERROR");

    let any: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(any.category, ErrorCategory::InternalError);
    assert_eq!(any.message, "boom");
}
