//! Unit tests for conversions and classification.

use alp4_api::AlpStatus;
use alp4_errors::{AlpError, AlpResult, ErrorSeverity};

fn parse_config(text: &str) -> AlpResult<serde_json::Value> {
    Ok(serde_json::from_str(text)?)
}

fn read_missing() -> AlpResult<String> {
    Ok(std::fs::read_to_string("/definitely/not/here/alp4.json")?)
}

#[test]
fn test_json_errors_convert() {
    let err = parse_config("{ not json");
    assert!(matches!(err, Err(AlpError::Json(_))));
}

#[test]
fn test_io_errors_convert() {
    let err = read_missing();
    assert!(matches!(err, Err(AlpError::Io(_))));
}

#[test]
fn test_loader_failures_are_critical() {
    let err = AlpError::LibraryLoad {
        path: "alp4395.dll".to_string(),
        reason: "not found".to_string(),
    };
    assert_eq!(err.severity(), ErrorSeverity::Critical);
    assert!(!err.is_rejected_locally());
}

#[test]
fn test_every_known_status_has_a_distinct_name() {
    let mut names: Vec<_> = AlpStatus::KNOWN.iter().map(|s| s.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), AlpStatus::KNOWN.len());
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<AlpError>();
    assert_error::<AlpStatus>();
}
