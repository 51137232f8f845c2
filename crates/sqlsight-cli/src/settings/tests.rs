use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_empty_object_gives_defaults() {
    assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
}

#[test]
fn test_partial_advisor_section_keeps_other_defaults() {
    let settings = Settings::from_json(
        r#"{
            "default_dialect": "mysql",
            "advisor": { "join_explosion_threshold": 5 }
        }"#,
    )
    .unwrap();

    assert_eq!(settings.default_dialect, "mysql");
    assert_eq!(settings.advisor.join_explosion_threshold, 5);
    assert_eq!(settings.advisor.max_complexity, 10);
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn test_unknown_default_dialect_is_rejected() {
    let err = Settings::from_json(r#"{ "default_dialect": "cobol" }"#).unwrap_err();
    assert_eq!(err.to_string(), "Invalid default_dialect");
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(Settings::from_json("{ not json").is_err());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let path = std::env::temp_dir().join("sqlsight-settings-does-not-exist.json");
    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn test_json_logs_can_be_forced() {
    let settings = Settings::default();
    assert!(!settings.logging_config(false).json);
    assert!(settings.logging_config(true).json);
    assert_eq!(settings.logging_config(false).default_filter, "warn");
}
