use crate::{LogLevel, LoggingConfig};

use std::str::FromStr;

use log::LevelFilter;

#[test]
fn given_known_level_names_when_parsed_then_case_insensitive() {
    assert_eq!(*LogLevel::from_str("trace").unwrap(), LevelFilter::Trace);
    assert_eq!(*LogLevel::from_str("WARN").unwrap(), LevelFilter::Warn);
    assert_eq!(*LogLevel::from_str("Off").unwrap(), LevelFilter::Off);
}

#[test]
fn given_unknown_level_name_when_parsed_then_config_error() {
    let err = LogLevel::from_str("verbose").unwrap_err();

    assert!(err.to_string().contains("unknown log level 'verbose'"));
}

#[test]
fn given_logging_section_with_valid_level_when_deserialized_then_applied() {
    let config: LoggingConfig = toml::from_str(r#"level = "debug""#).unwrap();

    assert_eq!(*config.level, LevelFilter::Debug);
}

#[test]
fn given_logging_section_with_bad_level_when_deserialized_then_rejected() {
    let result: Result<LoggingConfig, _> = toml::from_str(r#"level = "verbose""#);

    assert!(result.is_err());
}
