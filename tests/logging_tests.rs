use tracing::Level;
use zecharge::config::LoggingConfig;
use zecharge::logging::{LogContext, get_logger_with_context, init_logging, min_level, parse_log_level};

#[test]
fn parses_levels_case_insensitively() {
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("WARNING").unwrap(), Level::WARN);
    assert!(parse_log_level("LOUD").is_err());
}

#[test]
fn min_level_prefers_the_more_verbose() {
    assert_eq!(min_level(Level::INFO, Level::DEBUG), Level::DEBUG);
    assert_eq!(min_level(Level::ERROR, Level::WARN), Level::WARN);
}

#[test]
fn init_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        file: tmp.path().join("zecharge.log").to_string_lossy().to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_ok());
    assert!(init_logging(&config).is_ok());

    let logger = get_logger_with_context(LogContext::new("schedule").with_vin("VIN1"));
    logger.info("logging initialised");
    assert_eq!(logger.component(), "schedule");
}
