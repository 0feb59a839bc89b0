use std::io::Write;
use tempfile::NamedTempFile;
use tod_report::{ConfigError, DateStyle, OutputFormat, ReportConfig, TaskFilter};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn full_config_is_loaded() {
    let file = write_config(
        r#"
window_days = 14
date_style = "day_first"
format = "table"
export_command = ["todoist-export", "--csv", "{out}"]
log_level = "debug"
"#,
    );
    let config = ReportConfig::load(file.path()).unwrap();
    assert_eq!(config.window_days, 14);
    assert_eq!(config.date_style, DateStyle::DayFirst);
    assert_eq!(config.format, OutputFormat::Table);
    assert_eq!(
        config.export_command.as_deref(),
        Some(&["todoist-export".to_string(), "--csv".to_string(), "{out}".to_string()][..])
    );
    assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Debug);

    let options = config.report_options(TaskFilter::default());
    assert_eq!(options.window_days, 14);
    assert_eq!(options.date_style, DateStyle::DayFirst);
}

#[test]
fn partial_config_keeps_defaults() {
    let file = write_config("window_days = 3\n");
    let config = ReportConfig::load(file.path()).unwrap();
    assert_eq!(config.window_days, 3);
    assert_eq!(config.date_style, DateStyle::MonthFirst);
    assert_eq!(config.format, OutputFormat::Csv);
    assert!(config.export_command.is_none());
}

#[test]
fn no_path_means_defaults() {
    let config = ReportConfig::load_or_default(None).unwrap();
    assert_eq!(config, ReportConfig::default());
    assert_eq!(config.window_days, 7);
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = ReportConfig::load_or_default(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn unknown_keys_are_rejected() {
    let file = write_config("lookahead = 7\n");
    let err = ReportConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("invalid config"));
}
