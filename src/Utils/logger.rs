//! Console and file logging, initialized once per process.
use crate::Utils::task_parser::TaskError;
use chrono::Local;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

/// `debug`, `info`, `warn`, `error`; `off` and `none` disable logging
pub fn parse_level(level: &str) -> Result<LevelFilter, TaskError> {
    match level.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(TaskError::InvalidValue {
            key: "loglevel".to_string(),
            value: other.to_string(),
        }),
    }
}

/// log_2026-10-17_14-03-55.txt
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Terminal logger plus, when `log_file` is given, a file logger with the same level.
/// A logger that is already installed is kept.
pub fn init_logger(level: LevelFilter, log_file: Option<&str>) -> Result<(), TaskError> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(name) = log_file {
        let file = File::create(name)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" Warn ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("none").unwrap(), LevelFilter::Off);
        assert!(matches!(
            parse_level("loud"),
            Err(TaskError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_log_name() {
        let name = timestamped_log_name();
        assert!(name.starts_with("log_") && name.ends_with(".txt"));
    }

    #[test]
    fn test_repeated_init_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("computor.log");
        let path = path.to_str().unwrap();
        init_logger(LevelFilter::Info, Some(path)).unwrap();
        init_logger(LevelFilter::Debug, None).unwrap();
        init_logger(LevelFilter::Off, None).unwrap();
        assert!(dir.path().join("computor.log").exists());
    }
}
