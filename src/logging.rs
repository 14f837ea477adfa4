// src/logging.rs
//! log4rs configuration for the console and the per-run log file.

use crate::constants::LOG_PATTERN;
use crate::error::AppError;
use chrono::NaiveDateTime;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::path::{Path, PathBuf};

/// Path of the log file for a run started at `started`:
/// `<log_dir>/triage-run-YYYYMMDD-HHMMSS.log`.
pub fn log_file_path(log_dir: &Path, started: &NaiveDateTime) -> PathBuf {
    log_dir.join(format!("triage-run-{}.log", started.format("%Y%m%d-%H%M%S")))
}

/// Console output at info (debug with `verbose`), and everything from debug
/// up appended to `log_file`.
pub fn build_config(log_file: &Path, verbose: bool) -> Result<Config, AppError> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .append(true)
        .build(log_file)?;

    Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("stdout", Box::new(stdout_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(LevelFilter::Debug),
        )
        .map_err(|e| AppError::Logging(e.to_string()))
}
