// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(2), Some(LogLevel::WARN));
    assert_eq!(LogLevel::from_u8(9), None);
}

#[test]
fn test_log_level_to_tracing() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(LogLevel::INFO.to_tracing_level(), Some(Level::INFO));
    assert_eq!(LogLevel::DUMP.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn test_filter_caps_dependencies_below_dump() {
    assert_eq!(
        LogLevel::DEBUG.to_filter_string(),
        "warn,fcl_mirror=debug,fclm=debug"
    );
    assert_eq!(LogLevel::DUMP.to_filter_string(), "trace");
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(ok, LogLevel::DEBUG);
    assert!(serde_json::from_str::<LogLevel>("12").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json());
}
