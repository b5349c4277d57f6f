// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, SiteConfig, SelectorConfig, ApiConfig,
//!         LatestConfig, StorageConfig
//! LatestStrategy: Payload (default) | Github
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables the file layer.
    pub log_file: PathBuf,
    /// Write the log file as JSON lines.
    pub log_json: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
            log_json: false,
        }
    }
}

/// Where the static site lives.
///
/// Paths below are resolved against `base_url` when they are not absolute
/// URLs themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub base_url: String,
    pub root_manifest: String,
    pub contributors: String,
    pub announcement: String,
    pub version_info: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fcl.xiaoluofoxington.top".to_string(),
            root_manifest: "/data/down/root.json".to_string(),
            contributors: "/data/content/contributors.json".to_string(),
            announcement: "/data/content/announcement.html".to_string(),
            version_info: "/versionInfo.json".to_string(),
        }
    }
}

/// Cascade selector behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    /// Download button cooldown in seconds; 0 disables it.
    pub cooldown_secs: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { cooldown_secs: 10 }
    }
}

/// Upstream API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub github: String,
    pub lemwood: String,
    /// File tree published by download line 2, carrying its used traffic.
    pub line2_traffic: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            github: "https://api.github.com".to_string(),
            lemwood: "https://mirror.lemwood.icu".to_string(),
            line2_traffic: "https://frostlynx.work/external/fcl/file_tree.json".to_string(),
        }
    }
}

/// How the Way2old adapter finds the current version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatestStrategy {
    /// Read the `latest` field of the fetched payload.
    #[default]
    Payload,
    /// Ask the GitHub release API, falling back to the payload.
    Github,
}

impl std::fmt::Display for LatestStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payload => write!(f, "payload"),
            Self::Github => write!(f, "github"),
        }
    }
}

impl std::str::FromStr for LatestStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "payload" => Ok(Self::Payload),
            "github" => Ok(Self::Github),
            _ => Err(ConfigError::InvalidValue {
                section: "latest".to_string(),
                key: "strategy".to_string(),
                message: format!("expected 'payload' or 'github', got '{s}'"),
            }),
        }
    }
}

/// Latest-version resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatestConfig {
    pub strategy: LatestStrategy,
}

/// Local key/value storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fclm-storage.json"),
        }
    }
}
