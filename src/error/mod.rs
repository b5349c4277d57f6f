// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 FclError (~24 bytes)
//!                        |
//!      +--------+-------+---+-----+--------+------+
//!      v        v       v         v        v      v
//!     Net      Cfg   Selector  Release   Store    Io
//!     Box      Box     Box       Box      Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Network   HttpError, DownloadFailed, Interrupted, Reqwest, Parse
//!   Config    NotFound, ParseError, InvalidValue
//!   Selector  Network, Parse, NotAnArray, Busy, LevelNotFound
//!   Release   InvalidRepoName, NotFound, RateLimited, Empty
//!   Storage   Read, Write, Corrupt
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`FclError`].
pub type FclResult<T> = std::result::Result<T, FclError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum FclError {
    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Cascade selector error.
    #[error("selector error: {0}")]
    Selector(#[from] Box<SelectorError>),

    /// Release history error.
    #[error("release error: {0}")]
    Release(#[from] Box<ReleaseError>),

    /// Local storage error.
    #[error("storage error: {0}")]
    Storage(#[from] Box<StorageError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for FclError {
                fn from(err: $error) -> Self {
                    FclError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    NetworkError => Network,
    ConfigError => Config,
    SelectorError => Selector,
    ReleaseError => Release,
    StorageError => Storage,
    std::io::Error => Io,
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// Download was interrupted by user or signal.
    #[error("download interrupted")]
    Interrupted,

    /// Non-2xx HTTP response.
    #[error("HTTP {status}: {status_text}")]
    HttpError {
        status: u16,
        status_text: String,
        url: String,
    },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Response body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Parse { url: String, message: String },

    /// I/O error during download.
    #[error("io error during download: {0}")]
    Io(#[from] std::io::Error),
}

impl NetworkError {
    /// Builds an [`NetworkError::HttpError`] from a response status.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::HttpError {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url: url.into(),
        }
    }

    /// Returns the HTTP status for [`NetworkError::HttpError`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A file passed with `--config` does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Selector Errors ---

/// Cascade selector errors.
///
/// Load failures (`Network`, `Parse`, `NotAnArray`) are rendered inline at
/// the failing level. The remaining variants reject a user action outright.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// Manifest fetch failed.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Manifest was not valid JSON or did not match the item shape.
    #[error("数据解析失败：{0}")]
    Parse(String),

    /// Manifest decoded to something other than a sequence.
    #[error("返回数据不是数组")]
    NotAnArray,

    /// No slot exists at the requested level.
    #[error("level {level} is not rendered")]
    LevelNotFound { level: usize },

    /// The slot at the requested level is not a selection control.
    #[error("level {level} has no selection control")]
    NotASelection { level: usize },

    /// The control is disabled while a previous change is processed.
    #[error("level {level} is busy")]
    Busy { level: usize },

    /// Selected option index is out of range.
    #[error("level {level} has no option {index}")]
    OptionOutOfRange { level: usize, index: usize },

    /// No option with the requested name.
    #[error("level {level} has no option named '{name}'")]
    OptionNotFound { level: usize, name: String },

    /// The slot at the requested level has no such download button.
    #[error("level {level} has no download button {index}")]
    ButtonNotFound { level: usize, index: usize },
}

impl From<serde_json::Error> for SelectorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

// --- Release Errors ---

/// GitHub release history errors.
///
/// Messages match what the site shows in its error panel.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Repository name is not `owner/repo`.
    #[error("仓库全名非法")]
    InvalidRepoName,

    /// 404 from the release API.
    #[error("404：找不到仓库")]
    NotFound,

    /// 403 from the release API.
    #[error("403：API请求超限")]
    RateLimited,

    /// 500 from the release API.
    #[error("500：GH内部错误")]
    ServerError,

    /// Any other non-2xx status.
    #[error("{status}：{status_text}")]
    Status { status: u16, status_text: String },

    /// Repository has no releases.
    #[error("没有Release数据")]
    Empty,

    /// Transport or decoding failure.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl ReleaseError {
    /// Maps a non-success release API status to its error.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            404 => Self::NotFound,
            403 => Self::RateLimited,
            500 => Self::ServerError,
            other => Self::Status {
                status: other,
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            },
        }
    }
}

// --- Storage Errors ---

/// Local key/value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read the storage file.
    #[error("failed to read storage '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the storage file.
    #[error("failed to write storage '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Storage file exists but is not a string map.
    #[error("storage '{path}' is corrupt: {message}")]
    Corrupt { path: String, message: String },
}
