// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Traffic used on download line 2, read from the file tree its host
//! publishes.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// The part of `file_tree.json` we read.
#[derive(Debug, Clone, Deserialize)]
pub struct FileTree {
    #[serde(default)]
    pub traffic: Value,
}

/// Line 2 traffic readout. Failures show in place of the figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Traffic {
    /// Used traffic in GiB, as published.
    Used(String),
    Failed(String),
}

impl Traffic {
    #[must_use]
    pub fn from_tree(tree: &FileTree) -> Self {
        match &tree.traffic {
            Value::Null => Self::Failed("返回数据缺少 traffic 字段".to_string()),
            Value::String(used) => Self::Used(used.trim().to_string()),
            other => Self::Used(other.to_string()),
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for Traffic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Used(used) => write!(f, "{used}GiB"),
            Self::Failed(message) => f.write_str(message),
        }
    }
}
