// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Static page fragments.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A fragment served under `/page/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// `tab1` to `tab5`.
    Tab(u8),
    IntroFcl,
}

impl Page {
    pub const TABS: u8 = 5;

    /// Site path of the fragment.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Tab(n) => format!("/page/tab{n}.html"),
            Self::IntroFcl => "/page/introFcl.html".to_string(),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tab(n) => write!(f, "tab{n}"),
            Self::IntroFcl => f.write_str("introFcl"),
        }
    }
}

impl FromStr for Page {
    type Err = ConfigError;

    /// Accepts `3`, `tab3` or `introFcl` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "introfcl" {
            return Ok(Self::IntroFcl);
        }
        let digits = lower.strip_prefix("tab").unwrap_or(&lower);
        match digits.parse::<u8>() {
            Ok(n) if (1..=Self::TABS).contains(&n) => Ok(Self::Tab(n)),
            _ => Err(ConfigError::InvalidValue {
                section: "page".to_string(),
                key: "tab".to_string(),
                message: format!("expected tab1..tab{} or introFcl, got '{s}'", Self::TABS),
            }),
        }
    }
}

/// Outcome of loading a fragment. Failures render inline instead of
/// aborting the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Html(String),
    Failed(String),
}

impl Fragment {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html(html) => f.write_str(html),
            Self::Failed(message) => write!(f, "获取 HTML 内容：{message}"),
        }
    }
}
