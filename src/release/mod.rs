// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub release history.
//!
//! ```text
//! RepoName ("owner/repo")
//!     |
//!     v
//! ReleaseClient::history() --GET {api}/repos/{repo}/releases--> Vec<Release>
//!     |                                 404 / 403 / 500 / other
//!     v                                          |
//! HistoryPanel (Display)             ReleaseError --> error_panel()
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{NetworkError, ReleaseError};
use crate::net::{Downloader, global_client};

/// Prefix of every release error panel.
pub const ERROR_PREFIX: &str = "加载Release历史：出错：";

/// Validated `owner/repo` name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName(String);

impl RepoName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RepoName {
    type Err = ReleaseError;

    /// Exactly one `/`, with neither side blank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None)
                if !owner.trim().is_empty() && !repo.trim().is_empty() =>
            {
                Ok(Self(s.to_string()))
            }
            _ => Err(ReleaseError::InvalidRepoName),
        }
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A repository the site lists release history for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownRepo {
    pub id: &'static str,
    pub name: &'static str,
    pub repo: &'static str,
}

pub const KNOWN_REPOS: &[KnownRepo] = &[
    KnownRepo {
        id: "Fcl",
        name: "Fold Craft Launcher",
        repo: "FCL-Team/FoldCraftLauncher",
    },
    KnownRepo {
        id: "Zl",
        name: "Zalith Launcher",
        repo: "ZalithLauncher/ZalithLauncher",
    },
    KnownRepo {
        id: "Zl2",
        name: "Zalith Launcher 2",
        repo: "ZalithLauncher/ZalithLauncher2",
    },
    KnownRepo {
        id: "Pojav",
        name: "Pojav Launcher",
        repo: "PojavLauncherTeam/PojavLauncher",
    },
    KnownRepo {
        id: "Hmcl",
        name: "HMCL",
        repo: "HMCL-dev/HMCL",
    },
    KnownRepo {
        id: "HmclPe",
        name: "HMCL-PE",
        repo: "HMCL-dev/HMCL-PE",
    },
    KnownRepo {
        id: "AmethystAndroid",
        name: "Amethyst-Android",
        repo: "AngelAuraMC/Amethyst-Android",
    },
    KnownRepo {
        id: "Mg",
        name: "MobileGlues",
        repo: "MobileGL-Dev/MobileGlues-release",
    },
];

/// Look up a known repository by id (case-insensitive) or display name.
#[must_use]
pub fn known_repo(key: &str) -> Option<&'static KnownRepo> {
    KNOWN_REPOS
        .iter()
        .find(|known| known.id.eq_ignore_ascii_case(key) || known.name == key)
}

/// Resolve user input: a known id/name, else a literal `owner/repo`.
///
/// # Errors
///
/// `ReleaseError::InvalidRepoName` when neither applies.
pub fn resolve_repo(input: &str) -> Result<RepoName, ReleaseError> {
    known_repo(input).map_or_else(|| input.parse(), |known| known.repo.parse())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub digest: Option<String>,
    pub browser_download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Name, or `未命名版本` when blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("未命名版本")
    }

    /// Release notes, or `无发布说明` when blank.
    #[must_use]
    pub fn notes(&self) -> &str {
        self.body
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or("无发布说明")
    }

    /// Publish time in local time.
    #[must_use]
    pub fn published_local(&self) -> String {
        self.published_at.map_or_else(String::new, |at| {
            at.with_timezone(&Local)
                .format("%Y/%m/%d %H:%M:%S")
                .to_string()
        })
    }
}

/// Client for the GitHub release API.
#[derive(Clone)]
pub struct ReleaseClient {
    client: Client,
    api_base: String,
}

impl ReleaseClient {
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: global_client().clone(),
            api_base: api_base.into(),
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self, repo: &RepoName, tail: &str) -> String {
        format!(
            "{}/repos/{repo}/releases{tail}",
            self.api_base.trim_end_matches('/')
        )
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, ReleaseError> {
        debug!(%url, "querying release API");
        Downloader::with_client(self.client.clone())
            .url(url)
            .header("Accept", "application/vnd.github+json")
            .silent()
            .download_json()
            .await
            .map_err(map_status)
    }

    /// Full release history, newest first.
    ///
    /// # Errors
    ///
    /// Status-specific errors for 404/403/500, `Status` for other non-2xx
    /// responses, and `Empty` when the repository has no releases.
    pub async fn history(&self, repo: &RepoName) -> Result<Vec<Release>, ReleaseError> {
        let releases: Vec<Release> = self.get(self.endpoint(repo, "")).await?;
        if releases.is_empty() {
            return Err(ReleaseError::Empty);
        }
        info!(%repo, count = releases.len(), "loaded release history");
        Ok(releases)
    }

    /// The release GitHub marks as latest.
    ///
    /// # Errors
    ///
    /// As [`ReleaseClient::history`], minus `Empty`.
    pub async fn latest(&self, repo: &RepoName) -> Result<Release, ReleaseError> {
        self.get(self.endpoint(repo, "/latest")).await
    }
}

fn map_status(error: NetworkError) -> ReleaseError {
    if let NetworkError::HttpError { status, .. } = &error
        && let Ok(code) = StatusCode::from_u16(*status)
    {
        return ReleaseError::from_status(code);
    }
    ReleaseError::Network(error)
}

/// Text form of an error panel.
#[must_use]
pub fn error_panel(error: &ReleaseError) -> String {
    format!("{ERROR_PREFIX}{error}")
}

/// Text rendering of a release history; the first entry is expanded.
pub struct HistoryPanel<'a>(pub &'a [Release]);

impl fmt::Display for HistoryPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, release) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{}  {}  {}",
                release.display_name(),
                release.tag_name,
                release.published_local()
            )?;
            if index > 0 {
                continue;
            }
            writeln!(f, "  内容")?;
            for line in release.notes().lines() {
                writeln!(f, "    {line}")?;
            }
            writeln!(f, "  资源（{}）", release.assets.len())?;
            if release.assets.is_empty() {
                writeln!(f, "    无资源")?;
            }
            for asset in &release.assets {
                writeln!(f, "    {}", asset.name)?;
                writeln!(f, "      大小  {}字节", asset.size)?;
                writeln!(f, "      校验  {}", asset.digest.as_deref().unwrap_or("-"))?;
                writeln!(f, "      原始下载URL  {}", asset.browser_download_url)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
