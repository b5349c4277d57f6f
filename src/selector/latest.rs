// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Latest-version lookup for upstream manifests.
//!
//! ```text
//! Way2old        payload `latest` (or GitHub releases/latest, then payload)
//! Lemwood        GET {lemwood}/api/latest/{code}, code from root selection
//! LemwoodLatest  none
//! ```
//!
//! Lookups are keyed by `(ApiVer, root selection)` and cached for one
//! cascade pass, so a pass that adapts several levels asks upstream once.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use super::fetcher::ManifestFetcher;
use super::item::ApiVer;
use crate::config::types::LatestStrategy;

/// GitHub repositories for root selections whose name is not `owner/repo`.
const GITHUB_REPOS: &[(&str, &str)] = &[
    ("Fold Craft Launcher", "FCL-Team/FoldCraftLauncher"),
    ("Zalith Launcher 2", "ZalithLauncher/ZalithLauncher2"),
];

/// Lemwood product codes by root selection.
const LEMWOOD_CODES: &[(&str, &str)] = &[
    ("Fold Craft Launcher", "fcl"),
    ("Zalith Launcher", "zl"),
    ("Zalith Launcher 2", "zl2"),
    ("HMCL", "hmcl"),
    ("Vulkan 驱动", "FCL_Turnip"),
    ("渲染器", "MG"),
];

/// GitHub repository for a root selection; unmapped names are used as-is.
#[must_use]
pub fn github_repo(selection: &str) -> &str {
    GITHUB_REPOS
        .iter()
        .find(|(name, _)| *name == selection)
        .map_or(selection, |(_, repo)| repo)
}

/// Lemwood product code for a root selection.
#[must_use]
pub fn lemwood_code(selection: &str) -> Option<&'static str> {
    LEMWOOD_CODES
        .iter()
        .find(|(name, _)| *name == selection)
        .map(|(_, code)| *code)
}

/// Network side of latest-version resolution.
///
/// Returning `None` makes the adapter fall back to whatever the payload
/// itself says (Way2old) or to "no default" (Lemwood).
pub trait LatestResolver: Send + Sync {
    fn lookup<'a>(
        &'a self,
        api_ver: ApiVer,
        selection: Option<&'a str>,
    ) -> BoxFuture<'a, Option<String>>;
}

/// Per-pass memo of resolver answers.
#[derive(Debug, Default)]
pub struct LatestCache {
    entries: HashMap<(ApiVer, Option<String>), Option<String>>,
}

impl LatestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask `resolver` unless this pass already has an answer.
    pub async fn get_or_lookup(
        &mut self,
        resolver: &dyn LatestResolver,
        api_ver: ApiVer,
        selection: Option<&str>,
    ) -> Option<String> {
        let key = (api_ver, selection.map(str::to_string));
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let value = resolver.lookup(api_ver, selection).await;
        self.entries.insert(key, value.clone());
        value
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolver that never answers; every lookup falls back to the payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadOnly;

impl LatestResolver for PayloadOnly {
    fn lookup<'a>(&'a self, _: ApiVer, _: Option<&'a str>) -> BoxFuture<'a, Option<String>> {
        Box::pin(async { None })
    }
}

/// Resolver backed by the GitHub and Lemwood APIs.
pub struct UpstreamResolver {
    fetcher: Arc<dyn ManifestFetcher>,
    github: String,
    lemwood: String,
    strategy: LatestStrategy,
}

impl UpstreamResolver {
    #[must_use]
    pub fn new(fetcher: Arc<dyn ManifestFetcher>) -> Self {
        Self {
            fetcher,
            github: "https://api.github.com".to_string(),
            lemwood: "https://mirror.lemwood.icu".to_string(),
            strategy: LatestStrategy::Payload,
        }
    }

    #[must_use]
    pub fn github(mut self, base: impl Into<String>) -> Self {
        self.github = base.into();
        self
    }

    #[must_use]
    pub fn lemwood(mut self, base: impl Into<String>) -> Self {
        self.lemwood = base.into();
        self
    }

    #[must_use]
    pub const fn strategy(mut self, strategy: LatestStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    async fn github_latest(&self, selection: &str) -> Option<String> {
        let url = format!(
            "{}/repos/{}/releases/latest",
            self.github.trim_end_matches('/'),
            github_repo(selection)
        );
        match self.fetcher.fetch_json(&url).await {
            Ok(release) => release
                .get("tag_name")
                .and_then(Value::as_str)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string),
            Err(e) => {
                warn!(%url, error = %e, "GitHub latest lookup failed, using payload");
                None
            }
        }
    }

    async fn lemwood_latest(&self, selection: &str) -> Option<String> {
        let Some(code) = lemwood_code(selection) else {
            debug!(selection, "no Lemwood code for selection");
            return None;
        };
        let url = format!("{}/api/latest/{code}", self.lemwood.trim_end_matches('/'));
        match self.fetcher.fetch_text(&url).await {
            Ok(body) => parse_latest_body(&body),
            Err(e) => {
                warn!(%url, error = %e, "Lemwood latest lookup failed");
                None
            }
        }
    }

    async fn resolve(&self, api_ver: ApiVer, selection: Option<&str>) -> Option<String> {
        let selection = selection?;
        match api_ver {
            ApiVer::Way2old if self.strategy == LatestStrategy::Github => {
                self.github_latest(selection).await
            }
            ApiVer::Lemwood => self.lemwood_latest(selection).await,
            ApiVer::Way2old | ApiVer::LemwoodLatest => None,
        }
    }
}

impl LatestResolver for UpstreamResolver {
    fn lookup<'a>(
        &'a self,
        api_ver: ApiVer,
        selection: Option<&'a str>,
    ) -> BoxFuture<'a, Option<String>> {
        Box::pin(self.resolve(api_ver, selection))
    }
}

/// The latest endpoint answers with a bare version string; older
/// deployments answered `{"name": ...}`.
#[must_use]
pub fn parse_latest_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.starts_with('{')
        && let Ok(value) = serde_json::from_str::<Value>(trimmed)
    {
        return value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
    }
    let unquoted = trimmed.trim_matches('"');
    (!unquoted.is_empty()).then(|| unquoted.to_string())
}
