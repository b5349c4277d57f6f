// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Everything on the site besides the cascade selector.
//!
//! ```text
//! SiteClient (base_url)
//!   |-- fragment(Page)        /page/tab{n}.html, /page/introFcl.html
//!   |-- version_info()        /versionInfo.json
//!   |-- contributors(path)    -> contributors::{links, download_lines}
//!   |-- traffic(url)          line 2 file_tree.json -> "<n>GiB"
//!   `-- fetch_text(path)      -> announcement::Announcement
//!
//! sysinfo   UA -> notices          (no I/O)
//! uptime    run time since launch  (no I/O)
//! ```

pub mod announcement;
pub mod contributors;
pub mod sysinfo;
pub mod tabs;
pub mod traffic;
pub mod uptime;

#[cfg(test)]
mod tests;

pub use announcement::Announcement;
pub use contributors::{Contributor, DownloadLine, download_lines};
pub use tabs::{Fragment, Page};
pub use traffic::Traffic;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::NetworkError;
use crate::net::{Downloader, global_client};

/// Build metadata published with the site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    /// Commit the site was built from.
    #[serde(default)]
    pub git: String,
}

/// Fetches static content relative to the site root.
#[derive(Clone)]
pub struct SiteClient {
    client: Client,
    base: Url,
}

impl SiteClient {
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        let base =
            Url::parse(base_url).map_err(|e| NetworkError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            client: global_client().clone(),
            base,
        })
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a site path; absolute URLs pass through.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` if the join fails.
    pub fn url(&self, path: &str) -> Result<String, NetworkError> {
        self.base
            .join(path)
            .map(String::from)
            .map_err(|e| NetworkError::InvalidUrl(format!("{path}: {e}")))
    }

    fn downloader(&self, path: &str) -> Result<Downloader, NetworkError> {
        Ok(Downloader::with_client(self.client.clone())
            .url(self.url(path)?)
            .silent())
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` on transport failure or a non-2xx status.
    pub async fn fetch_text(&self, path: &str) -> Result<String, NetworkError> {
        self.downloader(path)?.download_string().await
    }

    /// # Errors
    ///
    /// As [`SiteClient::fetch_text`], plus `NetworkError::Parse`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, NetworkError> {
        self.downloader(path)?.download_json().await
    }

    /// Load a page fragment. Failures come back as [`Fragment::Failed`].
    pub async fn fragment(&self, page: Page) -> Fragment {
        match self.fetch_text(&page.path()).await {
            Ok(html) => Fragment::Html(html),
            Err(e) => {
                warn!(%page, error = %e, "fragment load failed");
                let message = match e.status() {
                    Some(status) => format!("HTTP错误: {status}"),
                    None => e.to_string(),
                };
                Fragment::Failed(message)
            }
        }
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the document cannot be fetched or decoded.
    pub async fn version_info(&self, path: &str) -> Result<VersionInfo, NetworkError> {
        self.fetch_json(path).await
    }

    /// Line 2 traffic. Failures come back as [`Traffic::Failed`].
    pub async fn traffic(&self, url: &str) -> Traffic {
        match self.fetch_json::<traffic::FileTree>(url).await {
            Ok(tree) => Traffic::from_tree(&tree),
            Err(e) => {
                warn!(url, error = %e, "traffic info load failed");
                let message = match e.status() {
                    Some(status) => format!("HTTP出错：{status}"),
                    None => e.to_string(),
                };
                Traffic::Failed(message)
            }
        }
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the list cannot be fetched or decoded.
    pub async fn contributors(&self, path: &str) -> Result<Vec<Contributor>, NetworkError> {
        self.fetch_json(path).await
    }
}
