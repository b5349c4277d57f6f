// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Manifest transport.
//!
//! The selector never talks to HTTP directly; it goes through
//! [`ManifestFetcher`], which tests replace with in-memory fakes.

use futures_util::future::BoxFuture;
use reqwest::{Client, Url};
use serde_json::Value;

use super::item::ManifestSource;
use crate::error::{NetworkError, SelectorError};
use crate::net::{Downloader, global_client};

/// GET-only transport for manifests, descriptions and latest-version probes.
pub trait ManifestFetcher: Send + Sync {
    /// Fetch and decode a JSON document.
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, SelectorError>>;

    /// Fetch a body as text.
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, SelectorError>>;
}

/// Load the raw value behind a source. In-memory sources pass through.
///
/// # Errors
///
/// Propagates transport and decode failures from the fetcher.
pub async fn fetch_items(
    fetcher: &dyn ManifestFetcher,
    source: &ManifestSource,
) -> Result<Value, SelectorError> {
    match source {
        ManifestSource::Url(url) => fetcher.fetch_json(url).await,
        ManifestSource::Inline(value) => Ok(value.clone()),
        ManifestSource::Items(items) => Ok(serde_json::to_value(items)?),
    }
}

/// [`ManifestFetcher`] over HTTP.
///
/// Relative URLs found in manifests (`/data/down/fcl.json`) are joined
/// against the base URL when one is set.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Option<Url>,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
            base: None,
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the base for relative URLs.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` if `base` does not parse.
    pub fn with_base(mut self, base: &str) -> Result<Self, NetworkError> {
        let parsed =
            Url::parse(base).map_err(|e| NetworkError::InvalidUrl(format!("{base}: {e}")))?;
        self.base = Some(parsed);
        Ok(self)
    }

    /// Resolve `url` against the base.
    #[must_use]
    pub fn resolve(&self, url: &str) -> String {
        match (&self.base, Url::parse(url)) {
            (_, Ok(absolute)) => absolute.into(),
            (Some(base), Err(_)) => base
                .join(url)
                .map_or_else(|_| url.to_string(), String::from),
            (None, Err(_)) => url.to_string(),
        }
    }

    fn downloader(&self, url: &str) -> Downloader {
        Downloader::with_client(self.client.clone())
            .url(self.resolve(url))
            .silent()
    }

    async fn get_json(&self, url: &str) -> Result<Value, SelectorError> {
        self.downloader(url)
            .download_json::<Value>()
            .await
            .map_err(|e| match e {
                NetworkError::Parse { message, .. } => SelectorError::Parse(message),
                other => SelectorError::Network(other),
            })
    }

    async fn get_text(&self, url: &str) -> Result<String, SelectorError> {
        Ok(self.downloader(url).download_string().await?)
    }
}

impl ManifestFetcher for HttpFetcher {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, SelectorError>> {
        Box::pin(self.get_json(url))
    }

    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, SelectorError>> {
        Box::pin(self.get_text(url))
    }
}
