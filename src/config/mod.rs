// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. fclm.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. FCLM_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! FCLM_SELECTOR__COOLDOWN_SECS=0  → selector.cooldown_secs = 0
//! FCLM_LATEST__STRATEGY=github    → latest.strategy = "github"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{ApiConfig, GlobalConfig, LatestConfig, SelectorConfig, SiteConfig, StorageConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Static site locations.
    pub site: SiteConfig,
    /// Cascade selector behavior.
    pub selector: SelectorConfig,
    /// Upstream API endpoints.
    pub api: ApiConfig,
    /// Latest-version resolution.
    pub latest: LatestConfig,
    /// Local key/value storage.
    pub storage: StorageConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fcl_mirror::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("fclm.toml")
    ///     .with_env_prefix("FCLM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when a URL does not parse.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (section, key, value) in [
            ("site", "base_url", &self.site.base_url),
            ("api", "github", &self.api.github),
            ("api", "lemwood", &self.api.lemwood),
            ("api", "line2_traffic", &self.api.line2_traffic),
        ] {
            reqwest::Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                message: format!("'{value}' is not a valid URL: {e}"),
            })?;
        }
        Ok(())
    }

    /// Resolve a site path (`/data/down/root.json`) against `site.base_url`.
    ///
    /// Absolute URLs are returned unchanged.
    #[must_use]
    pub fn site_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        reqwest::Url::parse(&self.site.base_url)
            .and_then(|base| base.join(path))
            .map_or_else(
                |_| {
                    format!(
                        "{}/{}",
                        self.site.base_url.trim_end_matches('/'),
                        path.trim_start_matches('/')
                    )
                },
                String::from,
            )
    }

    /// Download button cooldown.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_secs(self.selector.cooldown_secs)
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file", self.global.log_file.display().to_string());
        options.insert("global.log_json", self.global.log_json.to_string());
        options.insert("site.base_url", self.site.base_url.clone());
        options.insert("site.root_manifest", self.site.root_manifest.clone());
        options.insert("site.contributors", self.site.contributors.clone());
        options.insert("site.announcement", self.site.announcement.clone());
        options.insert("site.version_info", self.site.version_info.clone());
        options.insert(
            "selector.cooldown_secs",
            self.selector.cooldown_secs.to_string(),
        );
        options.insert("api.github", self.api.github.clone());
        options.insert("api.lemwood", self.api.lemwood.clone());
        options.insert("api.line2_traffic", self.api.line2_traffic.clone());
        options.insert("latest.strategy", self.latest.strategy.to_string());
        options.insert("storage.path", self.storage.path.display().to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
