// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Handlers for the site content commands.

use anyhow::Context;
use tracing::{debug, warn};

use crate::cli::VersionArgs;
use crate::cli::site::{AnnouncementArgs, ContributorsArgs, PageArgs, StoreArgs, SysinfoArgs};
use crate::config::Config;
use crate::error::Result;
use crate::site::sysinfo::{Environment, notices, overall};
use crate::site::{Announcement, SiteClient, download_lines, uptime};
use crate::storage::{KNOWN_KEYS, LocalStore, SYS_INFO_PANEL_CLASS};

fn site_client(config: &Config) -> Result<SiteClient> {
    Ok(SiteClient::new(&config.site.base_url)?)
}

fn open_store(config: &Config) -> Result<LocalStore> {
    Ok(LocalStore::open(config.storage.path.clone())?)
}

/// Print the crate version, and the site build with `--remote`.
///
/// # Errors
///
/// Returns an error if `--remote` is set and the version document cannot
/// be fetched.
pub async fn run_version_command(args: &VersionArgs, config: &Config) -> Result<()> {
    println!("{}", env!("CARGO_PKG_VERSION"));
    if args.remote {
        let info = site_client(config)?
            .version_info(&config.site.version_info)
            .await
            .context("failed to fetch site version")?;
        println!("site {}", info.git);
    }
    Ok(())
}

/// Contributor panels followed by the download-line table.
///
/// # Errors
///
/// Returns an error if the contributor list cannot be fetched or decoded.
pub async fn run_contributors_command(args: &ContributorsArgs, config: &Config) -> Result<()> {
    let path = args.source.as_deref().unwrap_or(&config.site.contributors);
    let contributors = site_client(config)?
        .contributors(path)
        .await
        .with_context(|| format!("failed to load contributors from {path}"))?;

    if !args.lines {
        for contributor in &contributors {
            println!("{contributor}");
        }
    }
    for line in download_lines(&contributors) {
        println!("{line}");
    }
    Ok(())
}

/// Show the announcement, flagged when it changed since last read.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or saved, or the
/// announcement cannot be fetched.
pub async fn run_announcement_command(args: &AnnouncementArgs, config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let content = site_client(config)?
        .fetch_text(&config.site.announcement)
        .await
        .context("failed to load announcement")?;

    let mut announcement = Announcement::evaluate(content, &store);
    println!("{announcement}");

    if args.mark_read {
        announcement.mark_read(&mut store);
        store.save()?;
        debug!(checksum = announcement.checksum, "announcement marked read");
    }
    Ok(())
}

/// Print compatibility notices and remember the overall verdict.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or saved.
pub fn run_sysinfo_command(args: &SysinfoArgs, config: &Config) -> Result<()> {
    let env = Environment::parse(&args.user_agent, args.platform.as_deref());
    let list = notices(&env);
    for notice in &list {
        println!("{notice}");
    }

    let verdict = overall(&list);
    let mut store = open_store(config)?;
    store.set(SYS_INFO_PANEL_CLASS, verdict.as_str());
    store.save()?;
    Ok(())
}

/// Site run time, the local visit counter and line 2 traffic.
///
/// A failed traffic lookup prints inline.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or saved, or if
/// `site.base_url` is not a valid URL.
pub async fn run_uptime_command(config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let visits = store.bump_visit_count();
    store.save()?;

    println!("本站已运行：{}", uptime::uptime());
    println!("本地访问次数：{visits}");
    let traffic = site_client(config)?.traffic(&config.api.line2_traffic).await;
    println!("线路2已用流量：{traffic}");
    Ok(())
}

/// Print a page fragment; load failures print inline.
///
/// # Errors
///
/// Returns an error if `site.base_url` is not a valid URL.
pub async fn run_page_command(args: &PageArgs, config: &Config) -> Result<()> {
    let fragment = site_client(config)?.fragment(args.page).await;
    println!("{fragment}");
    Ok(())
}

/// List, read, write or remove local storage entries.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or saved, or a read key
/// is missing.
pub fn run_store_command(args: &StoreArgs, config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    let Some(key) = args.key.as_deref() else {
        for (key, value) in store.iter() {
            println!("{key} = {value}");
        }
        return Ok(());
    };

    if !KNOWN_KEYS.contains(&key) {
        warn!(key, "not a key the site uses");
    }

    if args.remove {
        store.remove(key);
        store.save()?;
    } else if let Some(value) = &args.value {
        store.set(key, value.clone());
        store.save()?;
    } else {
        let value = store
            .get(key)
            .with_context(|| format!("'{key}' is not set"))?;
        println!("{value}");
    }
    Ok(())
}
