// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `browse`: drive the cascade selector from the terminal.
//!
//! ```text
//! load(SOURCE) --auto-select--> board
//!   --pick NAME (level 0) --> cascade
//!   --pick NAME (level 1) --> cascade ...
//! print board
//!   --button N --> click --> [download to --output]
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::Context;
use reqwest::Url;
use tracing::{info, warn};

use crate::cli::browse::BrowseArgs;
use crate::config::Config;
use crate::error::Result;
use crate::net::{Downloader, ProgressDisplay};
use crate::selector::{
    BoardEvent, Click, HttpFetcher, ManifestFetcher, ManifestSource, Selector, SelectorHooks,
    SlotContent, UpstreamResolver,
};

/// Build the selector the way the site wires it: HTTP fetches relative to
/// the site root, latest versions from the configured upstream APIs.
///
/// # Errors
///
/// Returns an error if `site.base_url` is not a valid URL.
pub fn build_selector(config: &Config, hooks: SelectorHooks) -> Result<Selector> {
    let fetcher: Arc<dyn ManifestFetcher> =
        Arc::new(HttpFetcher::new().with_base(&config.site.base_url)?);
    let resolver = UpstreamResolver::new(Arc::clone(&fetcher))
        .github(config.api.github.clone())
        .lemwood(config.api.lemwood.clone())
        .strategy(config.latest.strategy);

    Ok(Selector::builder()
        .fetcher(fetcher)
        .resolver(Arc::new(resolver))
        .hooks(hooks)
        .cooldown(config.cooldown())
        .build())
}

/// Resolve the `SOURCE` argument, defaulting to the root manifest.
///
/// # Errors
///
/// Returns an error if an inline JSON source does not parse.
pub fn resolve_source(args: &BrowseArgs, config: &Config) -> Result<ManifestSource> {
    match args.source.as_deref() {
        Some(input) => {
            ManifestSource::from_user_input(input).context("failed to parse inline manifest")
        }
        None => Ok(ManifestSource::Url(config.site_url(&config.site.root_manifest))),
    }
}

/// Main handler for the browse command.
///
/// # Errors
///
/// Returns an error if:
/// - The selector cannot be built or the source cannot be parsed.
/// - A `--pick` names a level or option that does not exist.
/// - `--button` names a button that does not exist on the deepest level.
/// - The download fails.
pub async fn run_browse_command(args: &BrowseArgs, config: &Config) -> Result<()> {
    let selector = build_selector(config, SelectorHooks::default())?;
    let events = selector.subscribe();
    let source = resolve_source(args, config)?;

    selector
        .load_tagged(source, args.api_ver.map(Into::into))
        .await;
    if args.trace {
        print_trace("load", &selector, &events);
    }

    for (level, name) in args.picks.iter().enumerate() {
        selector
            .select_by_name(level, name)
            .await
            .with_context(|| format!("--pick '{name}' failed"))?;
        if args.trace {
            print_trace(&format!("pick {level}"), &selector, &events);
        }
    }

    print!("{}", selector.render());

    if let Some(index) = args.button {
        let level = deepest_download_level(&selector)
            .context("the board has no download buttons")?;
        match selector.click(level, index)? {
            Click::Accepted(button) => {
                println!("{} -> {}", button.caption, button.url);
                if let Some(dir) = &args.output {
                    download(&button.url, &button.name, dir).await?;
                }
            }
            Click::CoolingDown { remaining } => {
                warn!(remaining, "button is cooling down");
            }
        }
    }

    selector.shutdown();
    Ok(())
}

fn print_trace(step: &str, selector: &Selector, events: &flume::Receiver<BoardEvent>) {
    for event in events.drain() {
        eprintln!("[{step}] {event:?}");
    }
    eprint!("{}", selector.render());
}

fn deepest_download_level(selector: &Selector) -> Option<usize> {
    selector.with_board(|board| {
        board
            .slots()
            .iter()
            .rev()
            .find(|slot| matches!(slot.content, SlotContent::Downloads(_)))
            .map(|slot| slot.level)
    })
}

/// Target file name: the last URL path segment, else the button name.
#[must_use]
pub fn file_name_for(url: &str, fallback: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|segment| !segment.is_empty())
        .unwrap_or_else(|| {
            fallback
                .chars()
                .map(|c| if c.is_alphanumeric() || "._-".contains(c) { c } else { '_' })
                .collect()
        })
}

async fn download(url: &str, name: &str, dir: &Path) -> Result<()> {
    let target: PathBuf = dir.join(file_name_for(url, name));
    let downloader = Downloader::new()
        .url(url)
        .file(&target)
        .progress(ProgressDisplay::Bar);

    let interrupt = downloader.interrupt_handle();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting download...");
            interrupt.store(true, Ordering::Relaxed);
        }
    });

    let result = downloader.download().await;
    watcher.abort();
    result.with_context(|| format!("failed to download {url}"))?;
    info!(path = %target.display(), "download complete");
    println!("saved {}", target.display());
    Ok(())
}
