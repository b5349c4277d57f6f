// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `releases`: GitHub release history.

use tracing::warn;

use crate::cli::release::ReleasesArgs;
use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::release::{HistoryPanel, KNOWN_REPOS, Release, ReleaseClient, error_panel, resolve_repo};

/// Main handler for the releases command.
///
/// Lookup failures are printed as the inline error panel before the
/// command fails.
///
/// # Errors
///
/// Returns an error if the repository name is invalid or the release API
/// request fails.
pub async fn run_releases_command(args: &ReleasesArgs, config: &Config) -> Result<()> {
    if args.known {
        print_known_repos();
        return Ok(());
    }

    let client = ReleaseClient::new(config.api.github.clone());
    match fetch(&client, args).await {
        Ok(releases) => print!("{}", HistoryPanel(&releases)),
        Err(e) => {
            warn!(repo = %args.repo, error = %e, "release lookup failed");
            println!("{}", error_panel(&e));
            anyhow::bail!("release lookup for '{}' failed", args.repo);
        }
    }
    Ok(())
}

async fn fetch(
    client: &ReleaseClient,
    args: &ReleasesArgs,
) -> std::result::Result<Vec<Release>, ReleaseError> {
    let repo = resolve_repo(&args.repo)?;
    if args.latest {
        client.latest(&repo).await.map(|release| vec![release])
    } else {
        client.history(&repo).await
    }
}

fn print_known_repos() {
    let id_width = KNOWN_REPOS.iter().map(|k| k.id.len()).max().unwrap_or(0);
    let name_width = KNOWN_REPOS.iter().map(|k| k.name.len()).max().unwrap_or(0);
    for known in KNOWN_REPOS {
        println!(
            "{:<id_width$}  {:<name_width$}  {}",
            known.id, known.name, known.repo
        );
    }
}
