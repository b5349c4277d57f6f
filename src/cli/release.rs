// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `releases` command.

use clap::Args;

/// Arguments for the `releases` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ReleasesArgs {
    /// Known repository id/name (e.g. `Fcl`, `HMCL`) or `owner/repo`.
    #[arg(value_name = "REPO", default_value = "Fcl")]
    pub repo: String,

    /// Only show the latest release.
    #[arg(long)]
    pub latest: bool,

    /// List the known repositories and exit.
    #[arg(long, conflicts_with = "latest")]
    pub known: bool,
}
