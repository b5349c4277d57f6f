// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the site content commands.

use clap::Args;

use crate::site::Page;

/// Arguments for the `contributors` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ContributorsArgs {
    /// Contributor list URL or site path; defaults to `site.contributors`.
    #[arg(long, value_name = "URL")]
    pub source: Option<String>,

    /// Only print the download-line table.
    #[arg(long)]
    pub lines: bool,
}

/// Arguments for the `announcement` command.
#[derive(Debug, Clone, Default, Args)]
pub struct AnnouncementArgs {
    /// Remember the current announcement as read.
    #[arg(long = "mark-read")]
    pub mark_read: bool,
}

/// Arguments for the `sysinfo` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SysinfoArgs {
    /// Browser user agent string.
    #[arg(short = 'u', long = "user-agent", value_name = "UA")]
    pub user_agent: String,

    /// Platform string used when the user agent carries no CPU token.
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,
}

/// Arguments for the `page` command.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// `1`..`5`, `tab1`..`tab5`, or `introFcl`.
    #[arg(value_name = "TAB")]
    pub page: Page,
}

/// Arguments for the `store` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StoreArgs {
    /// Key to read or write; lists every entry when omitted.
    #[arg(value_name = "KEY")]
    pub key: Option<String>,

    /// New value for KEY.
    #[arg(value_name = "VALUE", requires = "key")]
    pub value: Option<String>,

    /// Remove KEY.
    #[arg(long, requires = "key", conflicts_with = "value")]
    pub remove: bool,
}
