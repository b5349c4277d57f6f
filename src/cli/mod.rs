// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for fcl-mirror using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! fclm [global options] <command>
//! version [--remote]
//! options | sources
//! browse [SOURCE] [--api-ver V] [--pick NAME]... [--button N --output DIR]
//! releases [REPO] [--latest | --known]
//! contributors [--source URL] [--lines]
//! announcement [--mark-read]
//! sysinfo --user-agent UA [--platform P]
//! uptime
//! page <TAB>
//! store [KEY [VALUE] | KEY --remove]
//! ```

pub mod browse;
pub mod global;
pub mod release;
pub mod site;


use crate::cli::browse::BrowseArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::release::ReleasesArgs;
use crate::cli::site::{AnnouncementArgs, ContributorsArgs, PageArgs, StoreArgs, SysinfoArgs};
use clap::{Args, Parser, Subcommand};

/// FCL download mirror front end.
///
/// Browses the mirror's cascading download manifests from the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "fclm",
    author,
    version,
    about = "FCL download mirror front end",
    long_about = "fcl-mirror Copyright (C) 2026 fcl-mirror contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Walks the download mirror's JSON manifests (app, version,\n\
                  architecture) and prints the download links they lead to.\n\n\
                  `fclm browse` starts at the site's root manifest and follows\n\
                  the default choices. Use `--pick NAME` once per level to\n\
                  choose differently. See `fclm <command> --help` for more.",
    after_help = "CONFIG FILES:\n\n\
                  fclm reads `fclm.toml` from the current directory when it\n\
                  exists, then every --config file in order, then FCLM_*\n\
                  environment variables (FCLM_SECTION__KEY=value), then --set\n\
                  options. Use --no-default-config to skip `fclm.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version(VersionArgs),

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Sources,

    /// Walks the cascading download manifests.
    Browse(BrowseArgs),

    /// Shows GitHub release history.
    Releases(ReleasesArgs),

    /// Shows contributor credits and the download-line table.
    Contributors(ContributorsArgs),

    /// Shows the site announcement.
    Announcement(AnnouncementArgs),

    /// Checks a user agent for launcher compatibility.
    Sysinfo(SysinfoArgs),

    /// Shows how long the site has been running.
    Uptime,

    /// Prints a static page fragment.
    Page(PageArgs),

    /// Reads or writes local storage.
    Store(StoreArgs),
}

/// Arguments for the `version` command.
#[derive(Debug, Clone, Default, Args)]
pub struct VersionArgs {
    /// Also print the site build from `site.version_info`.
    #[arg(long)]
    pub remote: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
