// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `browse` command.
//!
//! ```text
//! browse [SOURCE] [--api-ver V]
//!        [--pick NAME]...            level 0, 1, ... in order
//!        [--button N [--output DIR]] click + download
//! ```

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::selector::ApiVer;

/// Arguments for the `browse` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BrowseArgs {
    /// Manifest URL, site path, or inline JSON array (starting with '[').
    /// Defaults to the configured root manifest.
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Adapt the root manifest with this API shape.
    #[arg(long = "api-ver", value_enum, value_name = "API")]
    pub api_ver: Option<ApiVerArg>,

    /// Select the option with this name, one flag per level starting at 0.
    #[arg(short = 'p', long = "pick", value_name = "NAME", action = clap::ArgAction::Append)]
    pub picks: Vec<String>,

    /// Press download button N (0-based) on the deepest level.
    #[arg(short = 'b', long = "button", value_name = "N")]
    pub button: Option<usize>,

    /// Download the pressed button's file into this directory.
    #[arg(short = 'o', long = "output", value_name = "DIR", requires = "button")]
    pub output: Option<PathBuf>,

    /// Print the board after every level change.
    #[arg(long)]
    pub trace: bool,
}

/// `--api-ver` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ApiVerArg {
    #[value(name = "Way2old", alias = "way2old")]
    Way2old,
    #[value(name = "Lemwood", alias = "lemwood")]
    Lemwood,
    #[value(name = "LemwoodLatest", alias = "lemwoodlatest")]
    LemwoodLatest,
}

impl From<ApiVerArg> for ApiVer {
    fn from(arg: ApiVerArg) -> Self {
        match arg {
            ApiVerArg::Way2old => Self::Way2old,
            ApiVerArg::Lemwood => Self::Lemwood,
            ApiVerArg::LemwoodLatest => Self::LemwoodLatest,
        }
    }
}
