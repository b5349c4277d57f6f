// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← Additional config files (can repeat)
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (defaults to --log-level)
//! --log-file FILE   ← global.log_file override
//! --base-url URL    ← site.base_url override
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: CLI flags > --set > FCLM_* env > --config > fclm.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        action = clap::ArgAction::Append,
        global = true
    )]
    pub configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, defaults to --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true,
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Site root that relative manifest and content paths resolve against.
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Sets an option, such as 'selector.cooldown_secs=0' or 'latest.strategy=github'.
    /// Can be specified multiple times.
    #[arg(
        short = 's',
        long = "set",
        value_name = "OPTION",
        action = clap::ArgAction::Append,
        global = true
    )]
    pub options: Vec<String>,

    /// Skip the optional fclm.toml in the working directory.
    #[arg(long = "no-default-config", global = true)]
    pub no_default_config: bool,
}

impl GlobalOptions {
    /// Converts command-line flags to `section.key=value` overrides,
    /// applied after the explicit `--set` options.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global.output_log_level={level}"));
        }

        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global.file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global.log_file={}", path.display()));
        }

        if let Some(ref url) = self.base_url {
            overrides.push(format!("site.base_url={url}"));
        }

        overrides
    }
}
