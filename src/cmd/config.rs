// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options` and `sources`.

use crate::config::Config;
use crate::config::loader::ConfigLoader;

/// Print every option, then the site URLs they resolve to.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
    println!();
    for (label, path) in [
        ("root manifest", &config.site.root_manifest),
        ("contributors", &config.site.contributors),
        ("announcement", &config.site.announcement),
        ("version info", &config.site.version_info),
    ] {
        println!("{label:<13} -> {}", config.site_url(path));
    }
}

/// Print the configuration files the loader picked up, in load order.
pub fn run_sources_command(loader: &ConfigLoader) {
    let files = loader.format_loaded_files();
    if files.is_empty() {
        println!("No configuration files loaded, using defaults");
        return;
    }
    for line in files {
        println!("{line}");
    }
}
