// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Browse | Releases | Contributors | Announcement | Sysinfo | ...
//! ```

use std::process::ExitCode;

use fcl_mirror::cli::global::GlobalOptions;
use fcl_mirror::cli::{self, Command};
use fcl_mirror::cmd::browse::run_browse_command;
use fcl_mirror::cmd::config::{run_options_command, run_sources_command};
use fcl_mirror::cmd::releases::run_releases_command;
use fcl_mirror::cmd::site::{
    run_announcement_command, run_contributors_command, run_page_command, run_store_command,
    run_sysinfo_command, run_uptime_command, run_version_command,
};
use fcl_mirror::config::Config;
use fcl_mirror::config::loader::ConfigLoader;
use fcl_mirror::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "fclm.toml";
const ENV_PREFIX: &str = "FCLM";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::FAILURE;
    };

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(command, &cli.global, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    let global = &config.global;
    let log_file = (!global.log_file.as_os_str().is_empty())
        .then(|| global.log_file.display().to_string());

    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(log_file)
        .with_json(global.log_json)
        .build()
}

async fn dispatch_command(
    command: &Command,
    global: &GlobalOptions,
    config: &Config,
) -> fcl_mirror::error::Result<()> {
    match command {
        Command::Version(args) => run_version_command(args, config).await,
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Sources => {
            run_sources_command(&build_config_loader(global));
            Ok(())
        }
        Command::Browse(args) => run_browse_command(args, config).await,
        Command::Releases(args) => run_releases_command(args, config).await,
        Command::Contributors(args) => run_contributors_command(args, config).await,
        Command::Announcement(args) => run_announcement_command(args, config).await,
        Command::Sysinfo(args) => run_sysinfo_command(args, config),
        Command::Uptime => run_uptime_command(config).await,
        Command::Page(args) => run_page_command(args, config).await,
        Command::Store(args) => run_store_command(args, config),
    }
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_config {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> fcl_mirror::error::Result<Config> {
    build_config_loader(global)
        .apply_overrides(&global.to_config_overrides())?
        .build()
}
