// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   browse, config, releases, site
//! ```

pub mod browse;
pub mod config;
pub mod releases;
pub mod site;
