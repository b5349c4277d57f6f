// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       browse / releases / site
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+----------+---------+---'
//!                 |          |         |
//!                 v          v         v
//!             selector    release     site
//!           cascade UI   GH history  tabs, credits,
//!           |       |                sysinfo, uptime
//!      adapter   board/view             |
//!      latest    cooldown               v
//!           \      /                 storage
//!            fetcher ------> net     JSON k/v
//!                          HTTP/DL
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod net;
pub mod release;
pub mod selector;
pub mod site;
pub mod storage;
pub mod utility;
