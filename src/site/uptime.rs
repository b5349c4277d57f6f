// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Site run time counter.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

const UNITS: [(i64, &str); 4] = [(86_400, "天"), (3_600, "时"), (60, "分"), (1, "秒")];

/// 2025-03-19 02:19:45 local time.
#[must_use]
pub fn site_start() -> Option<DateTime<Local>> {
    let naive = NaiveDate::from_ymd_opt(2025, 3, 19)?.and_hms_opt(2, 19, 45)?;
    Local.from_local_datetime(&naive).earliest()
}

/// Elapsed time from `start` to `now`, listing only non-zero units, e.g.
/// `1天5分3秒`. Anything under a second, or a `now` before `start`, is `0秒`.
#[must_use]
pub fn format_uptime<Tz: TimeZone>(start: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let mut remaining = now.clone().signed_duration_since(start.clone()).num_seconds();
    if remaining <= 0 {
        return "0秒".to_string();
    }

    let mut out = String::new();
    for (size, label) in UNITS {
        let count = remaining / size;
        if count > 0 {
            out.push_str(&format!("{count}{label}"));
            remaining %= size;
        }
    }
    out
}

/// Run time as of now.
#[must_use]
pub fn uptime() -> String {
    site_start().map_or_else(
        || "0秒".to_string(),
        |start| format_uptime(&start, &Local::now()),
    )
}
