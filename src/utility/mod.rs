// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Small helpers shared by the site panels.
//!
//! ```text
//! format_bytes()  1536 -> "1.5 KiB"
//! checksum()      31-based wrapping hash over UTF-16 units
//! ```

const SIZE_UNITS: [&str; 4] = ["Bytes", "KiB", "MiB", "GiB"];

/// Human-readable size with base 1024 and at most one decimal.
///
/// Sizes past GiB stay in GiB.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

/// Content checksum used to tell whether the announcement changed.
///
/// Same value as Java's `String::hashCode`, so checksums stored by the
/// site stay comparable.
#[must_use]
pub fn checksum(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}
