// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Announcement with an unread marker.
//!
//! The stored checksum is the one of the last announcement the user opened;
//! anything else (including nothing stored) marks the current one as new.

use std::fmt;

use crate::storage::{ANNOUNCEMENT_CHECKSUM, LocalStore};
use crate::utility::checksum;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub content: String,
    pub checksum: i32,
    pub is_new: bool,
}

impl Announcement {
    /// Compare `content` against the checksum saved in `store`.
    #[must_use]
    pub fn evaluate(content: String, store: &LocalStore) -> Self {
        let checksum = checksum(&content);
        let saved = store
            .get(ANNOUNCEMENT_CHECKSUM)
            .and_then(|v| v.trim().parse::<i32>().ok());
        Self {
            is_new: saved != Some(checksum),
            content,
            checksum,
        }
    }

    /// Remember this announcement as read.
    pub fn mark_read(&mut self, store: &mut LocalStore) {
        store.set(ANNOUNCEMENT_CHECKSUM, self.checksum.to_string());
        self.is_new = false;
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        if self.is_new { "公告 ●" } else { "公告" }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        write!(f, "{}", self.content)
    }
}
