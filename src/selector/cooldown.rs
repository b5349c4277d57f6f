// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Download button cooldown.
//!
//! ```text
//! click -> cooldown = N -> tick 1s -> N-1 -> ... -> 1 -> tick -> idle
//! ```
//!
//! The countdown stops early when the button's slot is replaced or the
//! selector shuts down.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use flume::Sender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::BoardEvent;
use super::board::{Board, SlotRef};
use super::lock;

/// Label shown while a button cools down.
#[must_use]
pub fn cooldown_label(remaining: u64) -> String {
    format!("请勿重复点击：{remaining}秒")
}

pub(crate) struct Countdown {
    pub(crate) board: Arc<Mutex<Board>>,
    pub(crate) slot: SlotRef,
    pub(crate) button: usize,
    pub(crate) seconds: u64,
    pub(crate) events: Sender<BoardEvent>,
    pub(crate) shutdown: CancellationToken,
}

impl Countdown {
    /// Tick the button's remaining seconds down to idle on the runtime.
    pub(crate) fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        for remaining in (0..self.seconds).rev() {
            tokio::select! {
                () = self.shutdown.cancelled() => return,
                () = tokio::time::sleep(Duration::from_secs(1)) => {}
            }

            let updated = {
                let mut board = lock(&self.board);
                match board.button_mut(self.slot, self.button) {
                    Some(button) => {
                        button.cooldown = (remaining > 0).then_some(remaining);
                        true
                    }
                    None => false,
                }
            };
            if !updated {
                trace!(level = self.slot.level, "cooldown target gone");
                return;
            }
            let _ = self.events.try_send(BoardEvent::Cooldown {
                level: self.slot.level,
                button: self.button,
                remaining,
            });
        }
    }
}
