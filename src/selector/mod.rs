// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cascade selector over hierarchical download manifests.
//!
//! # Cascade
//!
//! ```text
//! load(source)
//!   |
//!   v
//! Load { source, apiVer, anchor } --fetch--> adapt --> terminal? --yes--> Downloads
//!   ^                                                    | no
//!   |                                                    v
//!   |                                        Selection control (level N)
//!   |                                                    |
//!   |                                      auto-select default / first
//!   |                                                    v
//!   |                                   Handle { slot, item }
//!   |                                     description / descriptionUrl
//!   |                                     clear levels > N
//!   |                                                    |
//!   +-------- children / nextUrl <---------- item.next() +--> items / url --> Downloads
//!                                                        +--> nothing     --> placeholder
//! ```
//!
//! One user action drives one pass of this loop. The control that started
//! the pass and every control auto-selected during it stay disabled until
//! the pass ends; a second change on a disabled control is rejected with
//! [`SelectorError::Busy`]. Results for levels replaced mid-pass are
//! dropped (see [`board`]).

pub mod adapter;
pub mod board;
pub mod cooldown;
pub mod fetcher;
pub mod item;
pub mod latest;
pub mod view;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use flume::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::SelectorError;

pub use adapter::Adapter;
pub use board::{Board, DescriptionBlock, DownloadButton, SlotContent, SlotRef};
pub use fetcher::{HttpFetcher, ManifestFetcher};
pub use item::{ApiVer, ManifestSource, Next, SelectorItem};
pub use latest::{LatestCache, LatestResolver, UpstreamResolver};
pub use view::{DefaultView, View};

use board::{Anchor, SlotContent as Content};
use cooldown::Countdown;
use item::{default_index, is_terminal_level};

/// Called with the selected item and its level. Returning `true` stops the
/// default handling after the inline description is shown.
pub type ItemSelectHook = Arc<dyn Fn(&SelectorItem, usize) -> bool + Send + Sync>;
/// Called with the level that became current after a selection.
pub type LevelChangeHook = Arc<dyn Fn(usize) + Send + Sync>;
/// Called for every accepted download click.
pub type DownloadHook = Arc<dyn Fn(&DownloadButton) + Send + Sync>;

/// Optional callbacks into the embedding front end.
#[derive(Clone, Default)]
pub struct SelectorHooks {
    pub on_item_select: Option<ItemSelectHook>,
    pub on_level_change: Option<LevelChangeHook>,
    pub on_download: Option<DownloadHook>,
}

/// Redraw notifications for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    Reset,
    Rendered { level: usize },
    Failed { level: usize, message: String },
    Cooldown { level: usize, button: usize, remaining: u64 },
}

/// Outcome of a download click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    /// The download should start.
    Accepted(DownloadButton),
    /// The button is cooling down; nothing happens.
    CoolingDown { remaining: u64 },
}

const EVENT_BACKLOG: usize = 256;

pub(crate) fn lock(board: &Mutex<Board>) -> MutexGuard<'_, Board> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}

enum Step {
    Load {
        source: ManifestSource,
        api_ver: Option<ApiVer>,
        anchor: Anchor,
    },
    Select {
        slot: SlotRef,
        index: usize,
    },
    Handle {
        slot: SlotRef,
        item: SelectorItem,
    },
}

/// State scoped to one cascade pass.
#[derive(Default)]
struct Pass {
    latest: LatestCache,
    held: Vec<SlotRef>,
}

/// The cascade selector.
///
/// # Example
/// ```ignore
/// use std::sync::Arc;
/// use fcl_mirror::selector::{HttpFetcher, Selector};
///
/// let selector = Selector::builder()
///     .fetcher(Arc::new(HttpFetcher::new()))
///     .build();
/// selector.load("https://fcl.xiaoluofoxington.top/data/down/root.json").await;
/// println!("{}", selector.render());
/// ```
pub struct Selector {
    fetcher: Arc<dyn ManifestFetcher>,
    adapter: Adapter,
    view: Arc<dyn View>,
    hooks: SelectorHooks,
    cooldown: Duration,
    board: Arc<Mutex<Board>>,
    events: Sender<BoardEvent>,
    receiver: Receiver<BoardEvent>,
    shutdown: CancellationToken,
}

#[bon::bon]
impl Selector {
    /// Build a selector. Without a resolver, latest versions come from the
    /// GitHub/Lemwood APIs through `fetcher`; without a view, stock widgets
    /// are used.
    #[builder]
    pub fn new(
        fetcher: Arc<dyn ManifestFetcher>,
        resolver: Option<Arc<dyn LatestResolver>>,
        view: Option<Arc<dyn View>>,
        #[builder(default)] hooks: SelectorHooks,
        #[builder(default = Duration::from_secs(10))] cooldown: Duration,
    ) -> Self {
        let resolver = resolver
            .unwrap_or_else(|| Arc::new(UpstreamResolver::new(Arc::clone(&fetcher))));
        let (events, receiver) = flume::bounded(EVENT_BACKLOG);
        Self {
            fetcher,
            adapter: Adapter::new(resolver),
            view: view.unwrap_or_else(|| Arc::new(DefaultView)),
            hooks,
            cooldown,
            board: Arc::new(Mutex::new(Board::new())),
            events,
            receiver,
            shutdown: CancellationToken::new(),
        }
    }
}

impl Selector {
    /// Observe board changes. Events are dropped when nobody keeps up.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<BoardEvent> {
        self.receiver.clone()
    }

    /// Read the board.
    ///
    /// `f` runs with the board lock held. It must not call back into this
    /// selector (`render`, `click`, `select`, `with_board`, ...) or it
    /// deadlocks; copy out what you need and act after it returns, or use
    /// [`Selector::snapshot`].
    pub fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&lock(&self.board))
    }

    /// Detached copy of the board, free to hold across further calls.
    #[must_use]
    pub fn snapshot(&self) -> Board {
        self.with_board(Board::clone)
    }

    /// Plain-text rendering of the board.
    #[must_use]
    pub fn render(&self) -> String {
        self.with_board(ToString::to_string)
    }

    /// Replace the whole board with the manifest at `source`.
    pub async fn load(&self, source: impl Into<ManifestSource>) {
        self.load_tagged(source.into(), None).await;
    }

    /// Like [`Selector::load`], adapting the root with `api_ver`.
    pub async fn load_tagged(&self, source: ManifestSource, api_ver: Option<ApiVer>) {
        let anchor = lock(&self.board).reset();
        self.emit(BoardEvent::Reset);
        info!(source = %source.describe(), "loading manifest");
        self.process(
            Step::Load {
                source,
                api_ver,
                anchor,
            },
            Pass::default(),
        )
        .await;
    }

    /// Change the selection at `level` and run the resulting cascade.
    ///
    /// # Errors
    ///
    /// Rejects levels that are not rendered or not selection controls,
    /// out-of-range indices, and controls still busy with a prior change.
    pub async fn select(&self, level: usize, index: usize) -> Result<(), SelectorError> {
        let (slot, item) = {
            let mut board = lock(&self.board);
            let current = board
                .slot(level)
                .ok_or(SelectorError::LevelNotFound { level })?;
            let Content::Selection { control, items, .. } = &current.content else {
                return Err(SelectorError::NotASelection { level });
            };
            if control.disabled {
                return Err(SelectorError::Busy { level });
            }
            if index >= items.len() {
                return Err(SelectorError::OptionOutOfRange { level, index });
            }
            let slot = current.slot_ref();
            let item = board
                .begin_selection(slot, index)
                .ok_or(SelectorError::LevelNotFound { level })?;
            (slot, item)
        };

        let mut pass = Pass::default();
        pass.held.push(slot);
        self.process(Step::Handle { slot, item }, pass).await;
        Ok(())
    }

    /// [`Selector::select`] by item name.
    ///
    /// # Errors
    ///
    /// As [`Selector::select`], plus `OptionNotFound` for unknown names.
    pub async fn select_by_name(&self, level: usize, name: &str) -> Result<(), SelectorError> {
        let index = self.with_board(|board| {
            let current = board
                .slot(level)
                .ok_or(SelectorError::LevelNotFound { level })?;
            let Content::Selection { items, .. } = &current.content else {
                return Err(SelectorError::NotASelection { level });
            };
            items
                .iter()
                .position(|item| item.name == name)
                .ok_or_else(|| SelectorError::OptionNotFound {
                    level,
                    name: name.to_string(),
                })
        })?;
        self.select(level, index).await
    }

    /// Press download button `index` at `level`.
    ///
    /// An accepted click starts the cooldown on that button; clicks during
    /// the cooldown are ignored. The countdown runs on the current Tokio
    /// runtime; outside one the button does not cool down.
    ///
    /// # Errors
    ///
    /// `LevelNotFound` or `ButtonNotFound` when there is no such button.
    pub fn click(&self, level: usize, index: usize) -> Result<Click, SelectorError> {
        let seconds = self.cooldown.as_secs();
        let (slot, accepted, cooling) = {
            let mut board = lock(&self.board);
            let slot = board
                .slot(level)
                .ok_or(SelectorError::LevelNotFound { level })?
                .slot_ref();
            let button = board
                .button_mut(slot, index)
                .ok_or(SelectorError::ButtonNotFound { level, index })?;
            if let Some(remaining) = button.cooldown {
                debug!(level, index, remaining, "click ignored during cooldown");
                return Ok(Click::CoolingDown { remaining });
            }
            let accepted = button.clone();
            let cooling = seconds > 0 && tokio::runtime::Handle::try_current().is_ok();
            if cooling {
                button.cooldown = Some(seconds);
            }
            (slot, accepted, cooling)
        };

        info!(url = %accepted.url, name = %accepted.name, "download requested");
        if let Some(hook) = &self.hooks.on_download {
            hook(&accepted);
        }
        if cooling {
            self.emit(BoardEvent::Cooldown {
                level,
                button: index,
                remaining: seconds,
            });
            Countdown {
                board: Arc::clone(&self.board),
                slot,
                button: index,
                seconds,
                events: self.events.clone(),
                shutdown: self.shutdown.child_token(),
            }
            .spawn();
        }
        Ok(Click::Accepted(accepted))
    }

    /// Stop all cooldown countdowns.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    fn emit(&self, event: BoardEvent) {
        let _ = self.events.try_send(event);
    }

    async fn process(&self, first: Step, mut pass: Pass) {
        let mut next = Some(first);
        while let Some(step) = next.take() {
            next = match step {
                Step::Load {
                    source,
                    api_ver,
                    anchor,
                } => self.load_level(source, api_ver, anchor, &mut pass).await,
                Step::Select { slot, index } => lock(&self.board)
                    .begin_selection(slot, index)
                    .map(|item| Step::Handle { slot, item }),
                Step::Handle { slot, item } => self.handle(slot, item).await,
            };
        }

        let mut board = lock(&self.board);
        for slot in pass.held {
            if let Some((control, _)) = board.selection_mut(slot) {
                control.disabled = false;
            }
        }
    }

    async fn fetch_level(
        &self,
        source: ManifestSource,
        api_ver: Option<ApiVer>,
        selection: Option<&str>,
        latest: &mut LatestCache,
    ) -> Result<Vec<SelectorItem>, SelectorError> {
        match source {
            ManifestSource::Items(items) if api_ver.is_none() => Ok(items),
            source => {
                let raw = fetcher::fetch_items(self.fetcher.as_ref(), &source).await?;
                self.adapter.adapt(raw, api_ver, selection, latest).await
            }
        }
    }

    async fn load_level(
        &self,
        source: ManifestSource,
        api_ver: Option<ApiVer>,
        anchor: Anchor,
        pass: &mut Pass,
    ) -> Option<Step> {
        let level = anchor.level();
        let selection = {
            let mut board = lock(&self.board);
            if !board.clear_from(anchor) {
                return None;
            }
            board.selected_name(0).map(str::to_string)
        };
        debug!(level, source = %source.describe(), ?api_ver, "loading level");

        let items = match self
            .fetch_level(source, api_ver, selection.as_deref(), &mut pass.latest)
            .await
        {
            Ok(items) => items,
            Err(e) => {
                self.fail(anchor, &e);
                return None;
            }
        };

        if is_terminal_level(&items) {
            self.render_downloads(anchor, &items);
            return None;
        }

        let control = self.view.create_select(&items, level);
        let description = self.view.create_description(level);
        let index = default_index(&items);
        let slot = lock(&self.board).commit_held_selection(anchor, control, description, items)?;
        pass.held.push(slot);
        self.emit(BoardEvent::Rendered { level });
        Some(Step::Select { slot, index })
    }

    async fn handle(&self, slot: SlotRef, item: SelectorItem) -> Option<Step> {
        let level = slot.level;
        debug!(level, name = %item.name, "item selected");

        {
            let mut board = lock(&self.board);
            let (_, pane) = board.selection_mut(slot)?;
            pane.clear();
            if let Some(text) = item.description() {
                pane.blocks.push(DescriptionBlock::Text(text.to_string()));
            }
            pane.script_url.clone_from(&item.script_url);
        }

        if let Some(hook) = &self.hooks.on_item_select
            && hook(&item, level)
        {
            debug!(level, "selection handled by hook");
            return None;
        }

        if let Some(url) = item.description_url() {
            let block = match self.fetcher.fetch_text(url).await {
                Ok(content) => DescriptionBlock::Fetched {
                    url: url.to_string(),
                    content,
                },
                Err(e) => {
                    warn!(url, error = %e, "description fetch failed");
                    DescriptionBlock::FetchFailed {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            };
            let mut board = lock(&self.board);
            let (_, pane) = board.selection_mut(slot)?;
            pane.blocks.push(block);
        }

        let below = {
            let mut board = lock(&self.board);
            if !board.is_current(slot) {
                return None;
            }
            let below = board.anchor_below(slot);
            board.clear_from(below);
            below
        };

        let next = match item.next() {
            Next::Children { subtree, api_ver } => Some(Step::Load {
                source: subtree.to_source(),
                api_ver,
                anchor: below,
            }),
            Next::Remote { url, api_ver } => Some(Step::Load {
                source: ManifestSource::Url(url.to_string()),
                api_ver,
                anchor: below,
            }),
            Next::Group(items) => {
                self.render_downloads(below, items);
                None
            }
            Next::Leaf(leaf) => {
                self.render_downloads(below, std::slice::from_ref(leaf));
                None
            }
            Next::Nothing => {
                if item.description().is_none() && item.description_url().is_none() {
                    let mut board = lock(&self.board);
                    if let Some((_, pane)) = board.selection_mut(slot) {
                        pane.blocks.push(DescriptionBlock::Placeholder);
                    }
                }
                None
            }
        };

        if let Some(hook) = &self.hooks.on_level_change {
            hook(level + 1);
        }
        next
    }

    fn render_downloads(&self, anchor: Anchor, items: &[SelectorItem]) {
        let buttons: Vec<DownloadButton> = items
            .iter()
            .filter_map(|item| self.view.create_download(item))
            .collect();
        let level = anchor.level();
        debug!(level, count = buttons.len(), "rendering downloads");
        if lock(&self.board)
            .commit(anchor, Content::Downloads(buttons))
            .is_some()
        {
            self.emit(BoardEvent::Rendered { level });
        }
    }

    fn fail(&self, anchor: Anchor, error: &SelectorError) {
        let level = anchor.level();
        let message = error.to_string();
        warn!(level, error = %message, "level failed to load");
        let line = self.view.render_error(&message, level);
        if lock(&self.board)
            .commit(anchor, Content::Error(line))
            .is_some()
        {
            self.emit(BoardEvent::Failed { level, message });
        }
    }
}

impl Drop for Selector {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
