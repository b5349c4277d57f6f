// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rendered state of the cascade.
//!
//! ```text
//! Board
//!   slot 0  Selection { control, description, items }
//!   slot 1  Selection { ... }
//!   slot 2  Downloads [button, button]   or   Error "出错：..."
//! ```
//!
//! Slots are strictly ordered by level and nothing exists below the deepest
//! one. Every slot carries a token; work started for a slot re-checks that
//! token before writing, so results for a level that has since been
//! replaced are dropped.

use std::fmt;

use super::cooldown::cooldown_label;
use super::item::SelectorItem;
use crate::utility::format_bytes;

/// Description shown when an item has nothing to show and nothing below.
pub const PLACEHOLDER: &str = "此层级既无下一级数据，也无描述信息。";

/// One entry of a selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Index into the level's item list.
    pub index: usize,
    pub label: String,
}

/// Options sharing a `type` label; `None` for ungrouped items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub label: Option<String>,
    pub options: Vec<SelectOption>,
}

/// Selection control for one level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectControl {
    pub groups: Vec<OptionGroup>,
    pub selected: Option<usize>,
    /// Set while a change on this control is being processed.
    pub disabled: bool,
}

impl SelectControl {
    /// Options in display order.
    pub fn options(&self) -> impl Iterator<Item = &SelectOption> {
        self.groups.iter().flat_map(|group| group.options.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.options.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A piece of a description pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionBlock {
    /// Inline rich text from the item.
    Text(String),
    /// Text fetched from `descriptionUrl`.
    Fetched { url: String, content: String },
    /// `descriptionUrl` could not be fetched.
    FetchFailed { url: String, message: String },
    /// Nothing to show and nothing below.
    Placeholder,
}

impl fmt::Display for DescriptionBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Fetched { content, .. } => f.write_str(content),
            Self::FetchFailed { message, .. } => write!(f, "加载描述失败：{message}"),
            Self::Placeholder => f.write_str(PLACEHOLDER),
        }
    }
}

/// Description area attached to a selection control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionPane {
    pub blocks: Vec<DescriptionBlock>,
    /// `scriptUrl` of the selected item, recorded but never executed.
    pub script_url: Option<String>,
}

impl DescriptionPane {
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.script_url = None;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// A download button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadButton {
    /// Idle label, e.g. `下载 arm64-v8a 架构`.
    pub caption: String,
    pub name: String,
    pub url: String,
    pub size: Option<u64>,
    /// Seconds left on the click cooldown.
    pub cooldown: Option<u64>,
}

impl DownloadButton {
    /// Label as currently displayed.
    #[must_use]
    pub fn label(&self) -> String {
        self.cooldown
            .map_or_else(|| self.caption.clone(), cooldown_label)
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.cooldown.is_some()
    }
}

/// Inline load failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLine {
    pub message: String,
}

impl fmt::Display for ErrorLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "出错：{}", self.message)
    }
}

/// What a level shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent {
    Selection {
        control: SelectControl,
        description: DescriptionPane,
        items: Vec<SelectorItem>,
    },
    Downloads(Vec<DownloadButton>),
    Error(ErrorLine),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub level: usize,
    token: u64,
    pub content: SlotContent,
}

impl Slot {
    #[must_use]
    pub const fn slot_ref(&self) -> SlotRef {
        SlotRef {
            level: self.level,
            token: self.token,
        }
    }

    /// The selected item, for selection slots.
    #[must_use]
    pub fn selected_item(&self) -> Option<&SelectorItem> {
        match &self.content {
            SlotContent::Selection { control, items, .. } => {
                control.selected.and_then(|index| items.get(index))
            }
            _ => None,
        }
    }
}

/// Identity of a rendered slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub level: usize,
    token: u64,
}

/// Where a pending level will attach: below `parent`, or at the root of
/// `session` when there is no parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Anchor {
    session: u64,
    parent: Option<SlotRef>,
}

impl Anchor {
    pub(crate) fn level(self) -> usize {
        self.parent.map_or(0, |parent| parent.level + 1)
    }
}

/// All rendered levels.
#[derive(Debug, Clone, Default)]
pub struct Board {
    slots: Vec<Slot>,
    session: u64,
    next_token: u64,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, level: usize) -> Option<&Slot> {
        self.slots.get(level)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Name of the item currently selected at `level`.
    #[must_use]
    pub fn selected_name(&self, level: usize) -> Option<&str> {
        self.slot(level)
            .and_then(Slot::selected_item)
            .map(|item| item.name.as_str())
    }

    /// Drop every slot and invalidate all in-flight work.
    pub(crate) fn reset(&mut self) -> Anchor {
        self.session += 1;
        self.slots.clear();
        Anchor {
            session: self.session,
            parent: None,
        }
    }

    pub(crate) fn is_current(&self, slot: SlotRef) -> bool {
        self.slots
            .get(slot.level)
            .is_some_and(|current| current.token == slot.token)
    }

    pub(crate) fn is_live(&self, anchor: Anchor) -> bool {
        anchor.session == self.session && anchor.parent.is_none_or(|p| self.is_current(p))
    }

    pub(crate) const fn anchor_below(&self, slot: SlotRef) -> Anchor {
        Anchor {
            session: self.session,
            parent: Some(slot),
        }
    }

    /// Remove every level at or below `anchor`, if it is still live.
    pub(crate) fn clear_from(&mut self, anchor: Anchor) -> bool {
        if !self.is_live(anchor) {
            return false;
        }
        self.slots.truncate(anchor.level());
        true
    }

    /// Render `content` at the anchor's level, replacing that level and
    /// everything below it. Returns `None` for stale anchors.
    pub(crate) fn commit(&mut self, anchor: Anchor, content: SlotContent) -> Option<SlotRef> {
        if !self.is_live(anchor) {
            return None;
        }
        let level = anchor.level();
        self.slots.truncate(level);
        self.next_token += 1;
        let slot = Slot {
            level,
            token: self.next_token,
            content,
        };
        let slot_ref = slot.slot_ref();
        self.slots.push(slot);
        Some(slot_ref)
    }

    /// Render a selection control that is already held for the pass about
    /// to auto-select in it, so no other change can slip in first.
    pub(crate) fn commit_held_selection(
        &mut self,
        anchor: Anchor,
        mut control: SelectControl,
        description: DescriptionPane,
        items: Vec<SelectorItem>,
    ) -> Option<SlotRef> {
        control.disabled = true;
        self.commit(
            anchor,
            SlotContent::Selection {
                control,
                description,
                items,
            },
        )
    }

    pub(crate) fn selection_mut(
        &mut self,
        slot: SlotRef,
    ) -> Option<(&mut SelectControl, &mut DescriptionPane)> {
        if !self.is_current(slot) {
            return None;
        }
        match &mut self.slots.get_mut(slot.level)?.content {
            SlotContent::Selection {
                control,
                description,
                ..
            } => Some((control, description)),
            _ => None,
        }
    }

    /// Mark option `index` selected and hold the control until the pass
    /// that handles it ends. Returns the selected item.
    pub(crate) fn begin_selection(&mut self, slot: SlotRef, index: usize) -> Option<SelectorItem> {
        if !self.is_current(slot) {
            return None;
        }
        match &mut self.slots.get_mut(slot.level)?.content {
            SlotContent::Selection { control, items, .. } => {
                let item = items.get(index)?.clone();
                control.selected = Some(index);
                control.disabled = true;
                Some(item)
            }
            _ => None,
        }
    }

    pub(crate) fn button_mut(
        &mut self,
        slot: SlotRef,
        index: usize,
    ) -> Option<&mut DownloadButton> {
        if !self.is_current(slot) {
            return None;
        }
        match &mut self.slots.get_mut(slot.level)?.content {
            SlotContent::Downloads(buttons) => buttons.get_mut(index),
            _ => None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            match &slot.content {
                SlotContent::Selection {
                    control,
                    description,
                    ..
                } => {
                    writeln!(f, "[{}]", slot.level)?;
                    for group in &control.groups {
                        let indent = if let Some(label) = &group.label {
                            writeln!(f, "  {label}")?;
                            "    "
                        } else {
                            "  "
                        };
                        for option in &group.options {
                            let marker = if control.selected == Some(option.index) {
                                '>'
                            } else {
                                ' '
                            };
                            writeln!(f, "{indent}{marker} {}. {}", option.index, option.label)?;
                        }
                    }
                    for block in &description.blocks {
                        for line in block.to_string().lines() {
                            writeln!(f, "  | {line}")?;
                        }
                    }
                }
                SlotContent::Downloads(buttons) => {
                    writeln!(f, "[{}]", slot.level)?;
                    for (index, button) in buttons.iter().enumerate() {
                        write!(f, "  {index}. {}  {}", button.label(), button.url)?;
                        match button.size {
                            Some(size) => writeln!(f, "  ({})", format_bytes(size))?,
                            None => writeln!(f)?,
                        }
                    }
                }
                SlotContent::Error(line) => {
                    writeln!(f, "[{}] {line}", slot.level)?;
                }
            }
        }
        Ok(())
    }
}
