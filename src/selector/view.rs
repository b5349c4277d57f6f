// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rendering strategy for selector slots.
//!
//! Front ends customize widgets by implementing [`View`]; every method has
//! a default that produces the stock widgets, so an implementation only
//! overrides what it changes.

use super::board::{
    DescriptionPane, DownloadButton, ErrorLine, OptionGroup, SelectControl, SelectOption,
};
use super::item::SelectorItem;

/// Label for options without a name.
pub const UNNAMED_OPTION: &str = "(无名称)";

/// Widget factory used by the selector.
pub trait View: Send + Sync {
    /// Build the selection control for `items`.
    fn create_select(&self, items: &[SelectorItem], _level: usize) -> SelectControl {
        build_select(items)
    }

    /// Build the (empty) description pane attached to a control.
    fn create_description(&self, _level: usize) -> DescriptionPane {
        DescriptionPane::default()
    }

    /// Build a download button for a leaf item.
    fn create_download(&self, item: &SelectorItem) -> Option<DownloadButton> {
        build_download(item)
    }

    /// Build the inline error line for a failed level.
    fn render_error(&self, message: &str, _level: usize) -> ErrorLine {
        ErrorLine {
            message: message.to_string(),
        }
    }
}

/// Stock widgets.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultView;

impl View for DefaultView {}

/// Group options by `type` in first-seen order; untyped items form one
/// unlabeled group.
#[must_use]
pub fn build_select(items: &[SelectorItem]) -> SelectControl {
    let mut groups: Vec<OptionGroup> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let option = SelectOption {
            index,
            label: option_label(item),
        };
        match groups.iter_mut().find(|g| g.label == item.group) {
            Some(group) => group.options.push(option),
            None => groups.push(OptionGroup {
                label: item.group.clone(),
                options: vec![option],
            }),
        }
    }
    SelectControl {
        groups,
        selected: None,
        disabled: false,
    }
}

#[must_use]
pub fn option_label(item: &SelectorItem) -> String {
    if item.name.is_empty() {
        UNNAMED_OPTION.to_string()
    } else {
        item.name.clone()
    }
}

/// Button caption: `下载 {name}`, with `all 架构` shown as `通用架构` and
/// nameless items as `文件`.
#[must_use]
pub fn download_caption(name: &str) -> String {
    let shown = match name {
        "" => "文件",
        "all 架构" => "通用架构",
        other => other,
    };
    format!("下载 {shown}")
}

/// Button for an item with a URL; `None` for items without one.
#[must_use]
pub fn build_download(item: &SelectorItem) -> Option<DownloadButton> {
    let url = item.download_url()?;
    Some(DownloadButton {
        caption: download_caption(&item.name),
        name: item.name.clone(),
        url: url.to_string(),
        size: item.size,
        cooldown: None,
    })
}
