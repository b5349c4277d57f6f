// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Upstream manifest formats → canonical [`SelectorItem`] lists.
//!
//! ```text
//! Way2old  (array | {children, latest})
//!   directory -> {name, description, children, default: name == latest}
//!   file      -> {name: "{arch} 架构", url: download_link, arch}
//!
//! Lemwood  [{name, assets: [{name, url, size}]}]
//!   version   -> {name, default: name == latest, children: assets}
//!
//! LemwoodLatest  {name, assets}  -> Lemwood([value]) without latest
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::item::{ApiVer, Children, SelectorItem};
use super::latest::{LatestCache, LatestResolver};
use crate::error::SelectorError;

/// Applies the transform selected by an `apiVer` tag.
#[derive(Clone)]
pub struct Adapter {
    resolver: Arc<dyn LatestResolver>,
}

impl Adapter {
    #[must_use]
    pub fn new(resolver: Arc<dyn LatestResolver>) -> Self {
        Self { resolver }
    }

    /// Convert `raw` into canonical items.
    ///
    /// `selection` is the root level's current choice; it keys the
    /// latest-version lookup.
    ///
    /// # Errors
    ///
    /// Returns `SelectorError::NotAnArray` when the value has the wrong
    /// top-level shape for `api_ver`, and `SelectorError::Parse` when an
    /// untagged entry does not decode as an item.
    pub async fn adapt(
        &self,
        raw: Value,
        api_ver: Option<ApiVer>,
        selection: Option<&str>,
        cache: &mut LatestCache,
    ) -> Result<Vec<SelectorItem>, SelectorError> {
        let Some(api_ver) = api_ver else {
            return decode_items(raw);
        };
        debug!(%api_ver, ?selection, "adapting manifest");

        match api_ver {
            ApiVer::Way2old => {
                if !(raw.is_array() || raw.is_object()) {
                    return Err(SelectorError::NotAnArray);
                }
                let looked_up = cache
                    .get_or_lookup(self.resolver.as_ref(), api_ver, selection)
                    .await;
                let latest = looked_up.or_else(|| payload_latest(&raw));
                Ok(transform_way2old(&raw, latest.as_deref()))
            }
            ApiVer::Lemwood => {
                let Value::Array(versions) = raw else {
                    return Err(SelectorError::NotAnArray);
                };
                let latest = cache
                    .get_or_lookup(self.resolver.as_ref(), api_ver, selection)
                    .await;
                Ok(transform_lemwood(&versions, latest.as_deref()))
            }
            ApiVer::LemwoodLatest => {
                if !raw.is_object() {
                    return Err(SelectorError::NotAnArray);
                }
                Ok(transform_lemwood(&[raw], None))
            }
        }
    }
}

/// Decode an untagged manifest level.
///
/// # Errors
///
/// `NotAnArray` for non-sequences, `Parse` for entries that are not items.
pub fn decode_items(raw: Value) -> Result<Vec<SelectorItem>, SelectorError> {
    if !raw.is_array() {
        return Err(SelectorError::NotAnArray);
    }
    Ok(serde_json::from_value(raw)?)
}

fn payload_latest(raw: &Value) -> Option<String> {
    raw.get("latest")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn str_field(node: &Value, key: &str) -> String {
    node.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Convert a Way2old tree. Unknown node types are dropped.
#[must_use]
pub fn transform_way2old(raw: &Value, latest: Option<&str>) -> Vec<SelectorItem> {
    let nodes: &[Value] = match raw {
        Value::Array(nodes) => nodes,
        Value::Object(map) => map
            .get("children")
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice),
        _ => &[],
    };

    nodes
        .iter()
        .filter_map(|node| match node.get("type").and_then(Value::as_str) {
            Some("directory") => {
                let name = str_field(node, "name");
                let description = node
                    .get("description")
                    .and_then(Value::as_str)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string);
                let children = node
                    .get("children")
                    .map(|subtree| transform_way2old(subtree, latest))
                    .unwrap_or_default();
                Some(SelectorItem {
                    default: latest.is_some_and(|l| l == name),
                    name,
                    description,
                    children: Some(Children::Adapted(children)),
                    ..SelectorItem::default()
                })
            }
            Some("file") => {
                let arch = str_field(node, "arch");
                Some(SelectorItem {
                    name: format!("{arch} 架构"),
                    url: Some(str_field(node, "download_link")),
                    arch: Some(arch),
                    ..SelectorItem::default()
                })
            }
            other => {
                warn!(node_type = ?other, "skipping unknown Way2old node");
                None
            }
        })
        .collect()
}

/// Convert Lemwood version entries; their assets become leaf children.
#[must_use]
pub fn transform_lemwood(versions: &[Value], latest: Option<&str>) -> Vec<SelectorItem> {
    versions
        .iter()
        .map(|version| {
            let name = str_field(version, "name");
            let assets = version
                .get("assets")
                .and_then(Value::as_array)
                .map(|assets| {
                    assets
                        .iter()
                        .map(|asset| SelectorItem {
                            name: str_field(asset, "name"),
                            url: Some(str_field(asset, "url")),
                            size: asset.get("size").and_then(Value::as_u64),
                            ..SelectorItem::default()
                        })
                        .collect()
                })
                .unwrap_or_default();
            SelectorItem {
                default: latest.is_some_and(|l| l == name),
                name,
                children: Some(Children::Adapted(assets)),
                ..SelectorItem::default()
            }
        })
        .collect()
}
