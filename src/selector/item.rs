// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Canonical manifest items and the sources they are loaded from.
//!
//! ```text
//! SelectorItem --next()--> Next
//!   children  -> Children { subtree, api_ver }
//!   nextUrl   -> Remote   { url, api_ver }
//!   items     -> Group    (several leaves)
//!   url       -> Leaf
//!   otherwise -> Nothing  (placeholder text)
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SelectorError;

/// Upstream manifest conventions understood by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ApiVer {
    Way2old,
    Lemwood,
    LemwoodLatest,
}

impl ApiVer {
    /// Parse a manifest tag; unknown tags mean "no transform".
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "Way2old" => Some(Self::Way2old),
            "Lemwood" => Some(Self::Lemwood),
            "LemwoodLatest" => Some(Self::LemwoodLatest),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Way2old => "Way2old",
            Self::Lemwood => "Lemwood",
            Self::LemwoodLatest => "LemwoodLatest",
        }
    }
}

impl std::fmt::Display for ApiVer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline subtree of an item.
///
/// Manifests carry children in whatever shape the parent's `apiVer`
/// implies, so they stay raw until the parent is selected. Adapters emit
/// children that are already canonical.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Children {
    Raw(Vec<Value>),
    Adapted(Vec<SelectorItem>),
}

impl Children {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Raw(values) => values.len(),
            Self::Adapted(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source for the level these children render into.
    #[must_use]
    pub fn to_source(&self) -> ManifestSource {
        match self {
            Self::Raw(values) => ManifestSource::Inline(Value::Array(values.clone())),
            Self::Adapted(items) => ManifestSource::Items(items.clone()),
        }
    }
}

/// One selectable entry of a manifest level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_children",
        skip_serializing_if = "Option::is_none"
    )]
    pub children: Option<Children>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SelectorItem>>,
    #[serde(
        default,
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub default: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_api_ver",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_ver: Option<ApiVer>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// What selecting an item leads to, in precedence order.
#[derive(Debug, Clone, Copy)]
pub enum Next<'a> {
    Children {
        subtree: &'a Children,
        api_ver: Option<ApiVer>,
    },
    Remote {
        url: &'a str,
        api_ver: Option<ApiVer>,
    },
    Group(&'a [SelectorItem]),
    Leaf(&'a SelectorItem),
    Nothing,
}

impl SelectorItem {
    /// Leaf item with a download URL.
    #[must_use]
    pub fn leaf(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Download URL, if non-empty.
    #[must_use]
    pub fn download_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Lazily fetched subtree URL, if non-empty.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref().filter(|u| !u.is_empty())
    }

    /// Inline description, if non-empty.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    #[must_use]
    pub fn description_url(&self) -> Option<&str> {
        self.description_url.as_deref().filter(|d| !d.is_empty())
    }

    /// Has a deeper level: non-empty `children` or a `nextUrl`.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty()) || self.next_url().is_some()
    }

    /// Resolve the selection outcome: `children → nextUrl → items → url`.
    #[must_use]
    pub fn next(&self) -> Next<'_> {
        if let Some(subtree) = &self.children {
            return Next::Children {
                subtree,
                api_ver: self.api_ver,
            };
        }
        if let Some(url) = self.next_url() {
            return Next::Remote {
                url,
                api_ver: self.api_ver,
            };
        }
        if let Some(items) = &self.items {
            return Next::Group(items);
        }
        if self.download_url().is_some() {
            return Next::Leaf(self);
        }
        Next::Nothing
    }
}

/// A level renders as download buttons when it is empty, or when every item
/// has a URL and none leads deeper.
#[must_use]
pub fn is_terminal_level(items: &[SelectorItem]) -> bool {
    items
        .iter()
        .all(|item| item.download_url().is_some() && !item.is_branch())
}

/// Index auto-selected after a control is rendered: the first `default`
/// item, else the first item.
#[must_use]
pub fn default_index(items: &[SelectorItem]) -> usize {
    items.iter().position(|item| item.default).unwrap_or(0)
}

/// Where a level's data comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestSource {
    /// Fetched with GET.
    Url(String),
    /// Already in memory, not yet adapted.
    Inline(Value),
    /// Already in memory and canonical.
    Items(Vec<SelectorItem>),
}

impl ManifestSource {
    /// Interpret user input: a leading `[` is an inline JSON array,
    /// anything else a URL.
    ///
    /// # Errors
    ///
    /// Returns `SelectorError::Parse` if inline JSON does not decode.
    pub fn from_user_input(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.starts_with('[') {
            Ok(Self::Inline(serde_json::from_str(trimmed)?))
        } else {
            Ok(Self::Url(trimmed.to_string()))
        }
    }

    /// Short description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Inline(_) => "<inline json>".to_string(),
            Self::Items(items) => format!("<{} items>", items.len()),
        }
    }
}

impl From<&str> for ManifestSource {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for ManifestSource {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Vec<SelectorItem>> for ManifestSource {
    fn from(items: Vec<SelectorItem>) -> Self {
        Self::Items(items)
    }
}

fn deserialize_children<'de, D>(deserializer: D) -> Result<Option<Children>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => Some(Children::Raw(values)),
        _ => None,
    })
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)? == Value::Bool(true))
}

fn deserialize_api_ver<'de, D>(deserializer: D) -> Result<Option<ApiVer>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .and_then(ApiVer::parse))
}
