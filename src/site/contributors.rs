// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contributor credits and the download-line table.

use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Contributor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub bilibili: Option<String>,
    #[serde(default)]
    pub qq: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub contributions: Vec<String>,
    /// Download lines this contributor operates.
    #[serde(default)]
    pub lines: Vec<u32>,
}

/// A profile link button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub href: String,
}

impl Contributor {
    /// Profile links in display order; blank fields are skipped.
    #[must_use]
    pub fn links(&self) -> Vec<Link> {
        let fields = [
            ("GitHub", &self.github, "https://github.com/"),
            ("BiliBili", &self.bilibili, "https://space.bilibili.com/"),
            ("QQ", &self.qq, "https://qm.qq.com/q/"),
            ("Email", &self.email, "mailto:"),
            ("Homepage", &self.homepage, ""),
        ];
        fields
            .into_iter()
            .filter_map(|(label, value, prefix)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| Link {
                        label,
                        href: format!("{prefix}{v}"),
                    })
            })
            .collect()
    }
}

impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == self.name {
            writeln!(f, "{}", self.name)?;
        } else {
            writeln!(f, "{} ({})", self.name, self.id)?;
        }
        for link in self.links() {
            writeln!(f, "  {}: {}", link.label, link.href)?;
        }
        for item in &self.contributions {
            writeln!(f, "  - {item}")?;
        }
        Ok(())
    }
}

/// One row of the download-line table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLine {
    pub id: u32,
    pub provider: String,
    pub provider_id: String,
}

impl fmt::Display for DownloadLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "线路{}  {}", self.id, self.provider)
    }
}

/// Every line of every contributor, sorted by line id.
#[must_use]
pub fn download_lines(contributors: &[Contributor]) -> Vec<DownloadLine> {
    let mut lines: Vec<DownloadLine> = contributors
        .iter()
        .flat_map(|c| {
            c.lines.iter().map(|&id| DownloadLine {
                id,
                provider: c.name.clone(),
                provider_id: c.id.clone(),
            })
        })
        .collect();
    lines.sort_by_key(|line| line.id);
    lines
}
