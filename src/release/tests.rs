// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{HistoryPanel, KNOWN_REPOS, Release, RepoName, error_panel, known_repo, resolve_repo};
use crate::error::ReleaseError;

fn release(json: &str) -> Release {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_repo_name_validation() {
    assert!("FCL-Team/FoldCraftLauncher".parse::<RepoName>().is_ok());
    for bad in ["", "owner", "/repo", "owner/", " / ", "a/b/c"] {
        assert!(
            matches!(bad.parse::<RepoName>(), Err(ReleaseError::InvalidRepoName)),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_known_repos() {
    assert_eq!(KNOWN_REPOS.len(), 8);
    assert_eq!(known_repo("mg").unwrap().repo, "MobileGL-Dev/MobileGlues-release");
    assert_eq!(known_repo("HMCL-PE").unwrap().id, "HmclPe");
    assert_eq!(resolve_repo("zl2").unwrap().as_str(), "ZalithLauncher/ZalithLauncher2");
    assert_eq!(resolve_repo("a/b").unwrap().as_str(), "a/b");
    assert!(resolve_repo("nothing").is_err());
}

#[test]
fn test_release_fallback_texts() {
    let bare = release(r#"{"tag_name": "v1", "name": "", "body": null}"#);
    assert_eq!(bare.display_name(), "未命名版本");
    assert_eq!(bare.notes(), "无发布说明");
    assert!(bare.assets.is_empty());
    assert_eq!(bare.published_local(), "");
}

#[test]
fn test_error_panel_prefix() {
    insta::assert_snapshot!(
        error_panel(&ReleaseError::Empty),
        @"加载Release历史：出错：没有Release数据"
    );
    assert_eq!(
        error_panel(&ReleaseError::InvalidRepoName),
        "加载Release历史：出错：仓库全名非法"
    );
}

#[test]
fn test_history_panel_expands_first() {
    let releases = vec![
        release(
            r#"{"tag_name": "1.2", "name": "FCL 1.2", "body": "修复若干问题",
                "assets": [{"name": "fcl.apk", "size": 42, "digest": "sha256:ab",
                            "browser_download_url": "https://gh/fcl.apk"}]}"#,
        ),
        release(r#"{"tag_name": "1.1", "body": "old notes"}"#),
    ];
    let text = HistoryPanel(&releases).to_string();
    assert!(text.contains("FCL 1.2  1.2"));
    assert!(text.contains("修复若干问题"));
    assert!(text.contains("资源（1）"));
    assert!(text.contains("大小  42字节"));
    assert!(text.contains("未命名版本  1.1"));
    assert!(!text.contains("old notes"));
}
