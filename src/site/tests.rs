// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use super::announcement::Announcement;
use super::contributors::{Contributor, download_lines};
use super::sysinfo::{self, Environment, Severity, notices, overall};
use super::tabs::{Fragment, Page};
use super::traffic::{FileTree, Traffic};
use super::uptime::format_uptime;
use super::SiteClient;
use crate::storage::{ANNOUNCEMENT_CHECKSUM, LocalStore};

const PIXEL_UA: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7; aarch64) AppleWebKit/537.36 \
                        (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

fn messages(env: &Environment) -> Vec<String> {
    notices(env).into_iter().skip(1).map(|n| n.to_string()).collect()
}

// --- sysinfo ---

#[test]
fn test_modern_android_chrome() {
    let env = Environment::parse(PIXEL_UA, None);
    assert!(env.android);
    assert_eq!(env.android_version, Some(13));
    assert_eq!(env.arch.as_deref(), Some("aarch64"));
    assert_eq!(env.browser, Some("Mobile Chrome"));

    let list = notices(&env);
    assert_eq!(list[0].message, PIXEL_UA);
    assert_eq!(overall(&list), Severity::Ok);
    insta::assert_snapshot!(messages(&env).join("\n"), @"[✓] 请选择通用架构或“arm64-v8a”架构。");
}

#[test]
fn test_desktop_is_rejected() {
    let env = Environment::parse(DESKTOP_UA, None);
    assert!(!env.android);
    assert_eq!(env.arch.as_deref(), Some("amd64"));
    assert_eq!(env.browser, Some("Chrome"));
    assert_eq!(messages(&env), vec![format!("[✗] {}", sysinfo::NOT_ANDROID)]);
    assert_eq!(overall(&notices(&env)), Severity::Error);
}

#[test]
fn test_old_android_is_rejected() {
    let ua = "Mozilla/5.0 (Linux; Android 8.1.0; Redmi 6) Chrome/99.0 Mobile Safari/537.36";
    let env = Environment::parse(ua, None);
    assert_eq!(env.android_version, Some(8));
    assert!(messages(&env)[0].ends_with(sysinfo::ANDROID_TOO_OLD));
}

#[test]
fn test_platform_fills_missing_arch() {
    let ua = "Mozilla/5.0 (Linux; Android 12; SM-G991B) Chrome/110.0 Mobile Safari/537.36";
    let env = Environment::parse(ua, Some("Linux armv8l"));
    assert_eq!(env.arch.as_deref(), Some("Linux armv8l"));
    assert!(messages(&env)[0].contains("arm64-v8a"));

    let unknown = Environment::parse(ua, Some("MIPS"));
    assert_eq!(
        notices(&unknown)[1].severity,
        Severity::Info,
        "unknown arch falls back to the generic hint"
    );
    assert!(messages(&unknown)[0].ends_with(sysinfo::GENERIC_ARCH));

    let bare = Environment::parse(ua, None);
    assert_eq!(notices(&bare).len(), 1);
}

#[test]
fn test_in_app_browsers() {
    let wechat = Environment::parse(
        "Mozilla/5.0 (Linux; Android 12; V2049A) Chrome/86.0 Mobile Safari/537.36 MicroMessenger/8.0.40",
        None,
    );
    assert_eq!(wechat.browser, Some("WeChat"));
    let wechat_msgs = messages(&wechat);
    assert!(wechat_msgs.iter().any(|m| m.ends_with(sysinfo::UNCOMMON_BROWSER)));
    assert!(wechat_msgs.iter().any(|m| m.ends_with(sysinfo::OPEN_IN_BROWSER)));

    let vivo = Environment::parse(
        "Mozilla/5.0 (Linux; Android 11; V2031A) Chrome/87.0 Mobile Safari/537.36 VivoBrowser/10.2",
        None,
    );
    assert_eq!(vivo.browser, Some("Vivo Browser"));
    assert!(messages(&vivo).iter().any(|m| m.ends_with(sysinfo::VIVO_BROWSER)));

    let qq = "Mozilla/5.0 (Linux; Android 12; V2049A; wv) Chrome/89.0 Mobile Safari/537.36 QQTheme/1000 QQ/9.0.0";
    assert!(sysinfo::is_qq_webview(qq));
    let env = Environment::parse(qq, None);
    assert!(env.qq_webview);
    assert_eq!(overall(&notices(&env)), Severity::Error);
}

#[test]
fn test_severity_order() {
    assert!(Severity::Error > Severity::Warn);
    assert!(Severity::Warn > Severity::Ok);
    assert!(Severity::Ok > Severity::Info);
    assert_eq!(overall(&[]), Severity::Info);
    assert_eq!(Severity::Warn.as_str(), "warn");
}

// --- uptime ---

#[test]
fn test_uptime_lists_nonzero_units() {
    let start = Utc.with_ymd_and_hms(2025, 3, 19, 2, 19, 45).unwrap();
    let cases = [
        (Duration::zero(), "0秒"),
        (Duration::seconds(-30), "0秒"),
        (Duration::seconds(59), "59秒"),
        (Duration::seconds(3_600), "1时"),
        (Duration::days(1) + Duration::minutes(5) + Duration::seconds(3), "1天5分3秒"),
        (Duration::days(365) + Duration::hours(23), "365天23时"),
    ];
    for (elapsed, expected) in cases {
        assert_eq!(format_uptime(&start, &(start + elapsed)), expected);
    }
}

// --- contributors ---

fn sample_contributors() -> Vec<Contributor> {
    serde_json::from_str(
        r#"[
            {"id": "xiaoluo", "name": "小洛", "github": "xiaoluofoxington",
             "bilibili": "123", "homepage": "", "contributions": ["站点维护"], "lines": [3, 1]},
            {"id": "Lemwood", "name": "Lemwood", "email": "a@b.c", "qq": "abc",
             "contributions": [], "lines": [2]},
            {"id": "guest", "name": "Guest"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn test_contributor_links_in_order() {
    let people = sample_contributors();
    let links: Vec<_> = people[0].links().into_iter().map(|l| (l.label, l.href)).collect();
    assert_eq!(
        links,
        vec![
            ("GitHub", "https://github.com/xiaoluofoxington".to_string()),
            ("BiliBili", "https://space.bilibili.com/123".to_string()),
        ]
    );

    let second: Vec<_> = people[1].links().into_iter().map(|l| l.href).collect();
    assert_eq!(second, vec!["https://qm.qq.com/q/abc", "mailto:a@b.c"]);
    assert!(people[2].links().is_empty());
}

#[test]
fn test_contributor_panel() {
    let people = sample_contributors();
    insta::assert_snapshot!(people[0].to_string().trim_end(), @r"
    小洛 (xiaoluo)
      GitHub: https://github.com/xiaoluofoxington
      BiliBili: https://space.bilibili.com/123
      - 站点维护
    ");
    assert!(people[1].to_string().starts_with("Lemwood\n"));
}

#[test]
fn test_download_lines_sorted_by_id() {
    let lines = download_lines(&sample_contributors());
    let rows: Vec<String> = lines.iter().map(ToString::to_string).collect();
    assert_eq!(rows, vec!["线路1  小洛", "线路2  Lemwood", "线路3  小洛"]);
    assert_eq!(lines[0].provider_id, "xiaoluo");
}

// --- announcement ---

#[test]
fn test_announcement_new_until_read() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::open(dir.path().join("store.json")).unwrap();

    let mut first = Announcement::evaluate("<p>维护通知</p>".to_string(), &store);
    assert!(first.is_new);
    assert_eq!(first.title(), "公告 ●");

    first.mark_read(&mut store);
    assert_eq!(first.title(), "公告");
    assert_eq!(
        store.get(ANNOUNCEMENT_CHECKSUM),
        Some(first.checksum.to_string().as_str())
    );

    let again = Announcement::evaluate("<p>维护通知</p>".to_string(), &store);
    assert!(!again.is_new);

    let changed = Announcement::evaluate("<p>新版本</p>".to_string(), &store);
    assert!(changed.is_new);
}

#[test]
fn test_announcement_ignores_garbled_checksum() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::open(dir.path().join("store.json")).unwrap();
    store.set(ANNOUNCEMENT_CHECKSUM, "not-a-number");
    assert!(Announcement::evaluate("x".to_string(), &store).is_new);
}

// --- tabs ---

#[test]
fn test_page_parsing() {
    assert_eq!("3".parse::<Page>().unwrap(), Page::Tab(3));
    assert_eq!("Tab5".parse::<Page>().unwrap(), Page::Tab(5));
    assert_eq!("introFcl".parse::<Page>().unwrap(), Page::IntroFcl);
    assert!("0".parse::<Page>().is_err());
    assert!("tab6".parse::<Page>().is_err());
    assert!("about".parse::<Page>().is_err());

    assert_eq!(Page::Tab(2).path(), "/page/tab2.html");
    assert_eq!(Page::IntroFcl.path(), "/page/introFcl.html");
}

#[test]
fn test_fragment_display() {
    assert_eq!(Fragment::Html("<div/>".to_string()).to_string(), "<div/>");
    let failed = Fragment::Failed("HTTP错误: 404".to_string());
    assert!(failed.is_failed());
    assert_eq!(failed.to_string(), "获取 HTML 内容：HTTP错误: 404");
}

#[test]
fn test_site_client_joins_paths() {
    let site = SiteClient::new("https://fcl.example/mirror/").unwrap();
    assert_eq!(
        site.url("/page/tab1.html").unwrap(),
        "https://fcl.example/page/tab1.html"
    );
    assert_eq!(
        site.url("data/down/root.json").unwrap(),
        "https://fcl.example/mirror/data/down/root.json"
    );
    assert_eq!(site.url("https://other/x").unwrap(), "https://other/x");
    assert!(SiteClient::new("not a url").is_err());
}

#[test]
fn test_traffic_from_tree() {
    let tree: FileTree = serde_json::from_value(json!({"traffic": " 12 "})).unwrap();
    assert_eq!(Traffic::from_tree(&tree).to_string(), "12GiB");

    let tree: FileTree = serde_json::from_value(json!({"traffic": 7})).unwrap();
    assert_eq!(Traffic::from_tree(&tree), Traffic::Used("7".to_string()));

    let tree: FileTree = serde_json::from_value(json!({})).unwrap();
    assert!(Traffic::from_tree(&tree).is_failed());
}
