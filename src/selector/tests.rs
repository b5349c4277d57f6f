// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::{Value, json};
use tokio::sync::Notify;

use super::adapter::{Adapter, transform_lemwood, transform_way2old};
use super::board::{Board, DescriptionBlock, DescriptionPane, PLACEHOLDER, SlotContent};
use super::cooldown::cooldown_label;
use super::item::{ApiVer, Children, ManifestSource, Next, SelectorItem, is_terminal_level};
use super::latest::{
    LatestCache, LatestResolver, PayloadOnly, github_repo, lemwood_code, parse_latest_body,
};
use super::view::{build_select, download_caption};
use super::{Click, DownloadButton, ManifestFetcher, Selector, SelectorHooks};
use crate::error::{NetworkError, SelectorError};

// =============================================================================
// Fakes
// =============================================================================

#[derive(Default)]
struct FakeFetcher {
    json: HashMap<String, Value>,
    text: HashMap<String, String>,
}

impl FakeFetcher {
    fn with_json(mut self, url: &str, value: Value) -> Self {
        self.json.insert(url.to_string(), value);
        self
    }

    fn with_text(mut self, url: &str, body: &str) -> Self {
        self.text.insert(url.to_string(), body.to_string());
        self
    }

    fn not_found(url: &str) -> SelectorError {
        SelectorError::Network(NetworkError::HttpError {
            status: 404,
            status_text: "Not Found".to_string(),
            url: url.to_string(),
        })
    }
}

impl ManifestFetcher for FakeFetcher {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, SelectorError>> {
        let result = self.json.get(url).cloned().ok_or_else(|| Self::not_found(url));
        Box::pin(async move { result })
    }

    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, SelectorError>> {
        let result = self.text.get(url).cloned().ok_or_else(|| Self::not_found(url));
        Box::pin(async move { result })
    }
}

/// Blocks JSON fetches of one URL until released.
struct GatedFetcher {
    inner: FakeFetcher,
    gate: String,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl ManifestFetcher for GatedFetcher {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, SelectorError>> {
        Box::pin(async move {
            if url == self.gate {
                self.entered.notify_one();
                self.release.notified().await;
            }
            self.inner.fetch_json(url).await
        })
    }

    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, SelectorError>> {
        self.inner.fetch_text(url)
    }
}

#[derive(Default)]
struct CountingResolver {
    answer: Option<String>,
    lookups: AtomicUsize,
}

impl LatestResolver for CountingResolver {
    fn lookup<'a>(&'a self, _: ApiVer, _: Option<&'a str>) -> BoxFuture<'a, Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let answer = self.answer.clone();
        Box::pin(async move { answer })
    }
}

fn selector(fetcher: FakeFetcher) -> Selector {
    Selector::builder()
        .fetcher(Arc::new(fetcher))
        .cooldown(Duration::ZERO)
        .build()
}

fn items(value: Value) -> Vec<SelectorItem> {
    serde_json::from_value(value).unwrap()
}

fn button_labels(selector: &Selector, level: usize) -> Vec<String> {
    selector.with_board(|board| match &board.slot(level).unwrap().content {
        SlotContent::Downloads(buttons) => buttons.iter().map(|b| b.label()).collect(),
        other => panic!("level {level} is not downloads: {other:?}"),
    })
}

fn selected(selector: &Selector, level: usize) -> Option<String> {
    selector.with_board(|board| board.selected_name(level).map(str::to_string))
}

// =============================================================================
// Items
// =============================================================================

#[test]
fn test_item_lenient_fields() {
    let item: SelectorItem = serde_json::from_value(json!({
        "name": "FCL",
        "apiVer": "Way3new",
        "default": "true",
        "children": "not-a-list",
        "type": "启动器"
    }))
    .unwrap();
    assert_eq!(item.api_ver, None);
    assert!(!item.default);
    assert!(item.children.is_none());
    assert_eq!(item.group.as_deref(), Some("启动器"));
}

#[test]
fn test_next_precedence() {
    let item: SelectorItem = serde_json::from_value(json!({
        "name": "both",
        "children": [],
        "nextUrl": "/x.json",
        "url": "https://d/x"
    }))
    .unwrap();
    // an empty children list still wins
    assert!(matches!(item.next(), Next::Children { subtree, .. } if subtree.is_empty()));

    let remote: SelectorItem =
        serde_json::from_value(json!({"nextUrl": "/x.json", "apiVer": "Lemwood"})).unwrap();
    assert!(matches!(
        remote.next(),
        Next::Remote { url: "/x.json", api_ver: Some(ApiVer::Lemwood) }
    ));

    let leaf = SelectorItem::leaf("a", "https://d/a");
    assert!(matches!(leaf.next(), Next::Leaf(_)));
    assert!(matches!(SelectorItem::default().next(), Next::Nothing));
}

#[test]
fn test_terminal_level_rule() {
    assert!(is_terminal_level(&[]));
    assert!(is_terminal_level(&items(json!([
        {"name": "a", "url": "https://d/a"},
        {"name": "b", "url": "https://d/b", "children": []}
    ]))));
    assert!(!is_terminal_level(&items(json!([
        {"name": "a", "url": "https://d/a"},
        {"name": "b"}
    ]))));
    assert!(!is_terminal_level(&items(json!([
        {"name": "a", "url": "https://d/a", "nextUrl": "/more.json"}
    ]))));
}

#[test]
fn test_manifest_source_from_user_input() {
    assert_eq!(
        ManifestSource::from_user_input(" /data/down/root.json ").unwrap(),
        ManifestSource::Url("/data/down/root.json".to_string())
    );
    assert!(matches!(
        ManifestSource::from_user_input(r#"[{"name":"a"}]"#).unwrap(),
        ManifestSource::Inline(Value::Array(_))
    ));
    assert!(matches!(
        ManifestSource::from_user_input("[oops"),
        Err(SelectorError::Parse(_))
    ));
}

// =============================================================================
// Adapter
// =============================================================================

#[test]
fn test_way2old_directory_with_one_file() {
    let raw = json!({
        "latest": "1.2",
        "children": [{
            "type": "file",
            "arch": "x86_64",
            "download_link": "https://d/fcl-x86_64.apk"
        }]
    });
    let out = transform_way2old(&raw, Some("1.2"));
    assert_eq!(
        out,
        vec![SelectorItem {
            name: "x86_64 架构".to_string(),
            url: Some("https://d/fcl-x86_64.apk".to_string()),
            arch: Some("x86_64".to_string()),
            ..SelectorItem::default()
        }]
    );
}

#[test]
fn test_way2old_directories() {
    let raw = json!([
        {"type": "directory", "name": "1.1", "description": "", "children": []},
        {"type": "directory", "name": "1.2", "description": "新版", "children": [
            {"type": "file", "arch": "all", "download_link": "https://d/all.apk"}
        ]},
        {"type": "symlink", "name": "ignored"}
    ]);
    let out = transform_way2old(&raw, Some("1.2"));
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].description, None);
    assert!(!out[0].default);
    assert_eq!(out[0].children, Some(Children::Adapted(Vec::new())));
    assert!(out[1].default);
    assert_eq!(out[1].description.as_deref(), Some("新版"));
    let Some(Children::Adapted(files)) = &out[1].children else {
        panic!("expected adapted children");
    };
    assert_eq!(files[0].name, "all 架构");
}

#[test]
fn test_lemwood_transform() {
    let raw = [
        json!({"name": "v1", "assets": []}),
        json!({"name": "v2", "assets": [{"name": "zl.apk", "url": "https://d/zl.apk", "size": 1024}]}),
    ];
    let out = transform_lemwood(&raw, Some("v2"));
    assert!(!out[0].default);
    assert!(out[1].default);
    let Some(Children::Adapted(assets)) = &out[1].children else {
        panic!("expected adapted children");
    };
    assert_eq!(assets[0].download_url(), Some("https://d/zl.apk"));
    insta::assert_yaml_snapshot!(assets, @r#"
    - name: zl.apk
      url: "https://d/zl.apk"
      size: 1024
    "#);
}

#[tokio::test]
async fn test_adapt_shapes() {
    let adapter = Adapter::new(Arc::new(PayloadOnly));
    let mut cache = LatestCache::new();

    let wrapped = adapter
        .adapt(
            json!({"name": "v9", "assets": []}),
            Some(ApiVer::LemwoodLatest),
            None,
            &mut cache,
        )
        .await
        .unwrap();
    assert_eq!(wrapped.len(), 1);
    assert!(!wrapped[0].default);

    let err = adapter
        .adapt(json!({"name": "x"}), None, None, &mut cache)
        .await
        .unwrap_err();
    assert!(matches!(err, SelectorError::NotAnArray));

    let err = adapter
        .adapt(json!({"v": 1}), Some(ApiVer::Lemwood), None, &mut cache)
        .await
        .unwrap_err();
    assert!(matches!(err, SelectorError::NotAnArray));
}

#[tokio::test]
async fn test_latest_lookup_cached_per_pass() {
    let resolver = Arc::new(CountingResolver {
        answer: Some("1.1".to_string()),
        ..CountingResolver::default()
    });
    let adapter = Adapter::new(resolver.clone());
    let raw = json!({"latest": "1.2", "children": [
        {"type": "directory", "name": "1.1", "children": []},
        {"type": "directory", "name": "1.2", "children": []}
    ]});

    let mut cache = LatestCache::new();
    for _ in 0..3 {
        let out = adapter
            .adapt(raw.clone(), Some(ApiVer::Way2old), Some("FCL"), &mut cache)
            .await
            .unwrap();
        // resolver answer beats the payload field
        assert!(out[0].default);
    }
    assert_eq!(resolver.lookups.load(Ordering::SeqCst), 1);

    let mut next_pass = LatestCache::new();
    adapter
        .adapt(raw, Some(ApiVer::Way2old), Some("FCL"), &mut next_pass)
        .await
        .unwrap();
    assert_eq!(resolver.lookups.load(Ordering::SeqCst), 2);
}

#[test]
fn test_latest_tables() {
    assert_eq!(github_repo("Fold Craft Launcher"), "FCL-Team/FoldCraftLauncher");
    assert_eq!(github_repo("owner/repo"), "owner/repo");
    assert_eq!(lemwood_code("Vulkan 驱动"), Some("FCL_Turnip"));
    assert_eq!(lemwood_code("渲染器"), Some("MG"));
    assert_eq!(lemwood_code("Pojav"), None);
    assert_eq!(parse_latest_body(" 1.2.3\n"), Some("1.2.3".to_string()));
    assert_eq!(parse_latest_body(r#"{"name":"v5"}"#), Some("v5".to_string()));
    assert_eq!(parse_latest_body("  "), None);
}

// =============================================================================
// View
// =============================================================================

#[test]
fn test_download_captions() {
    assert_eq!(download_caption("arm64-v8a 架构"), "下载 arm64-v8a 架构");
    assert_eq!(download_caption("all 架构"), "下载 通用架构");
    assert_eq!(download_caption(""), "下载 文件");
}

#[test]
fn test_select_groups_by_type() {
    let control = build_select(&items(json!([
        {"name": "FCL", "type": "启动器"},
        {"name": ""},
        {"name": "ZL", "type": "启动器"}
    ])));
    assert_eq!(control.groups.len(), 2);
    assert_eq!(control.groups[0].label.as_deref(), Some("启动器"));
    let labels: Vec<_> = control.options().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["FCL", "ZL", "(无名称)"]);
    assert_eq!(control.groups[0].options[1].index, 2);
}

// =============================================================================
// Cascade
// =============================================================================

#[tokio::test]
async fn test_children_cascade_to_buttons() {
    let selector = selector(FakeFetcher::default());
    selector
        .load(ManifestSource::Inline(json!([
            {"name": "Win", "children": [{"name": "x64", "url": "https://d/x64.zip"}]}
        ])))
        .await;

    assert_eq!(selected(&selector, 0).as_deref(), Some("Win"));
    assert_eq!(button_labels(&selector, 1), ["下载 x64"]);
    selector.with_board(|board| {
        assert_eq!(board.depth(), 2);
        let SlotContent::Selection { control, .. } = &board.slot(0).unwrap().content else {
            panic!("expected selection");
        };
        assert!(!control.disabled);
    });
}

#[tokio::test]
async fn test_all_url_root_renders_buttons() {
    let selector = selector(FakeFetcher::default());
    selector
        .load(ManifestSource::Inline(json!([
            {"name": "a", "url": "https://d/a"},
            {"name": "all 架构", "url": "https://d/all"},
            {"name": "b", "url": ""}
        ])))
        .await;
    // "b" has an empty url, so the level is not terminal
    assert!(selector.with_board(|b| matches!(
        b.slot(0).unwrap().content,
        SlotContent::Selection { .. }
    )));

    selector
        .load(ManifestSource::Inline(json!([
            {"name": "a", "url": "https://d/a"},
            {"name": "all 架构", "url": "https://d/all"}
        ])))
        .await;
    assert_eq!(button_labels(&selector, 0), ["下载 a", "下载 通用架构"]);
}

#[tokio::test]
async fn test_empty_list_renders_no_buttons() {
    let selector = selector(FakeFetcher::default());
    selector.load(ManifestSource::Inline(json!([]))).await;
    assert!(button_labels(&selector, 0).is_empty());
}

#[tokio::test]
async fn test_default_item_auto_selected() {
    let selector = selector(FakeFetcher::default());
    selector
        .load(ManifestSource::Inline(json!([
            {"name": "A", "children": []},
            {"name": "B", "default": true, "children": []}
        ])))
        .await;
    assert_eq!(selected(&selector, 0).as_deref(), Some("B"));
}

#[tokio::test]
async fn test_first_of_several_defaults_wins() {
    let selector = selector(FakeFetcher::default());
    selector
        .load(ManifestSource::Inline(json!([
            {"name": "A", "children": []},
            {"name": "B", "default": true, "children": []},
            {"name": "C", "default": true, "children": []}
        ])))
        .await;
    assert_eq!(selected(&selector, 0).as_deref(), Some("B"));
}

fn control_disabled(board: &Board, level: usize) -> bool {
    match &board.slot(level).unwrap().content {
        SlotContent::Selection { control, .. } => control.disabled,
        other => panic!("level {level} is not a selection: {other:?}"),
    }
}

#[tokio::test]
async fn test_rendered_control_is_held_until_pass_ends() {
    let mut board = Board::new();
    let root = board.reset();
    let level = items(json!([{"name": "a", "children": []}]));
    let control = build_select(&level);
    let slot = board
        .commit_held_selection(root, control, DescriptionPane::default(), level)
        .unwrap();
    assert_eq!(board.slot(0).unwrap().slot_ref(), slot);
    assert!(control_disabled(&board, 0));

    let selector = selector(FakeFetcher::default());
    selector
        .load(ManifestSource::Inline(json!([{"name": "a", "children": []}])))
        .await;
    assert!(!selector.with_board(|board| control_disabled(board, 0)));
    selector.select(0, 0).await.unwrap();
}

#[test]
fn test_truncation_is_idempotent() {
    let mut board = Board::new();
    let root = board.reset();
    let top = board.commit(root, SlotContent::Downloads(vec![])).unwrap();
    let below = board.anchor_below(top);
    board.commit(below, SlotContent::Downloads(vec![])).unwrap();
    assert_eq!(board.depth(), 2);

    assert!(board.clear_from(below));
    let once = board.slots().to_vec();
    assert!(board.clear_from(below));
    assert_eq!(board.slots(), once.as_slice());
    assert_eq!(board.depth(), 1);

    assert!(board.clear_from(root));
    assert!(board.clear_from(root));
    assert_eq!(board.depth(), 0);
}

#[tokio::test]
async fn test_fetch_failure_renders_inline_error() {
    let selector = selector(FakeFetcher::default());
    selector.load("/data/down/missing.json").await;
    let line = selector.with_board(|board| match &board.slot(0).unwrap().content {
        SlotContent::Error(line) => line.to_string(),
        other => panic!("expected error, got {other:?}"),
    });
    assert!(line.starts_with("出错："), "{line}");
    assert!(line.contains("HTTP 404"), "{line}");
}

#[tokio::test]
async fn test_non_array_manifest_is_an_error() {
    let fetcher = FakeFetcher::default().with_json("/root.json", json!({"name": "x"}));
    let selector = selector(fetcher);
    selector.load("/root.json").await;
    assert!(selector.render().contains("出错：返回数据不是数组"));
}

#[tokio::test]
async fn test_placeholder_and_descriptions() {
    let fetcher = FakeFetcher::default().with_text("/desc.html", "<p>说明</p>");
    let selector = selector(fetcher);
    selector
        .load(ManifestSource::Inline(json!([
            {"name": "empty", "children": []},
            {"name": "bare"},
            {"name": "described", "description": "inline", "descriptionUrl": "/desc.html"}
        ])))
        .await;

    selector.select(0, 1).await.unwrap();
    let blocks = selector.with_board(|board| match &board.slot(0).unwrap().content {
        SlotContent::Selection { description, .. } => description.blocks.clone(),
        _ => Vec::new(),
    });
    assert_eq!(blocks, [DescriptionBlock::Placeholder]);
    assert_eq!(DescriptionBlock::Placeholder.to_string(), PLACEHOLDER);
    assert_eq!(selector.with_board(|b| b.depth()), 1);

    selector.select_by_name(0, "described").await.unwrap();
    let blocks = selector.with_board(|board| match &board.slot(0).unwrap().content {
        SlotContent::Selection { description, .. } => description.blocks.clone(),
        _ => Vec::new(),
    });
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0], DescriptionBlock::Text("inline".to_string()));
    assert!(matches!(&blocks[1], DescriptionBlock::Fetched { content, .. } if content == "<p>说明</p>"));
}

#[tokio::test]
async fn test_way2old_via_next_url() {
    let fetcher = FakeFetcher::default()
        .with_json(
            "/root.json",
            json!([{"name": "Fold Craft Launcher", "nextUrl": "/fcl.json", "apiVer": "Way2old"}]),
        )
        .with_json(
            "/fcl.json",
            json!({"latest": "1.2", "children": [
                {"type": "directory", "name": "1.1", "children": [
                    {"type": "file", "arch": "armeabi-v7a", "download_link": "https://d/11.apk"}
                ]},
                {"type": "directory", "name": "1.2", "description": "新版", "children": [
                    {"type": "file", "arch": "arm64-v8a", "download_link": "https://d/arm64.apk"},
                    {"type": "file", "arch": "all", "download_link": "https://d/all.apk"}
                ]}
            ]}),
        );
    let selector = selector(fetcher);
    selector.load("/root.json").await;

    assert_eq!(selected(&selector, 1).as_deref(), Some("1.2"));
    assert_eq!(
        button_labels(&selector, 2),
        ["下载 arm64-v8a 架构", "下载 通用架构"]
    );

    selector.select(1, 0).await.unwrap();
    assert_eq!(button_labels(&selector, 2), ["下载 armeabi-v7a 架构"]);
}

#[tokio::test]
async fn test_lemwood_uses_latest_endpoint() {
    let fetcher = FakeFetcher::default()
        .with_json(
            "/root.json",
            json!([{"name": "Zalith Launcher", "nextUrl": "/zl.json", "apiVer": "Lemwood"}]),
        )
        .with_json(
            "/zl.json",
            json!([
                {"name": "v1", "assets": [{"name": "old.apk", "url": "https://d/old.apk"}]},
                {"name": "v2", "assets": [{"name": "zl.apk", "url": "https://d/zl.apk", "size": 5}]}
            ]),
        )
        .with_text("https://mirror.lemwood.icu/api/latest/zl", "v2\n");
    let selector = selector(fetcher);
    selector.load("/root.json").await;

    assert_eq!(selected(&selector, 1).as_deref(), Some("v2"));
    assert_eq!(button_labels(&selector, 2), ["下载 zl.apk"]);
}

#[tokio::test]
async fn test_sized_buttons_render_readable_size() {
    let selector = selector(FakeFetcher::default());
    selector
        .load_tagged(
            ManifestSource::Inline(json!([
                {"name": "v2", "assets": [
                    {"name": "zl.apk", "url": "https://d/zl.apk", "size": 1_572_864},
                    {"name": "zl.txt", "url": "https://d/zl.txt"}
                ]}
            ])),
            Some(ApiVer::Lemwood),
        )
        .await;

    insta::assert_snapshot!(selector.render().trim_end(), @r"
    [0]
      > 0. v2
    [1]
      0. 下载 zl.apk  https://d/zl.apk  (1.5 MiB)
      1. 下载 zl.txt  https://d/zl.txt
    ");
}

#[tokio::test]
async fn test_selection_errors() {
    let selector = selector(FakeFetcher::default());
    selector
        .load(ManifestSource::Inline(json!([
            {"name": "Win", "children": [{"name": "x64", "url": "https://d/x64.zip"}]}
        ])))
        .await;

    assert!(matches!(
        selector.select(5, 0).await,
        Err(SelectorError::LevelNotFound { level: 5 })
    ));
    assert!(matches!(
        selector.select(0, 3).await,
        Err(SelectorError::OptionOutOfRange { level: 0, index: 3 })
    ));
    assert!(matches!(
        selector.select(1, 0).await,
        Err(SelectorError::NotASelection { level: 1 })
    ));
    assert!(matches!(
        selector.select_by_name(0, "Mac").await,
        Err(SelectorError::OptionNotFound { .. })
    ));
}

#[tokio::test]
async fn test_item_select_hook_stops_cascade() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let hooks = SelectorHooks {
        on_item_select: Some(Arc::new(move |item: &SelectorItem, level: usize| {
            record.lock().unwrap().push((item.name.clone(), level));
            item.name == "custom"
        })),
        ..SelectorHooks::default()
    };
    let selector = Selector::builder()
        .fetcher(Arc::new(FakeFetcher::default()))
        .hooks(hooks)
        .build();
    selector
        .load(ManifestSource::Inline(json!([
            {"name": "custom", "description": "handled", "children": [{"name": "x", "url": "https://d/x"}]}
        ])))
        .await;

    assert_eq!(*seen.lock().unwrap(), [("custom".to_string(), 0)]);
    assert!(selector.render().contains("handled"));
    assert_eq!(selector.with_board(|b| b.depth()), 1);
}

#[tokio::test]
async fn test_busy_control_rejects_second_change() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let fetcher = GatedFetcher {
        inner: FakeFetcher::default(),
        gate: "/slow.json".to_string(),
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
    };
    let selector = Arc::new(
        Selector::builder()
            .fetcher(Arc::new(fetcher))
            .build(),
    );
    selector
        .load(ManifestSource::Inline(json!([
            {"name": "fast", "children": []},
            {"name": "slow", "nextUrl": "/slow.json"}
        ])))
        .await;

    let worker = {
        let selector = Arc::clone(&selector);
        tokio::spawn(async move { selector.select(0, 1).await })
    };
    entered.notified().await;
    assert!(matches!(
        selector.select(0, 0).await,
        Err(SelectorError::Busy { level: 0 })
    ));

    release.notify_one();
    worker.await.unwrap().unwrap();
    // the gated fetch 404s; the control is usable again
    assert!(selector.render().contains("HTTP 404"));
    selector.select(0, 0).await.unwrap();
}

#[tokio::test]
async fn test_stale_results_are_dropped() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let fetcher = GatedFetcher {
        inner: FakeFetcher::default().with_json(
            "/slow.json",
            json!([{"name": "late", "url": "https://d/late"}]),
        ),
        gate: "/slow.json".to_string(),
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
    };
    let selector = Arc::new(Selector::builder().fetcher(Arc::new(fetcher)).build());

    let first = {
        let selector = Arc::clone(&selector);
        tokio::spawn(async move {
            selector
                .load(ManifestSource::Inline(json!([
                    {"name": "old", "nextUrl": "/slow.json"}
                ])))
                .await;
        })
    };
    entered.notified().await;

    selector
        .load(ManifestSource::Inline(json!([
            {"name": "new", "url": "https://d/new"}
        ])))
        .await;
    release.notify_one();
    first.await.unwrap();

    assert_eq!(button_labels(&selector, 0), ["下载 new"]);
    assert_eq!(selector.with_board(|b| b.depth()), 1);
}

// =============================================================================
// Cooldown
// =============================================================================

#[tokio::test]
async fn test_snapshot_is_detached_from_the_board() {
    let selector = selector(FakeFetcher::default());
    selector
        .load(ManifestSource::Inline(json!([{"name": "a", "url": "https://d/a"}])))
        .await;

    let before = selector.snapshot();
    // the lock is free while a snapshot is held
    assert_eq!(selector.render(), before.to_string());
    assert!(matches!(selector.click(0, 0).unwrap(), Click::Accepted(_)));
    selector.load(ManifestSource::Inline(json!([]))).await;

    assert_eq!(before.depth(), 1);
    assert_eq!(before.to_string().trim_end(), "[0]\n  0. 下载 a  https://d/a");
}

#[tokio::test(start_paused = true)]
async fn test_click_cooldown_counts_down() {
    let selector = Selector::builder()
        .fetcher(Arc::new(FakeFetcher::default()))
        .cooldown(Duration::from_secs(10))
        .build();
    selector
        .load(ManifestSource::Inline(json!([{"name": "a", "url": "https://d/a"}])))
        .await;

    let Click::Accepted(button) = selector.click(0, 0).unwrap() else {
        panic!("first click must be accepted");
    };
    assert_eq!(button.url, "https://d/a");
    assert_eq!(button_labels(&selector, 0), ["请勿重复点击：10秒"]);
    assert_eq!(
        selector.click(0, 0).unwrap(),
        Click::CoolingDown { remaining: 10 }
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
    let mut seen = vec![button_labels(&selector, 0).remove(0)];
    for _ in 0..9 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        seen.push(button_labels(&selector, 0).remove(0));
    }
    let expected: Vec<String> = (1..=10).rev().map(cooldown_label).collect();
    assert_eq!(seen, expected);
    assert_eq!(seen.last().map(String::as_str), Some("请勿重复点击：1秒"));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(button_labels(&selector, 0), ["下载 a"]);
    assert!(matches!(selector.click(0, 0).unwrap(), Click::Accepted(_)));
}

#[tokio::test]
async fn test_zero_cooldown_never_disables() {
    let downloads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&downloads);
    let selector = Selector::builder()
        .fetcher(Arc::new(FakeFetcher::default()))
        .cooldown(Duration::ZERO)
        .hooks(SelectorHooks {
            on_download: Some(Arc::new(move |_: &DownloadButton| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
            ..SelectorHooks::default()
        })
        .build();
    selector
        .load(ManifestSource::Inline(json!([{"name": "a", "url": "https://d/a"}])))
        .await;
    for _ in 0..3 {
        assert!(matches!(selector.click(0, 0).unwrap(), Click::Accepted(_)));
    }
    assert_eq!(downloads.load(Ordering::SeqCst), 3);
    assert!(matches!(
        selector.click(0, 4),
        Err(SelectorError::ButtonNotFound { level: 0, index: 4 })
    ));
}
