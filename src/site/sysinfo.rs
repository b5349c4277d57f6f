// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compatibility notices derived from a user agent.
//!
//! ```text
//! UA --parse--> Environment { os, os_version, arch, browser }
//!                     |
//!                     v
//! notices():  not Android            -> Error
//!             Android < 9            -> Error
//!             arch known / unknown   -> Ok / Info
//!             uncommon browser       -> Warn
//!             vivo browser           -> Error
//!             WeChat / QQ webview    -> Error
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Browsers that hand downloads over untouched.
const COMMON_BROWSERS: &[&str] = &[
    "Chrome",
    "Mobile Chrome",
    "Firefox",
    "Mobile Firefox",
    "Edge",
    "Opera",
];

/// Browser detection, first match wins.
const BROWSERS: &[(&str, &str)] = &[
    (r"(?i)micromessenger", "WeChat"),
    (r"(?i)vivobrowser", "Vivo Browser"),
    (r"(?i)mqqbrowser", "QQBrowser"),
    (r"(?i)ucbrowser", "UCBrowser"),
    (r"(?i)samsungbrowser", "Samsung Browser"),
    (r"(?i)miuibrowser", "MIUI Browser"),
    (r"(?i)heytapbrowser", "HeyTap"),
    (r"(?i)huaweibrowser", "Huawei Browser"),
    (r"(?i)\bedg(?:e|a|ios)?/", "Edge"),
    (r"(?i)\bopr/|\bopera\b", "Opera"),
    (r"(?i)firefox/", "Firefox"),
    (r"(?i); wv\)", "Chrome WebView"),
    (r"(?i)chrome/", "Chrome"),
    (r"(?i)safari/", "Safari"),
];

const ARCH_HINTS: &[(&str, &str)] = &[
    (r"(?i)aarch64|arm64|armv8", "请选择通用架构或“arm64-v8a”架构。"),
    (r"(?i)armeabi-v7a|arm$|armv7", "请选择通用架构或“armeabi-v7a”架构。"),
    (r"(?i)x86_64|x64|amd64", "请选择通用架构或“x86_64”架构。"),
    (r"(?i)x86|i[36]86", "请选择通用架构或“x86”架构。"),
];

pub const NOT_ANDROID: &str = "当前系统不是安卓系统，无法运行。";
pub const ANDROID_TOO_OLD: &str = "当前系统版本过低，无法运行。";
pub const GENERIC_ARCH: &str = "请选择通用架构。";
pub const UNCOMMON_BROWSER: &str =
    "当前浏览器不是常用浏览器。部分浏览器会识别下载内容并引流至下载其它软件。";
pub const VIVO_BROWSER: &str = "vivo品牌手机自带浏览器会识别下载内容并引流至下载其它软件。";
pub const OPEN_IN_BROWSER: &str = "请复制网址到浏览器中打开！";

fn compile(table: &'static [(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    table
        .iter()
        .filter_map(|(pattern, label)| Regex::new(pattern).ok().map(|re| (re, *label)))
        .collect()
}

fn browsers() -> &'static [(Regex, &'static str)] {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| compile(BROWSERS))
}

fn arch_hints() -> &'static [(Regex, &'static str)] {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| compile(ARCH_HINTS))
}

fn android_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)android(?:[\s/-]?(\d+)(?:\.\d+)*)?").ok())
        .as_ref()
}

fn cpu_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)\b(aarch64|arm64|armv8l?|armv7l?|armeabi-v7a",
            r"|x86_64|amd64|x64|wow64|win64|i[3-6]86|x86)\b",
        ))
        .ok()
    })
    .as_ref()
}

/// What a user agent says about the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub user_agent: String,
    pub android: bool,
    /// Major Android version, when present.
    pub android_version: Option<u32>,
    /// CPU architecture from the UA, else the supplied platform string.
    pub arch: Option<String>,
    pub browser: Option<&'static str>,
    pub qq_webview: bool,
}

impl Environment {
    /// Parse `user_agent`; `platform` stands in when the UA has no CPU token.
    #[must_use]
    pub fn parse(user_agent: &str, platform: Option<&str>) -> Self {
        let android_caps = android_re().and_then(|re| re.captures(user_agent));
        let android_version = android_caps
            .as_ref()
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());

        let arch = cpu_re()
            .and_then(|re| re.find(user_agent))
            .map(|m| match m.as_str().to_ascii_lowercase().as_str() {
                "wow64" | "win64" => "amd64".to_string(),
                other => other.to_string(),
            })
            .or_else(|| platform.filter(|p| !p.is_empty()).map(str::to_string));

        let mobile = user_agent.contains("Mobile") || user_agent.contains("Android");
        let browser = browsers()
            .iter()
            .find(|(re, _)| re.is_match(user_agent))
            .map(|(_, name)| match *name {
                "Chrome" if mobile => "Mobile Chrome",
                "Firefox" if mobile => "Mobile Firefox",
                "Safari" if mobile => "Mobile Safari",
                other => other,
            });

        Self {
            user_agent: user_agent.to_string(),
            android: android_caps.is_some(),
            android_version,
            arch,
            browser,
            qq_webview: is_qq_webview(user_agent),
        }
    }
}

/// Android QQ's in-app webview.
#[must_use]
pub fn is_qq_webview(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    ua.contains("android") && ua.contains("qqtheme") && ua.contains("qq/") && ua.contains("wv")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Ok,
    Warn,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.severity {
            Severity::Info => "i",
            Severity::Ok => "✓",
            Severity::Warn => "!",
            Severity::Error => "✗",
        };
        write!(f, "[{icon}] {}", self.message)
    }
}

/// Notices for `env`, starting with the raw user agent.
#[must_use]
pub fn notices(env: &Environment) -> Vec<Notice> {
    let mut out = vec![Notice::new(Severity::Info, env.user_agent.clone())];

    if !env.android {
        out.push(Notice::new(Severity::Error, NOT_ANDROID));
    } else if env.android_version.is_some_and(|v| v < 9) {
        out.push(Notice::new(Severity::Error, ANDROID_TOO_OLD));
    } else if let Some(arch) = &env.arch {
        match arch_hints().iter().find(|(re, _)| re.is_match(arch)) {
            Some((_, hint)) => out.push(Notice::new(Severity::Ok, *hint)),
            None => out.push(Notice::new(Severity::Info, GENERIC_ARCH)),
        }
    }

    if !env.browser.is_some_and(|b| COMMON_BROWSERS.contains(&b)) {
        out.push(Notice::new(Severity::Warn, UNCOMMON_BROWSER));
    }
    if env.browser == Some("Vivo Browser") {
        out.push(Notice::new(Severity::Error, VIVO_BROWSER));
    }
    if env.browser == Some("WeChat") || env.qq_webview {
        out.push(Notice::new(Severity::Error, OPEN_IN_BROWSER));
    }
    out
}

/// Worst severity among `notices`.
#[must_use]
pub fn overall(notices: &[Notice]) -> Severity {
    notices
        .iter()
        .map(|n| n.severity)
        .max()
        .unwrap_or(Severity::Info)
}
