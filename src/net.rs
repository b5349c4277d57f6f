// fcl-mirror: FCL download mirror front end
//
// SPDX-FileCopyrightText: 2026 fcl-mirror contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP access: manifest/text fetches and file downloads.
//!
//! ```text
//! Downloader::new()
//!   .url() .file() .header()
//!   .progress() .silent()
//!        |
//!        +-------------+--------------+
//!        v             v              v
//!   download()   download_json()  download_string()
//!        |
//!        v
//!   Progress display
//!     Bar     [=====>     ] 50MB/100MB
//!     Spinner * 50MB @ 5MB/s
//!     Silent  (none)
//!
//! Global client: OnceLock, connection pool, keep-alive
//! Interruption:  AtomicBool -> cleanup partial -> Interrupted
//! ```

use crate::error::{FclResult, NetworkError};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Removes a partial download on drop unless kept.
struct PartialFileGuard {
    path: PathBuf,
    keep: bool,
}

impl PartialFileGuard {
    const fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    const fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Shared HTTP client: initialized once, reused by every fetch.
/// Falls back to a basic client if custom configuration fails.
#[must_use]
pub fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("fcl-mirror/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} @ {binary_bytes_per_sec} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {bytes} @ {binary_bytes_per_sec}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Progress display style for downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressDisplay {
    /// Progress bar with speed and ETA
    #[default]
    Bar,
    /// Spinner, for unknown sizes
    Spinner,
    /// No visual progress
    Silent,
}

/// Async HTTP fetcher/downloader with builder pattern.
///
/// # Example
/// ```ignore
/// use fcl_mirror::net::Downloader;
///
/// let items: serde_json::Value = Downloader::new()
///     .url("https://example.com/data/down/root.json")
///     .download_json()
///     .await?;
/// ```
pub struct Downloader {
    client: Client,
    url: Option<String>,
    output_file: Option<PathBuf>,
    headers: Vec<(String, String)>,
    interrupt: Arc<AtomicBool>,
    progress_display: ProgressDisplay,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// Create a new downloader on the shared client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(global_client().clone())
    }

    /// Create a new downloader on a specific client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            url: None,
            output_file: None,
            headers: Vec::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
            progress_display: ProgressDisplay::default(),
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn progress(mut self, style: ProgressDisplay) -> Self {
        self.progress_display = style;
        self
    }

    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.progress_display = ProgressDisplay::Silent;
        self
    }

    /// Handle to the interrupt flag. Set it to abort an in-progress download.
    #[must_use]
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    fn create_progress_bar(&self, total_size: u64) -> Option<ProgressBar> {
        match self.progress_display {
            ProgressDisplay::Silent => None,
            ProgressDisplay::Bar if total_size > 0 => {
                let pb = ProgressBar::new(total_size);
                pb.set_style(bar_style());
                Some(pb)
            }
            ProgressDisplay::Bar | ProgressDisplay::Spinner => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(spinner_style());
                Some(pb)
            }
        }
    }

    fn require_url(&self) -> Result<&String, NetworkError> {
        self.url
            .as_ref()
            .ok_or_else(|| NetworkError::InvalidUrl("no URL provided".to_string()))
    }

    /// Sends the GET request and rejects non-2xx responses.
    async fn send(&self, url: &str) -> Result<Response, NetworkError> {
        debug!(url, "GET");
        let mut request = self.client.get(url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(NetworkError::from_status(response.status(), url));
        }
        Ok(response)
    }

    /// Download to the configured file, showing progress.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No URL or output file is configured.
    /// - The network request fails or returns a non-success status code.
    /// - Parent directories or the output file cannot be created or written.
    /// - The download is interrupted.
    pub async fn download(&self) -> FclResult<()> {
        let url = self.require_url()?;
        let output = self
            .output_file
            .as_ref()
            .ok_or_else(|| NetworkError::DownloadFailed {
                url: url.clone(),
                message: "no output file specified".to_string(),
            })?;

        let response = self.send(url).await?;

        let total_size = response.content_length().unwrap_or(0);
        let progress_bar = self.create_progress_bar(total_size);

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!(
                        "failed to create parent directory {}: {}",
                        parent.display(),
                        e
                    ),
                })?;
        }

        let mut file =
            tokio::fs::File::create(output)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!("failed to create output file {}: {}", output.display(), e),
                })?;

        let mut guard = PartialFileGuard::new(output.clone());

        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            if self.interrupt.load(Ordering::Relaxed) {
                if let Some(pb) = &progress_bar {
                    pb.abandon_with_message("interrupted");
                }
                return Err(NetworkError::Interrupted.into());
            }

            let chunk = chunk.map_err(NetworkError::Reqwest)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| NetworkError::DownloadFailed {
                    url: url.clone(),
                    message: format!("failed to write to {}: {}", output.display(), e),
                })?;

            if let Some(pb) = &progress_bar {
                pb.inc(chunk.len() as u64);
            }
        }

        file.flush()
            .await
            .map_err(|e| NetworkError::DownloadFailed {
                url: url.clone(),
                message: format!("failed to flush {}: {}", output.display(), e),
            })?;

        guard.keep();

        if let Some(pb) = progress_bar {
            pb.finish_with_message("done");
        }

        Ok(())
    }

    /// Fetch the body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, returns a non-success status
    /// code, or is interrupted.
    pub async fn download_string(&self) -> Result<String, NetworkError> {
        let url = self.require_url()?;
        let response = self.send(url).await?;

        if self.interrupt.load(Ordering::Relaxed) {
            return Err(NetworkError::Interrupted);
        }

        Ok(response.text().await?)
    }

    /// Fetch the body and decode it as JSON.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::Parse` when the body does not decode as `T`, in
    /// addition to the errors of [`Downloader::download_string`].
    pub async fn download_json<T: DeserializeOwned>(&self) -> Result<T, NetworkError> {
        let url = self.require_url()?;
        let text = self.download_string().await?;
        serde_json::from_str(&text).map_err(|e| NetworkError::Parse {
            url: url.clone(),
            message: e.to_string(),
        })
    }
}
