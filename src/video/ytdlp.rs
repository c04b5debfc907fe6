//! Search and audio retrieval by shelling out to `yt-dlp`.
//!
//! Transcoding to MP3 needs `ffmpeg` on the PATH as well; yt-dlp calls it
//! for the `--extract-audio` post-processing step.
//!
//! Install:
//! - Windows: `winget install yt-dlp.yt-dlp` (pulls in ffmpeg)
//! - macOS: `brew install yt-dlp ffmpeg`
//! - Linux: `pipx install yt-dlp` plus your distribution's ffmpeg

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use super::dto::VideoInfo;
use super::{AudioRetriever, VideoError, VideoSearch, to_candidate};
use crate::download::DownloadError;
use crate::model::TrackCandidate;

/// Base name of the file yt-dlp writes into the scratch directory
const OUTPUT_STEM: &str = "audio";

static PROGRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[download\]\s+(\d+(?:\.\d+)?)%").unwrap());

/// The `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlp {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// yt-dlp version string (for diagnostics)
    pub async fn version(&self) -> Option<String> {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    }

    async fn dump_json(&self, target: &str, flat: bool) -> Result<String, VideoError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--dump-json").arg("--no-warnings");
        if flat {
            cmd.arg("--flat-playlist");
        }
        cmd.arg("--").arg(target);

        let output = cmd.output().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VideoError::ToolMissing(self.program.clone()),
            _ => VideoError::Failed(format!("Failed to run {}: {}", self.program, e)),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VideoError::Failed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VideoSearch for YtDlp {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<TrackCandidate>, VideoError> {
        let target = format!("ytsearch{}:{}", limit.max(1), query);
        tracing::info!("Searching: {}", target);

        let stdout = self.dump_json(&target, true).await?;
        let candidates = parse_search_output(&stdout);

        tracing::info!("Search returned {} result(s)", candidates.len());
        Ok(candidates)
    }

    async fn fetch_info(&self, locator: &str) -> Result<TrackCandidate, VideoError> {
        let stdout = self.dump_json(locator, false).await?;
        let line = stdout
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| VideoError::NotFound(locator.to_string()))?;

        serde_json::from_str::<VideoInfo>(line)
            .map(to_candidate)
            .map_err(|e| VideoError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AudioRetriever for YtDlp {
    async fn retrieve(
        &self,
        locator: &str,
        dir: &Path,
        bitrate_kbps: u32,
        progress: Option<mpsc::UnboundedSender<f32>>,
    ) -> Result<PathBuf, DownloadError> {
        let template = dir.join(format!("{}.%(ext)s", OUTPUT_STEM));

        let mut child = Command::new(&self.program)
            .args(["-f", "bestaudio/best", "-x", "--audio-format", "mp3"])
            .arg("--audio-quality")
            .arg(format!("{}K", bitrate_kbps))
            .args(["--newline", "--no-playlist", "--no-warnings", "-o"])
            .arg(&template)
            .arg("--")
            .arg(locator)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DownloadError::StreamResolution(format!("Failed to run {}: {}", self.program, e))
            })?;

        // Drain stderr concurrently so a chatty process can't block on a full pipe
        let stderr_task = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = String::new();
                let _ = stderr.read_to_string(&mut buf).await;
                buf
            })
        });

        if let Some(stdout) = child.stdout.take() {
            forward_progress(stdout, progress.as_ref()).await;
        }

        let status = child
            .wait()
            .await
            .map_err(|e| DownloadError::StreamResolution(e.to_string()))?;
        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        if !status.success() {
            return Err(classify_failure(stderr.trim()));
        }

        let output = dir.join(format!("{}.mp3", OUTPUT_STEM));
        if !output.exists() {
            return Err(DownloadError::Transcode(format!(
                "yt-dlp finished but {} was not produced",
                output.display()
            )));
        }
        Ok(output)
    }
}

/// Candidates from `--dump-json --flat-playlist` output, one JSON object per
/// line. Lines that don't parse are skipped.
pub fn parse_search_output(stdout: &str) -> Vec<TrackCandidate> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| match serde_json::from_str::<VideoInfo>(line) {
            Ok(info) => Some(to_candidate(info)),
            Err(e) => {
                tracing::debug!("Skipping unparseable search entry: {}", e);
                None
            }
        })
        .collect()
}

/// Read yt-dlp's stdout to the end, sending every progress percentage.
///
/// Lines are read as raw bytes: file names in the output need not be UTF-8,
/// and the pipe must be drained either way.
async fn forward_progress<R: AsyncRead + Unpin>(reader: R, progress: Option<&mpsc::UnboundedSender<f32>>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if let Some(pct) = parse_progress(&line) {
                    tracing::trace!("Download progress {:.1}%", pct);
                    if let Some(tx) = progress {
                        let _ = tx.send(pct);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Stopped reading yt-dlp output: {}", e);
                break;
            }
        }
    }
}

/// Percentage from a `[download]  42.0% of ...` line.
pub fn parse_progress(line: &str) -> Option<f32> {
    PROGRESS
        .captures(line.trim_start())
        .and_then(|c| c[1].parse().ok())
}

/// Post-processing failures mean ffmpeg; anything earlier is the stream.
fn classify_failure(stderr: &str) -> DownloadError {
    let lower = stderr.to_lowercase();
    if lower.contains("postprocessing") || lower.contains("ffmpeg") || lower.contains("ffprobe") {
        DownloadError::Transcode(stderr.to_string())
    } else {
        DownloadError::StreamResolution(stderr.to_string())
    }
}
