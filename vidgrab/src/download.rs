use std::path::{Path, PathBuf};

use serde::Deserialize;
use yt_dlp::{Container, DownloadOptions, OutputFormat};

use crate::error::AppError;
use crate::quality::leading_number;

pub const DEFAULT_QUALITY: &str = "1080p";
const DEFAULT_HEIGHT: u32 = 1080;
const MP3_BITRATE: &str = "192K";

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub url: Option<String>,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default)]
    pub format: Option<String>
}

fn default_quality() -> String {
    DEFAULT_QUALITY.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Mp4,
    Mp3
}

impl OutputKind {
    /// Anything other than `mp3` is served as mp4.
    pub fn from_request(format: Option<&str>) -> Self {
        match format {
            Some(f) if f.eq_ignore_ascii_case("mp3") => Self::Mp3,
            _ => Self::Mp4
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mp3 => "mp3"
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Mp4 => "video/mp4",
            Self::Mp3 => "audio/mpeg"
        }
    }
}

/// Target height for a quality label; `best` means 1080.
pub fn requested_height(quality: &str) -> Result<u32, AppError> {
    if quality.trim().eq_ignore_ascii_case("best") {
        return Ok(DEFAULT_HEIGHT);
    }
    leading_number(quality).ok_or_else(|| AppError::bad_request("Invalid quality"))
}

/// Where one download writes its artifact and what yt-dlp is told to do.
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    pub kind: OutputKind,
    pub expected_path: PathBuf,
    pub options: DownloadOptions
}

impl DownloadPlan {
    pub fn new(download_dir: &Path, kind: OutputKind, quality: &str) -> Result<Self, AppError> {
        let stem = format!("video_{}", uuid7::uuid7());
        Self::with_stem(download_dir, kind, quality, stem)
    }

    pub fn with_stem(
        download_dir: &Path,
        kind: OutputKind,
        quality: &str,
        stem: String
    ) -> Result<Self, AppError> {
        let output_template = download_dir
            .join(format!("{stem}.%(ext)s"))
            .to_string_lossy()
            .to_string();
        let expected_path = download_dir.join(format!("{stem}.{}", kind.extension()));

        let options = match kind {
            OutputKind::Mp3 => DownloadOptions::new()
                .format(OutputFormat::best_audio_or_best())
                .extract_audio(true)
                .audio_format("mp3")
                .audio_quality(MP3_BITRATE),
            OutputKind::Mp4 => DownloadOptions::new()
                .format(OutputFormat::capped_mp4(requested_height(quality)?))
                .container(Container::Mp4)
        }
        .output_template(output_template)
        .quiet(true);

        Ok(Self {
            kind,
            expected_path,
            options
        })
    }

    /// Name offered to the browser for the finished file.
    pub fn attachment_name(&self, title: Option<&str>) -> String {
        let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("video");
        format!("{title}.{}", self.kind.extension())
    }
}

pub fn content_disposition(filename: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitize_ascii_filename(filename),
        urlencoding::encode(filename)
    )
}

fn sanitize_ascii_filename(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ' | '(' | ')') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}
