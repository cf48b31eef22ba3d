use std::collections::HashSet;

use serde::Serialize;
use yt_dlp::Format;

pub const AUDIO_ONLY: &str = "Audio Only";

const VIDEO_EXTENSIONS: [&str; 2] = ["mp4", "webm"];

/// One selectable output variant offered to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityOption {
    pub quality: String,
    pub format: String,
    pub filesize: u64
}

impl QualityOption {
    pub fn audio_only() -> Self {
        Self {
            quality: AUDIO_ONLY.to_string(),
            format: "mp3".to_string(),
            filesize: 0
        }
    }

    /// Height the label encodes; audio-only and unlabeled entries rank 0.
    pub fn rank(&self) -> u32 {
        if self.quality == AUDIO_ONLY {
            0
        } else {
            leading_number(&self.quality).unwrap_or(0)
        }
    }
}

/// Collapses yt-dlp formats into one option per video height, appends the
/// audio-only option and orders the list tallest first.
pub fn shape_qualities(formats: &[Format]) -> Vec<QualityOption> {
    let mut seen = HashSet::new();
    let mut options: Vec<QualityOption> = formats
        .iter()
        .filter_map(|f| {
            let height = f.height?;
            let ext = f.ext.as_deref().filter(|ext| VIDEO_EXTENSIONS.contains(ext))?;
            Some((format!("{height}p"), ext, f.estimated_size()))
        })
        .filter(|(label, _, _)| seen.insert(label.clone()))
        .map(|(quality, ext, size)| QualityOption {
            quality,
            format: ext.to_string(),
            filesize: size.unwrap_or(0)
        })
        .collect();

    options.push(QualityOption::audio_only());
    options.sort_by(|a, b| b.rank().cmp(&a.rank()));
    options
}

/// First run of ASCII digits in `label`, e.g. `"720p60"` gives 720.
pub fn leading_number(label: &str) -> Option<u32> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let digits: String = label[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
