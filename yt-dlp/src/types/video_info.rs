use serde::{Deserialize, Deserializer, Serialize};

/// Subset of the `--dump-json` document that callers rely on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(default)]
    pub formats: Vec<Format>
}

impl VideoInfo {
    pub fn best_thumbnail(&self) -> Option<&str> {
        if let Some(ref url) = self.thumbnail {
            return Some(url);
        }
        self.thumbnails
            .iter()
            .max_by_key(|t| t.width.unwrap_or(0))
            .map(|t| t.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Format {
    #[serde(default)]
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub filesize: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub filesize_approx: Option<u64>
}

impl Format {
    pub fn estimated_size(&self) -> Option<u64> {
        self.filesize.or(self.filesize_approx)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub width: Option<u32>
}

// Extractors sometimes report sizes and dimensions as floats; accept any
// non-negative number and truncate it.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>
{
    Ok(lenient_u64(deserializer)?.and_then(|v| u32::try_from(v).ok()))
}
