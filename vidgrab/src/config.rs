use std::path::PathBuf;

use anyhow::Context;
use yt_dlp::YtDlp;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub download_dir: PathBuf,
    pub ytdlp_path: Option<String>,
    pub ffmpeg_path: Option<PathBuf>,
    pub cookies_file: Option<PathBuf>,
    pub extractor_args: Vec<String>
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("invalid PORT: {raw}"))?,
            None => DEFAULT_PORT
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            download_dir: get("DOWNLOAD_DIR").map_or_else(std::env::temp_dir, PathBuf::from),
            ytdlp_path: get("YTDLP_PATH"),
            ffmpeg_path: get("FFMPEG_PATH").map(PathBuf::from),
            cookies_file: get("COOKIES_FILE").map(PathBuf::from),
            extractor_args: get("EXTRACTOR_ARGS")
                .map(|raw| parse_extractor_args(&raw))
                .unwrap_or_default()
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn build_client(&self) -> YtDlp {
        let mut yt_dlp = match self.ytdlp_path {
            Some(ref path) => {
                tracing::info!("Using custom yt-dlp path: {}", path);
                YtDlp::with_binary(path)
            }
            None => YtDlp::new()
        };

        if !self.extractor_args.is_empty() {
            yt_dlp.set_extra_args(self.extractor_args.clone());
        }

        if let Some(ref path) = self.cookies_file {
            if path.exists() {
                yt_dlp.set_cookies_file(Some(path.clone()));
                tracing::info!("Using cookies file: {}", path.display());
            } else {
                tracing::warn!("Cookies file {} not found, ignoring", path.display());
            }
        }

        if let Some(ref path) = self.ffmpeg_path {
            yt_dlp.set_ffmpeg_location(Some(path.clone()));
            tracing::info!("Using custom ffmpeg path: {}", path.display());
        }

        yt_dlp
    }
}

/// Turns newline- or `;`-separated `IE_KEY:ARG=VALUE` entries into one
/// `--extractor-args` pair per extractor. yt-dlp reads the key up to the first
/// `:` of each value, so args for different extractors cannot share a value.
/// An entry without its own key continues the previous extractor's args.
pub fn parse_extractor_args(input: &str) -> Vec<String> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

    for entry in input.split(['\n', ';']).map(str::trim).filter(|e| !e.is_empty()) {
        match split_extractor_key(entry) {
            Some((key, arg)) => match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, args)) => args.push(arg),
                None => groups.push((key, vec![arg]))
            },
            None => match groups.last_mut() {
                Some((_, args)) => args.push(entry),
                None => tracing::warn!("Ignoring extractor arg without extractor key: {}", entry)
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, args)| (key, args.into_iter().filter(|a| !a.is_empty()).collect::<Vec<_>>()))
        .filter(|(_, args)| !args.is_empty())
        .flat_map(|(key, args)| ["--extractor-args".to_string(), format!("{key}:{}", args.join(";"))])
        .collect()
}

// `youtube:player-client=mweb` has a key; `base_url=http://host:1` does not,
// because its first `:` comes after the `=`.
fn split_extractor_key(entry: &str) -> Option<(&str, &str)> {
    let colon = entry.find(':')?;
    if entry.find('=').is_some_and(|eq| eq < colon) {
        return None;
    }
    let key = entry[..colon].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, entry[colon + 1..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.download_dir, std::env::temp_dir());
        assert!(config.ytdlp_path.is_none());
        assert!(config.ffmpeg_path.is_none());
        assert!(config.extractor_args.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DOWNLOAD_DIR", "/srv/downloads"),
            ("YTDLP_PATH", "/opt/yt-dlp"),
            ("FFMPEG_PATH", "  "),
            ("EXTRACTOR_ARGS", "youtube:player-client=mweb")
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.download_dir, PathBuf::from("/srv/downloads"));
        assert_eq!(config.ytdlp_path.as_deref(), Some("/opt/yt-dlp"));
        assert!(config.ffmpeg_path.is_none());
        assert_eq!(config.extractor_args, vec!["--extractor-args", "youtube:player-client=mweb"]);
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("invalid PORT"));
    }

    #[test]
    fn test_parse_extractor_args_one_pair_per_extractor() {
        let input = "youtube:player-client=default,mweb\nyoutubepot-bgutilhttp:base_url=http://bgutil:4416";
        let result = parse_extractor_args(input);
        assert_eq!(result, vec![
            "--extractor-args",
            "youtube:player-client=default,mweb",
            "--extractor-args",
            "youtubepot-bgutilhttp:base_url=http://bgutil:4416"
        ]);
    }

    #[test]
    fn test_parse_extractor_args_merges_same_extractor() {
        let input = "  youtube:player-client=mweb ;\n\n  youtubepot-bgutilhttp:base_url=http://bgutil:4416\n  youtube:po_token=abc  ";
        let result = parse_extractor_args(input);
        assert_eq!(result, vec![
            "--extractor-args",
            "youtube:player-client=mweb;po_token=abc",
            "--extractor-args",
            "youtubepot-bgutilhttp:base_url=http://bgutil:4416"
        ]);
    }

    #[test]
    fn test_parse_extractor_args_continuation_entries() {
        let result = parse_extractor_args("youtube:player-client=mweb;po_token=abc");
        assert_eq!(result, vec!["--extractor-args", "youtube:player-client=mweb;po_token=abc"]);

        // no extractor to attach to
        assert!(parse_extractor_args("po_token=abc").is_empty());
        assert!(parse_extractor_args("  \n ; \n  ").is_empty());
        assert!(parse_extractor_args("youtube:").is_empty());
    }
}
