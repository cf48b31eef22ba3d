use std::path::PathBuf;

use tokio::process::Command;

use crate::command::CommandBuilder;
use crate::error::{Error, Result};
use crate::types::{DownloadOptions, VideoInfo};

#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_file: Option<PathBuf>,
    extra_args: Vec<String>,
    ffmpeg_location: Option<PathBuf>
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self::with_binary("yt-dlp")
    }

    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            binary: path.into(),
            cookies_file: None,
            extra_args: Vec::new(),
            ffmpeg_location: None
        }
    }

    pub fn set_cookies_file(&mut self, path: Option<PathBuf>) {
        self.cookies_file = path;
    }

    pub fn set_extra_args(&mut self, args: Vec<String>) {
        self.extra_args = args;
    }

    pub fn set_ffmpeg_location(&mut self, path: Option<PathBuf>) {
        self.ffmpeg_location = path;
    }

    pub async fn check_binary(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::BinaryNotExecutable(self.binary.clone()))
        }
    }

    /// Resolves metadata and the format list without downloading anything.
    pub async fn get_video_info(&self, url: &str) -> Result<VideoInfo> {
        self.run_for_info(self.info_command(url)).await
    }

    /// Downloads `url` according to `options` and returns the metadata
    /// yt-dlp resolved along the way. The file lands wherever
    /// `options.output_template` points.
    pub async fn download_with_options(
        &self,
        url: &str,
        options: &DownloadOptions
    ) -> Result<VideoInfo> {
        self.run_for_info(self.download_command(url, options)).await
    }

    fn info_command(&self, url: &str) -> CommandBuilder {
        self.command()
            .json_output()
            .skip_download()
            .no_playlist()
            .no_warnings()
            .quiet()
            .url(url)
    }

    // --dump-json alone implies simulate; --no-simulate makes yt-dlp both
    // download and print the resolved metadata.
    fn download_command(&self, url: &str, options: &DownloadOptions) -> CommandBuilder {
        self.command()
            .with_options(options)
            .json_output()
            .no_simulate()
            .no_playlist()
            .url(url)
    }

    async fn run_for_info(&self, builder: CommandBuilder) -> Result<VideoInfo> {
        tracing::debug!(
            binary = %self.binary.display(),
            args = ?builder.get_args(),
            "spawning yt-dlp"
        );

        let output = builder.build().output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(Error::CommandFailed {
                code: output.status.code().unwrap_or(-1),
                stderr
            });
        }

        parse_info_output(&output.stdout)
    }

    fn command(&self) -> CommandBuilder {
        let mut builder = CommandBuilder::new(&self.binary)
            .cookies_file_opt(self.cookies_file.as_ref())
            .args(self.extra_args.iter().map(String::as_str));

        if let Some(ref ffmpeg_path) = self.ffmpeg_location {
            builder = builder.ffmpeg_location(ffmpeg_path);
        }

        builder
    }
}

/// yt-dlp prints one JSON document per line; the last one describes the
/// video that was actually processed.
fn parse_info_output(stdout: &[u8]) -> Result<VideoInfo> {
    let stdout = String::from_utf8_lossy(stdout);
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('{'))
        .ok_or(Error::MissingOutput)?;

    Ok(serde_json::from_str(line)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Container, OutputFormat};

    #[test]
    fn test_parse_info_output_single_line() {
        let info = parse_info_output(br#"{"id": "abc", "title": "Clip"}"#).unwrap();
        assert_eq!(info.id, "abc");
        assert_eq!(info.title.as_deref(), Some("Clip"));
    }

    #[test]
    fn test_parse_info_output_skips_noise() {
        let stdout = b"[download] Destination: x.mp4\n{\"id\": \"abc\", \"title\": \"Clip\"}\n\n";
        let info = parse_info_output(stdout).unwrap();
        assert_eq!(info.id, "abc");
    }

    #[test]
    fn test_parse_info_output_empty() {
        assert!(matches!(parse_info_output(b""), Err(Error::MissingOutput)));
        assert!(matches!(parse_info_output(b"{not json"), Err(Error::JsonParseFailed(_))));
    }

    #[test]
    fn test_ytdlp_default() {
        let client = YtDlp::default();
        assert_eq!(client.binary, PathBuf::from("yt-dlp"));
        assert!(client.cookies_file.is_none());
        assert!(client.extra_args.is_empty());
    }

    #[test]
    fn test_command_carries_client_settings() {
        let mut client = YtDlp::with_binary("/opt/yt-dlp");
        client.set_cookies_file(Some(PathBuf::from("/tmp/cookies.txt")));
        client.set_ffmpeg_location(Some(PathBuf::from("/usr/local/bin/ffmpeg")));
        client.set_extra_args(vec![
            "--extractor-args".to_string(),
            "youtube:player-client=mweb".to_string()
        ]);
        let args = client.command().get_args().to_vec();
        assert_eq!(args, vec![
            "--cookies",
            "/tmp/cookies.txt",
            "--extractor-args",
            "youtube:player-client=mweb",
            "--ffmpeg-location",
            "/usr/local/bin/ffmpeg"
        ]);
    }

    #[test]
    fn test_info_command_args() {
        let client = YtDlp::new();
        let builder = client.info_command("https://youtu.be/a");
        assert_eq!(builder.get_args(), &[
            "--dump-json",
            "--skip-download",
            "--no-playlist",
            "--no-warnings",
            "--quiet",
            "--",
            "https://youtu.be/a"
        ]);
    }

    #[test]
    fn test_download_command_args_video() {
        let client = YtDlp::new();
        let options = DownloadOptions::new()
            .format(OutputFormat::capped_mp4(720))
            .container(Container::Mp4)
            .output_template("/tmp/dl/v.%(ext)s")
            .quiet(true);
        let builder = client.download_command("https://youtu.be/a", &options);
        assert_eq!(builder.get_args(), &[
            "-f",
            "bestvideo[height<=720][ext=mp4]+bestaudio[ext=m4a]/best[height<=720][ext=mp4]/best",
            "--merge-output-format",
            "mp4",
            "-o",
            "/tmp/dl/v.%(ext)s",
            "--quiet",
            "--dump-json",
            "--no-simulate",
            "--no-playlist",
            "--",
            "https://youtu.be/a"
        ]);
    }

    #[test]
    fn test_download_command_args_audio() {
        let mut client = YtDlp::new();
        client.set_ffmpeg_location(Some(PathBuf::from("/opt/ffmpeg")));
        let options = DownloadOptions::new()
            .format(OutputFormat::best_audio_or_best())
            .extract_audio(true)
            .audio_format("mp3")
            .audio_quality("192K")
            .output_template("/tmp/dl/a.%(ext)s")
            .quiet(true);
        let args = client.download_command("https://youtu.be/a", &options).get_args().to_vec();
        assert_eq!(args, vec![
            "--ffmpeg-location",
            "/opt/ffmpeg",
            "-f",
            "bestaudio/best",
            "-o",
            "/tmp/dl/a.%(ext)s",
            "-x",
            "--audio-format",
            "mp3",
            "--audio-quality",
            "192K",
            "--quiet",
            "--dump-json",
            "--no-simulate",
            "--no-playlist",
            "--",
            "https://youtu.be/a"
        ]);
        assert!(!args.contains(&"--skip-download".to_string()));
    }

    #[tokio::test]
    async fn test_check_binary_missing() {
        let client = YtDlp::with_binary("/nonexistent/yt-dlp-binary");
        assert!(matches!(client.check_binary().await, Err(Error::ExecutionFailed(_))));
    }
}
