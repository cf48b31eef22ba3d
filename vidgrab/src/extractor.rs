use async_trait::async_trait;
use yt_dlp::{DownloadOptions, VideoInfo, YtDlp};

/// Seam between the HTTP handlers and whatever resolves video URLs.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Resolves metadata and available formats without downloading.
    async fn fetch_info(&self, url: &str) -> yt_dlp::Result<VideoInfo>;

    /// Downloads to `options.output_template` and returns the resolved metadata.
    async fn download(&self, url: &str, options: &DownloadOptions) -> yt_dlp::Result<VideoInfo>;
}

#[async_trait]
impl MediaExtractor for YtDlp {
    async fn fetch_info(&self, url: &str) -> yt_dlp::Result<VideoInfo> {
        self.get_video_info(url).await
    }

    async fn download(&self, url: &str, options: &DownloadOptions) -> yt_dlp::Result<VideoInfo> {
        self.download_with_options(url, options).await
    }
}
