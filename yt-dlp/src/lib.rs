//! Async Rust wrapper for the yt-dlp CLI.
//!
//! Covers the two calls a download front-end needs: resolving metadata
//! without downloading, and downloading with a format selector and optional
//! audio extraction. yt-dlp invokes ffmpeg on its own for merging and
//! transcoding.
//!
//! # Example
//!
//! ```no_run
//! use yt_dlp::{Container, DownloadOptions, OutputFormat, YtDlp};
//!
//! #[tokio::main]
//! async fn main() -> yt_dlp::Result<()> {
//!     let client = YtDlp::new();
//!
//!     let version = client.check_binary().await?;
//!     println!("yt-dlp version: {}", version);
//!
//!     let info = client.get_video_info("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!     println!("Title: {:?}", info.title);
//!
//!     let options = DownloadOptions::new()
//!         .format(OutputFormat::capped_mp4(720))
//!         .container(Container::Mp4)
//!         .output_template("/tmp/clip.%(ext)s");
//!     client.download_with_options("https://www.youtube.com/watch?v=dQw4w9WgXcQ", &options).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod command;
pub mod error;
pub mod types;

pub use client::YtDlp;
pub use error::{Error, Result};
pub use types::{Container, DownloadOptions, Format, OutputFormat, Thumbnail, VideoInfo};
