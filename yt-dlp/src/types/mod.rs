mod options;
mod video_info;

pub use options::{Container, DownloadOptions, OutputFormat};
pub use video_info::{Format, Thumbnail, VideoInfo};
