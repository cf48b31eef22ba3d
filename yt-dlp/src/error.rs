use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("yt-dlp binary not executable: {0}")]
    BinaryNotExecutable(PathBuf),

    #[error("failed to execute yt-dlp: {0}")]
    ExecutionFailed(#[from] std::io::Error),

    #[error("yt-dlp command failed with exit code {code}: {stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("failed to parse JSON output: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("yt-dlp produced no metadata output")]
    MissingOutput
}

impl Error {
    /// Last `ERROR:` line yt-dlp printed, falling back to the full message.
    pub fn summary(&self) -> String {
        match self {
            Error::CommandFailed { stderr, .. } => stderr
                .lines()
                .rev()
                .find_map(|line| line.trim().strip_prefix("ERROR:"))
                .map_or_else(|| self.to_string(), |line| line.trim().to_string()),
            _ => self.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prefers_error_line() {
        let err = Error::CommandFailed {
            code: 1,
            stderr: "WARNING: slow\nERROR: [youtube] abc: Video unavailable\n".to_string()
        };
        assert_eq!(err.summary(), "[youtube] abc: Video unavailable");
    }

    #[test]
    fn test_summary_falls_back_to_display() {
        let err = Error::CommandFailed {
            code: 2,
            stderr: "usage: yt-dlp".to_string()
        };
        assert_eq!(err.summary(), "yt-dlp command failed with exit code 2: usage: yt-dlp");
        assert_eq!(Error::MissingOutput.summary(), "yt-dlp produced no metadata output");
    }
}
