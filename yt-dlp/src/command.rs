use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::types::DownloadOptions;

pub struct CommandBuilder {
    binary: PathBuf,
    args: Vec<String>
}

impl CommandBuilder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn url(self, url: impl Into<String>) -> Self {
        // Keeps URLs that start with '-' from being read as options.
        self.arg("--").arg(url)
    }

    pub fn json_output(self) -> Self {
        self.arg("--dump-json")
    }

    pub fn skip_download(self) -> Self {
        self.arg("--skip-download")
    }

    pub fn no_simulate(self) -> Self {
        self.arg("--no-simulate")
    }

    pub fn no_playlist(self) -> Self {
        self.arg("--no-playlist")
    }

    pub fn no_warnings(self) -> Self {
        self.arg("--no-warnings")
    }

    pub fn quiet(self) -> Self {
        self.arg("--quiet")
    }

    pub fn output(self, template: impl Into<String>) -> Self {
        self.arg("-o").arg(template)
    }

    pub fn format(self, format: impl Into<String>) -> Self {
        self.arg("-f").arg(format)
    }

    pub fn extract_audio(self) -> Self {
        self.arg("-x")
    }

    pub fn audio_format(self, format: impl Into<String>) -> Self {
        self.arg("--audio-format").arg(format)
    }

    pub fn audio_quality(self, quality: impl Into<String>) -> Self {
        self.arg("--audio-quality").arg(quality)
    }

    pub fn merge_output_format(self, format: impl Into<String>) -> Self {
        self.arg("--merge-output-format").arg(format)
    }

    pub fn cookies_file_opt(self, path: Option<&PathBuf>) -> Self {
        match path {
            Some(p) => self.arg("--cookies").arg(p.to_string_lossy().to_string()),
            None => self
        }
    }

    pub fn ffmpeg_location(self, path: impl AsRef<Path>) -> Self {
        self.arg("--ffmpeg-location").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn with_options(mut self, options: &DownloadOptions) -> Self {
        if let Some(format_arg) = options.format.as_arg() {
            self = self.format(format_arg);
        }

        if let Some(container) = options.container.as_str() {
            self = self.merge_output_format(container);
        }

        if let Some(ref template) = options.output_template {
            self = self.output(template.clone());
        }

        if options.extract_audio {
            self = self.extract_audio();
        }

        if let Some(ref format) = options.audio_format {
            self = self.audio_format(format.clone());
        }

        if let Some(ref quality) = options.audio_quality {
            self = self.audio_quality(quality.clone());
        }

        if options.quiet {
            self = self.quiet();
        }

        self
    }

    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args);
        cmd.kill_on_drop(true);
        cmd
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}
