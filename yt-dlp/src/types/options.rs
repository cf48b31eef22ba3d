/// Value passed to `-f`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Default,
    Custom(String)
}

impl OutputFormat {
    /// `bestaudio/best`: best audio-only stream, else the best combined one.
    pub fn best_audio_or_best() -> Self {
        OutputFormat::Custom("bestaudio/best".to_string())
    }

    /// Best mp4 video no taller than `height` merged with the best m4a audio,
    /// falling back to a progressive mp4 under the same cap, then to anything.
    pub fn capped_mp4(height: u32) -> Self {
        OutputFormat::Custom(format!(
            "bestvideo[height<={height}][ext=mp4]+bestaudio[ext=m4a]/best[height<={height}][ext=mp4]/best"
        ))
    }

    pub fn as_arg(&self) -> Option<String> {
        match self {
            OutputFormat::Default => None,
            OutputFormat::Custom(s) => Some(s.clone())
        }
    }
}

/// Container for `--merge-output-format`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Container {
    #[default]
    Default,
    Mp4
}

impl Container {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Container::Default => None,
            Container::Mp4 => Some("mp4")
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    pub format: OutputFormat,
    pub container: Container,
    pub output_template: Option<String>,
    pub extract_audio: bool,
    pub audio_format: Option<String>,
    pub audio_quality: Option<String>,
    pub quiet: bool
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    pub fn output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    pub fn extract_audio(mut self, extract: bool) -> Self {
        self.extract_audio = extract;
        self
    }

    pub fn audio_format(mut self, format: impl Into<String>) -> Self {
        self.audio_format = Some(format.into());
        self
    }

    pub fn audio_quality(mut self, quality: impl Into<String>) -> Self {
        self.audio_quality = Some(quality.into());
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}
