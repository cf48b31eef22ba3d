use serde::Serialize;
use url::Url;

/// True when `input` parses as a URL with both a scheme and a host.
pub fn is_valid_url(input: &str) -> bool {
    Url::parse(input)
        .map(|url| !url.scheme().is_empty() && url.host_str().is_some_and(|host| !host.is_empty()))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Facebook,
    Instagram,
    Twitter,
    Unknown
}

impl Platform {
    // Checked in order; the first platform with a matching needle wins.
    const NEEDLES: [(Platform, &'static [&'static str]); 5] = [
        (Platform::Youtube, &["youtube.com", "youtu.be"]),
        (Platform::Tiktok, &["tiktok.com"]),
        (Platform::Facebook, &["facebook.com", "fb.watch"]),
        (Platform::Instagram, &["instagram.com"]),
        (Platform::Twitter, &["twitter.com", "x.com"])
    ];

    pub fn detect(url: &str) -> Self {
        Self::NEEDLES
            .iter()
            .find(|(_, needles)| needles.iter().any(|needle| url.contains(needle)))
            .map_or(Platform::Unknown, |(platform, _)| *platform)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Unknown => "unknown"
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("ftp://files.example.org/clip.mp4"));
    }

    #[test]
    fn test_rejects_missing_scheme_or_host() {
        for input in [
            "",
            "not a url",
            "youtube.com/watch?v=abc",
            "www.tiktok.com/@user/video/1",
            "https://",
            "file:///tmp/video.mp4",
            "mailto:someone@example.com",
            "/relative/path"
        ] {
            assert!(!is_valid_url(input), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_detect_platforms() {
        assert_eq!(Platform::detect("https://www.youtube.com/watch?v=abc"), Platform::Youtube);
        assert_eq!(Platform::detect("https://youtu.be/abc"), Platform::Youtube);
        assert_eq!(Platform::detect("https://www.tiktok.com/@user/video/1"), Platform::Tiktok);
        assert_eq!(Platform::detect("https://fb.watch/xyz/"), Platform::Facebook);
        assert_eq!(Platform::detect("https://www.facebook.com/watch/?v=1"), Platform::Facebook);
        assert_eq!(Platform::detect("https://www.instagram.com/reel/abc/"), Platform::Instagram);
        assert_eq!(Platform::detect("https://twitter.com/user/status/1"), Platform::Twitter);
        assert_eq!(Platform::detect("https://x.com/user/status/1"), Platform::Twitter);
        assert_eq!(Platform::detect("https://vimeo.com/123"), Platform::Unknown);
    }

    #[test]
    fn test_tiktok_wins_over_later_platforms() {
        assert_eq!(
            Platform::detect("https://www.tiktok.com/@user/video/1?ref=x.com&from=instagram.com"),
            Platform::Tiktok
        );
        assert_eq!(
            Platform::detect("https://www.tiktok.com/share?u=https://facebook.com/page"),
            Platform::Tiktok
        );
    }

    #[test]
    fn test_platform_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Platform::Youtube).unwrap(), r#""youtube""#);
        assert_eq!(Platform::Unknown.to_string(), "unknown");
    }
}
