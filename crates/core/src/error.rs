use thiserror::Error;

/// Failures that abort rendering a single badge.
#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: &'static str },
    #[error("failed to fetch project metadata")]
    MetadataFetch(#[source] reqwest::Error),
    #[error("failed to parse project metadata")]
    MetadataParse(#[source] serde_json::Error),
    #[error("failed to fetch icon")]
    IconFetch(#[source] reqwest::Error),
    #[error("failed to decode icon")]
    IconDecode(#[source] image::ImageError),
    #[error("failed to render badge: {0}")]
    Render(String),
}

impl BadgeError {
    pub fn invalid_color(value: &str, reason: &'static str) -> Self {
        Self::InvalidColor { value: value.to_string(), reason }
    }

    /// Name of the failure class, as reported in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidColor { .. } => "InvalidColor",
            Self::MetadataFetch(_) => "MetadataFetchError",
            Self::MetadataParse(_) => "MetadataParseError",
            Self::IconFetch(_) => "IconFetchError",
            Self::IconDecode(_) => "IconDecodeError",
            Self::Render(_) => "RenderError",
        }
    }
}

impl From<image::ImageError> for BadgeError {
    fn from(err: image::ImageError) -> Self { Self::Render(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let err = BadgeError::invalid_color("zz", "invalid hex digit");
        assert_eq!(err.kind(), "InvalidColor");
        assert_eq!(err.to_string(), "invalid color \"zz\": invalid hex digit");
        let err = BadgeError::MetadataParse(serde_json::from_str::<u32>("{").unwrap_err());
        assert_eq!(err.kind(), "MetadataParseError");
        assert_eq!(BadgeError::Render("empty canvas".into()).kind(), "RenderError");
    }
}
