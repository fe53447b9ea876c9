use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Free-text details captured for a slogan or tagline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SloganDetails {
    #[serde(default)]
    pub slogan: String,
    /// Date the slogan was first used, as entered by the creator.
    #[serde(default)]
    pub first_used: String,
    #[serde(default)]
    pub platforms: String,
    #[serde(default)]
    pub variations: String,
}

/// Kind of creative content being protected.
///
/// Serialized with a `contentType` tag. Only slogans carry extra details, stored
/// under `sloganData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "contentType", rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Artwork,
    Video,
    Slogan {
        #[serde(rename = "sloganData", default)]
        details: SloganDetails,
    },
    Script,
    Design,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Artwork => "artwork",
            ContentKind::Video => "video",
            ContentKind::Slogan { .. } => "slogan",
            ContentKind::Script => "script",
            ContentKind::Design => "design",
        }
    }

    pub fn slogan_details(&self) -> Option<&SloganDetails> {
        match self {
            ContentKind::Slogan { details } => Some(details),
            _ => None,
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "artwork" => Ok(ContentKind::Artwork),
            "video" => Ok(ContentKind::Video),
            "slogan" => Ok(ContentKind::Slogan {
                details: SloganDetails::default(),
            }),
            "script" => Ok(ContentKind::Script),
            "design" => Ok(ContentKind::Design),
            other => Err(format!("Invalid content type: {}", other)),
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata form attached to an upload.
///
/// All text fields are optional; an empty string means "not supplied". A
/// missing `contentType` reads as artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredMetadata")]
pub struct UploadMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub story_context: String,
    #[serde(flatten)]
    pub content: ContentKind,
}

/// Metadata as persisted, before the content kind is resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMetadata {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    story_context: String,
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    slogan_data: Option<SloganDetails>,
}

impl TryFrom<StoredMetadata> for UploadMetadata {
    type Error = String;

    fn try_from(stored: StoredMetadata) -> Result<Self, Self::Error> {
        let mut content = match stored.content_type.as_deref().map(str::trim) {
            None | Some("") => ContentKind::default(),
            Some(kind) => kind.parse()?,
        };
        if let ContentKind::Slogan { details } = &mut content {
            *details = stored.slogan_data.unwrap_or_default();
        }

        Ok(UploadMetadata {
            title: stored.title,
            description: stored.description,
            story_context: stored.story_context,
            content,
        })
    }
}

impl UploadMetadata {
    /// Name to publish for a file: the title when one was entered, else the file name.
    pub fn display_name<'a>(&'a self, file_name: &'a str) -> &'a str {
        if self.title.trim().is_empty() {
            file_name
        } else {
            &self.title
        }
    }

    /// True when the form holds nothing beyond its defaults.
    pub fn is_blank(&self) -> bool {
        *self == UploadMetadata::default()
    }
}
