//! Metadata form fields given on the command line.

use anyhow::bail;
use clap::{Args, ValueEnum};
use pinvault_core::{ContentKind, SloganDetails, UploadMetadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentTypeArg {
    Artwork,
    Video,
    Slogan,
    Script,
    Design,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    /// Asset title (defaults to the file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Story or creative context behind the asset
    #[arg(long = "story")]
    pub story_context: Option<String>,

    /// Kind of content being protected
    #[arg(long, value_enum)]
    pub content_type: Option<ContentTypeArg>,

    /// Slogan text (slogan content only)
    #[arg(long)]
    pub slogan: Option<String>,

    /// Date the slogan was first used
    #[arg(long)]
    pub first_used: Option<String>,

    /// Platforms the slogan appeared on
    #[arg(long)]
    pub platforms: Option<String>,

    /// Known variations of the slogan
    #[arg(long)]
    pub variations: Option<String>,
}

impl FormArgs {
    fn has_slogan_fields(&self) -> bool {
        self.slogan.is_some()
            || self.first_used.is_some()
            || self.platforms.is_some()
            || self.variations.is_some()
    }

    /// Apply the given fields over `base`. Fields left unset keep their value.
    ///
    /// Switching to slogan content keeps slogan details already in `base`.
    pub fn apply(&self, base: UploadMetadata) -> anyhow::Result<UploadMetadata> {
        let mut form = base;

        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(story) = &self.story_context {
            form.story_context = story.clone();
        }

        if let Some(kind) = self.content_type {
            form.content = match kind {
                ContentTypeArg::Artwork => ContentKind::Artwork,
                ContentTypeArg::Video => ContentKind::Video,
                ContentTypeArg::Script => ContentKind::Script,
                ContentTypeArg::Design => ContentKind::Design,
                ContentTypeArg::Slogan => ContentKind::Slogan {
                    details: form.content.slogan_details().cloned().unwrap_or_default(),
                },
            };
        }

        if self.has_slogan_fields() {
            let ContentKind::Slogan { details } = &mut form.content else {
                bail!("Slogan fields require --content-type slogan");
            };
            merge_slogan(details, self);
        }

        Ok(form)
    }
}

fn merge_slogan(details: &mut SloganDetails, args: &FormArgs) {
    if let Some(slogan) = &args.slogan {
        details.slogan = slogan.clone();
    }
    if let Some(first_used) = &args.first_used {
        details.first_used = first_used.clone();
    }
    if let Some(platforms) = &args.platforms {
        details.platforms = platforms.clone();
    }
    if let Some(variations) = &args.variations {
        details.variations = variations.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_keep_base_values() {
        let base = UploadMetadata {
            title: "Draft title".to_string(),
            description: "from draft".to_string(),
            ..Default::default()
        };
        let args = FormArgs {
            description: Some("edited".to_string()),
            ..Default::default()
        };

        let form = args.apply(base).unwrap();
        assert_eq!(form.title, "Draft title");
        assert_eq!(form.description, "edited");
        assert_eq!(form.content, ContentKind::Artwork);
    }

    #[test]
    fn slogan_fields_fill_slogan_details() {
        let args = FormArgs {
            content_type: Some(ContentTypeArg::Slogan),
            slogan: Some("Stay human".to_string()),
            platforms: Some("radio, billboards".to_string()),
            ..Default::default()
        };

        let form = args.apply(UploadMetadata::default()).unwrap();
        let details = form.content.slogan_details().unwrap();
        assert_eq!(details.slogan, "Stay human");
        assert_eq!(details.platforms, "radio, billboards");
        assert_eq!(details.first_used, "");
    }

    #[test]
    fn slogan_details_survive_from_draft() {
        let base = UploadMetadata {
            content: ContentKind::Slogan {
                details: SloganDetails {
                    slogan: "Keep going".to_string(),
                    ..Default::default()
                },
            },
            ..Default::default()
        };
        let args = FormArgs {
            content_type: Some(ContentTypeArg::Slogan),
            variations: Some("Keep on going".to_string()),
            ..Default::default()
        };

        let form = args.apply(base).unwrap();
        let details = form.content.slogan_details().unwrap();
        assert_eq!(details.slogan, "Keep going");
        assert_eq!(details.variations, "Keep on going");
    }

    #[test]
    fn slogan_fields_without_slogan_content_are_refused() {
        let args = FormArgs {
            content_type: Some(ContentTypeArg::Video),
            slogan: Some("Not a slogan".to_string()),
            ..Default::default()
        };
        assert!(args.apply(UploadMetadata::default()).is_err());
    }

    #[test]
    fn switching_away_from_slogan_drops_details() {
        let base = UploadMetadata {
            content: ContentKind::Slogan {
                details: SloganDetails::default(),
            },
            ..Default::default()
        };
        let args = FormArgs {
            content_type: Some(ContentTypeArg::Design),
            ..Default::default()
        };
        assert_eq!(args.apply(base).unwrap().content, ContentKind::Design);
    }
}
