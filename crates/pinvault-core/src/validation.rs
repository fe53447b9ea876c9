//! Upload acceptance rules.
//!
//! A file is accepted when its MIME type or its extension belongs to one of the
//! supported categories. The size ceiling is advisory only: callers surface a
//! warning but still upload the file.

use std::path::Path;

use crate::constants::{BYTES_PER_MB, DEFAULT_MAX_UPLOAD_MB};

/// Accepted categories: MIME pattern and the extensions listed for it.
const ACCEPTED_TYPES: &[(&str, &[&str])] = &[
    ("image/*", &["png", "jpg", "jpeg", "gif", "webp"]),
    ("video/*", &["mp4", "mov", "avi", "webm"]),
    ("application/pdf", &["pdf"]),
    ("text/*", &["txt", "md"]),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcceptanceError {
    #[error("Unsupported file type: {file_name} ({file_type}). Accepted: images (png, jpg, jpeg, gif, webp), video (mp4, mov, avi, webm), pdf, text (txt, md)")]
    UnsupportedType {
        file_name: String,
        file_type: String,
    },
}

/// Upload acceptance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_upload_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_MB)
    }
}

impl UploadPolicy {
    pub fn new(max_upload_mb: u64) -> Self {
        Self {
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Check that the file belongs to an accepted category.
    pub fn check_type(&self, file_name: &str, file_type: &str) -> Result<(), AcceptanceError> {
        let mime = file_type.trim().to_lowercase();
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let accepted = ACCEPTED_TYPES.iter().any(|(pattern, extensions)| {
            mime_matches(pattern, &mime)
                || extension
                    .as_deref()
                    .is_some_and(|ext| extensions.contains(&ext))
        });

        if accepted {
            Ok(())
        } else {
            Err(AcceptanceError::UnsupportedType {
                file_name: file_name.to_string(),
                file_type: file_type.to_string(),
            })
        }
    }

    /// Warning text when `size` exceeds the advisory ceiling.
    pub fn size_advisory(&self, size: u64) -> Option<String> {
        if size > self.max_upload_bytes {
            Some(format!(
                "File is {:.1} MB, above the recommended maximum of {:.0} MB",
                size as f64 / BYTES_PER_MB,
                self.max_upload_bytes as f64 / BYTES_PER_MB
            ))
        } else {
            None
        }
    }
}

fn mime_matches(pattern: &str, mime: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(prefix) => mime
            .split_once('/')
            .is_some_and(|(kind, subtype)| kind == prefix && !subtype.is_empty()),
        None => pattern == mime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_mime_types() {
        let policy = UploadPolicy::default();
        assert!(policy.check_type("hero.png", "image/png").is_ok());
        assert!(policy.check_type("clip.webm", "video/webm").is_ok());
        assert!(policy.check_type("deck.pdf", "application/pdf").is_ok());
        assert!(policy.check_type("notes.md", "text/markdown").is_ok());
        assert!(policy.check_type("script.txt", "TEXT/PLAIN").is_ok());
    }

    #[test]
    fn accepts_by_extension_when_mime_is_generic() {
        let policy = UploadPolicy::default();
        assert!(policy
            .check_type("photo.JPG", "application/octet-stream")
            .is_ok());
        assert!(policy.check_type("film.mov", "").is_ok());
    }

    #[test]
    fn rejects_unsupported_files() {
        let policy = UploadPolicy::default();
        assert!(matches!(
            policy.check_type("song.mp3", "audio/mpeg"),
            Err(AcceptanceError::UnsupportedType { .. })
        ));
        assert!(policy
            .check_type("setup.exe", "application/octet-stream")
            .is_err());
        assert!(policy.check_type("README", "").is_err());
        assert!(policy.check_type("weird", "image/").is_err());
    }

    #[test]
    fn size_advisory_only_above_ceiling() {
        let policy = UploadPolicy::new(100);
        assert_eq!(policy.max_upload_bytes(), 100 * 1024 * 1024);
        assert!(policy.size_advisory(100 * 1024 * 1024).is_none());

        let warning = policy.size_advisory(150 * 1024 * 1024).unwrap();
        assert!(warning.contains("150.0 MB"));
        assert!(warning.contains("100 MB"));
    }
}
