//! Preview classification and content loading for uploaded files.

use crate::platform::ContentReader;
use crate::types::UploadedFileInfo;

/// Text previews are cut after this many characters.
pub const MAX_PREVIEW_CHARS: usize = 100_000;

/// How a file can be previewed, decided by its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Rendered as an image from its locator.
    Image,
    /// Shown in an embedded document viewer.
    Pdf,
    /// Dumped as raw text.
    Text,
    /// No preview; a placeholder is shown instead.
    Unsupported,
}

impl PreviewKind {
    /// Classify a MIME type (ASCII case-insensitive, parameters ignored).
    #[must_use]
    pub fn from_mime(mime_type: &str) -> Self {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Self::Pdf,
            "text/plain" | "application/json" | "text/csv" => Self::Text,
            m if m.starts_with("image/") => Self::Image,
            _ => Self::Unsupported,
        }
    }
}

/// Content ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    Image { url: String },
    Pdf { url: String },
    Text { text: String, truncated: bool },
    Unsupported,
}

/// Failure to read a file's content for preview.
///
/// Independent of whether the upload itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// The content could not be fetched.
    #[error("failed to read file content: {0}")]
    Read(String),

    /// The content was fetched but is not valid text.
    #[error("file content is not valid text")]
    NotText,
}

/// Load the preview for an uploaded file.
///
/// Images and PDFs render straight from the file's locator; text-like
/// files are read through `reader` and truncated to
/// [`MAX_PREVIEW_CHARS`] characters.
///
/// # Errors
///
/// Propagates the reader's [`PreviewError`] for text-like files.
pub async fn load_preview<R: ContentReader + ?Sized>(
    reader: &R,
    file: &UploadedFileInfo,
) -> Result<PreviewContent, PreviewError> {
    match PreviewKind::from_mime(&file.mime_type) {
        PreviewKind::Image => Ok(PreviewContent::Image {
            url: file.url.clone(),
        }),
        PreviewKind::Pdf => Ok(PreviewContent::Pdf {
            url: file.url.clone(),
        }),
        PreviewKind::Text => {
            let text = reader.read_text(&file.url).await?;
            Ok(truncate_text(text))
        }
        PreviewKind::Unsupported => Ok(PreviewContent::Unsupported),
    }
}

fn truncate_text(text: String) -> PreviewContent {
    match text.char_indices().nth(MAX_PREVIEW_CHARS) {
        Some((cut, _)) => PreviewContent::Text {
            text: text[..cut].to_owned(),
            truncated: true,
        },
        None => PreviewContent::Text {
            text,
            truncated: false,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use futures::executor::block_on;

    use super::*;

    struct FixedReader(Result<String, PreviewError>);

    #[async_trait(?Send)]
    impl ContentReader for FixedReader {
        async fn read_text(&self, _url: &str) -> Result<String, PreviewError> {
            self.0.clone()
        }
    }

    fn record(mime_type: &str) -> UploadedFileInfo {
        UploadedFileInfo {
            id: "id".into(),
            name: "file".into(),
            url: "blob:file".into(),
            size: 1,
            mime_type: mime_type.into(),
        }
    }

    #[test]
    fn classifies_mime_categories() {
        assert_eq!(PreviewKind::from_mime("image/png"), PreviewKind::Image);
        assert_eq!(PreviewKind::from_mime("image/svg+xml"), PreviewKind::Image);
        assert_eq!(PreviewKind::from_mime("application/pdf"), PreviewKind::Pdf);
        assert_eq!(PreviewKind::from_mime("text/plain"), PreviewKind::Text);
        assert_eq!(PreviewKind::from_mime("application/json"), PreviewKind::Text);
        assert_eq!(PreviewKind::from_mime("text/csv"), PreviewKind::Text);
        assert_eq!(PreviewKind::from_mime("video/mp4"), PreviewKind::Unsupported);
        assert_eq!(PreviewKind::from_mime(""), PreviewKind::Unsupported);
    }

    #[test]
    fn classification_ignores_case_and_parameters() {
        assert_eq!(
            PreviewKind::from_mime("Text/Plain; charset=utf-8"),
            PreviewKind::Text
        );
    }

    #[test]
    fn image_and_pdf_use_locator_without_reading() {
        let reader = FixedReader(Err(PreviewError::Read("unused".into())));
        assert_eq!(
            block_on(load_preview(&reader, &record("image/png"))).unwrap(),
            PreviewContent::Image {
                url: "blob:file".into()
            }
        );
        assert_eq!(
            block_on(load_preview(&reader, &record("application/pdf"))).unwrap(),
            PreviewContent::Pdf {
                url: "blob:file".into()
            }
        );
    }

    #[test]
    fn text_is_read_through_reader() {
        let reader = FixedReader(Ok("a,b\n1,2\n".into()));
        assert_eq!(
            block_on(load_preview(&reader, &record("text/csv"))).unwrap(),
            PreviewContent::Text {
                text: "a,b\n1,2\n".into(),
                truncated: false
            }
        );
    }

    #[test]
    fn long_text_is_truncated_on_char_boundary() {
        let reader = FixedReader(Ok("ü".repeat(MAX_PREVIEW_CHARS + 5)));
        let content = block_on(load_preview(&reader, &record("text/plain"))).unwrap();
        let PreviewContent::Text { text, truncated } = content else {
            unreachable!("text preview expected");
        };
        assert!(truncated);
        assert_eq!(text.chars().count(), MAX_PREVIEW_CHARS);
    }

    #[test]
    fn read_failure_is_surfaced() {
        let reader = FixedReader(Err(PreviewError::Read("404".into())));
        assert_eq!(
            block_on(load_preview(&reader, &record("application/json"))),
            Err(PreviewError::Read("404".into()))
        );
    }

    #[test]
    fn unsupported_needs_no_read() {
        let reader = FixedReader(Err(PreviewError::NotText));
        assert_eq!(
            block_on(load_preview(&reader, &record("application/zip"))).unwrap(),
            PreviewContent::Unsupported
        );
    }
}
